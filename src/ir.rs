use serde::Serialize;

use crate::layout::{ChordError, Result};

/// Square matrix of relation strengths, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightMatrix {
    size: usize,
    values: Vec<f64>,
}

impl WeightMatrix {
    /// Validates shape and entries: at least one row, every row as long as
    /// the number of rows, every entry finite and non-negative.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(ChordError::EmptyMatrix);
        }
        let mut values = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(ChordError::NonSquare {
                    row: row_idx,
                    len: row.len(),
                    expected: size,
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChordError::InvalidWeight {
                        row: row_idx,
                        col: col_idx,
                        value,
                    });
                }
                values.push(value);
            }
        }
        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.size..(row + 1) * self.size]
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.size).map(|row| self.row(row).iter().sum()).collect()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|row| self.row(row).to_vec()).collect()
    }
}

/// Labeled relation data handed to the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordData {
    pub labels: Vec<String>,
    pub matrix: WeightMatrix,
}

impl ChordData {
    pub fn new(labels: Vec<String>, matrix: WeightMatrix) -> Result<Self> {
        if labels.len() != matrix.size() {
            return Err(ChordError::LabelCountMismatch {
                expected: matrix.size(),
                actual: labels.len(),
            });
        }
        Ok(Self { labels, matrix })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Kind of values found in one column of tabular samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    MonoLabel,
    MultiLabel,
    Text,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::MonoLabel => "mono-label",
            ColumnKind::MultiLabel => "multi-label",
            ColumnKind::Text => "text",
        }
    }
}
