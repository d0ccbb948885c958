use std::collections::HashMap;

use anyhow::{Result, anyhow, bail};
use serde::Deserialize;
use serde_json::Value;

use crate::ir::{ChordData, ColumnKind, WeightMatrix};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputDocument {
    labels: Option<Vec<String>>,
    matrix: Option<Vec<Vec<f64>>>,
    samples: Option<Vec<Value>>,
    colors: Option<Vec<String>>,
    title: Option<String>,
    config: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub data: ChordData,
    pub colors: Option<Vec<String>>,
    pub title: Option<String>,
    pub init_config: Option<Value>,
}

/// Parses a JSON or JSON5 chord document.
///
/// The relation data comes either from `labels` + `matrix`, or from
/// `samples`, a list of label sets whose pairwise co-occurrences become the
/// matrix.
pub fn parse_input(input: &str) -> Result<ParseOutput> {
    let doc: InputDocument =
        json5::from_str(input).map_err(|err| anyhow!("invalid chord document: {err}"))?;

    let data = match (doc.matrix, doc.samples) {
        (Some(_), Some(_)) => bail!("document must contain either 'matrix' or 'samples', not both"),
        (None, None) => bail!("document must contain a 'matrix' or a 'samples' list"),
        (Some(rows), None) => {
            let labels = doc
                .labels
                .ok_or_else(|| anyhow!("'matrix' documents need a 'labels' list"))?;
            let matrix = WeightMatrix::from_rows(&rows)?;
            ChordData::new(labels, matrix)?
        }
        (None, Some(samples)) => {
            if doc.labels.is_some() {
                bail!("'labels' are derived from 'samples' and cannot be given explicitly");
            }
            let sets = label_sets(&samples)?;
            let (labels, rows) = cooccurrence_matrix(&sets);
            if labels.is_empty() {
                bail!("'samples' contain no labels");
            }
            ChordData::new(labels, WeightMatrix::from_rows(&rows)?)?
        }
    };

    Ok(ParseOutput {
        data,
        colors: doc.colors,
        title: doc.title,
        init_config: doc.config,
    })
}

/// Classifies a column by its first non-null entry.
pub fn detect_column_kind(entries: &[Value]) -> Option<ColumnKind> {
    entries.iter().find_map(|entry| match entry {
        Value::String(text) if text.contains(' ') => Some(ColumnKind::Text),
        Value::String(_) => Some(ColumnKind::MonoLabel),
        Value::Array(_) => Some(ColumnKind::MultiLabel),
        Value::Number(_) => Some(ColumnKind::Numeric),
        _ => None,
    })
}

fn label_sets(samples: &[Value]) -> Result<Vec<Vec<String>>> {
    let Some(kind) = detect_column_kind(samples) else {
        return Ok(Vec::new());
    };
    let mut sets = Vec::with_capacity(samples.len());
    match kind {
        ColumnKind::MultiLabel => {
            for (idx, sample) in samples.iter().enumerate() {
                let Value::Array(items) = sample else {
                    if sample.is_null() {
                        continue;
                    }
                    bail!("sample {idx} is not a list of labels");
                };
                let mut set: Vec<String> = Vec::with_capacity(items.len());
                for item in items {
                    let label = item
                        .as_str()
                        .ok_or_else(|| anyhow!("sample {idx} contains a non-string label"))?;
                    if !set.iter().any(|seen| seen == label) {
                        set.push(label.to_string());
                    }
                }
                sets.push(set);
            }
        }
        ColumnKind::MonoLabel => {
            for (idx, sample) in samples.iter().enumerate() {
                match sample {
                    Value::String(label) => sets.push(vec![label.clone()]),
                    Value::Null => {}
                    _ => bail!("sample {idx} is not a label"),
                }
            }
        }
        ColumnKind::Numeric | ColumnKind::Text => {
            bail!("cannot build a chord diagram from a {} column", kind.as_str())
        }
    }
    Ok(sets)
}

/// Pairwise co-occurrence counts over label sets.
///
/// Labels are ordered by descending occurrence, ties by first appearance;
/// the diagonal holds each label's occurrence count.
pub fn cooccurrence_matrix(sets: &[Vec<String>]) -> (Vec<String>, Vec<Vec<f64>>) {
    let mut first_seen: Vec<String> = Vec::new();
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for set in sets {
        for label in set {
            let count = occurrences.entry(label.as_str()).or_insert(0);
            if *count == 0 {
                first_seen.push(label.clone());
            }
            *count += 1;
        }
    }

    let mut labels = first_seen;
    // stable sort keeps first-appearance order among equal counts
    labels.sort_by(|a, b| occurrences[b.as_str()].cmp(&occurrences[a.as_str()]));
    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (label.as_str(), idx))
        .collect();

    let mut rows = vec![vec![0.0; labels.len()]; labels.len()];
    for set in sets {
        for first in set {
            for second in set {
                rows[index[first.as_str()]][index[second.as_str()]] += 1.0;
            }
        }
    }
    (labels, rows)
}
