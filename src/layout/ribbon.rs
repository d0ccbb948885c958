use std::cmp::Ordering;

use crate::ir::WeightMatrix;

use super::error::{ChordError, Result};
use super::{IdeogramEnd, RibbonEnd};

/// Cut points of one ideogram, one sub-interval per partner.
///
/// Slot `i` spans `cuts[i]..cuts[i + 1]` and belongs to partner
/// `permutation[i]`; `inverse[j]` is the slot owned by partner `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonEndMap {
    pub cuts: Vec<f64>,
    pub permutation: Vec<usize>,
    pub inverse: Vec<usize>,
}

impl RibbonEndMap {
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    pub fn slot(&self, slot: usize) -> RibbonEnd {
        RibbonEnd::new(self.cuts[slot], self.cuts[slot + 1])
    }

    pub fn for_partner(&self, partner: usize) -> RibbonEnd {
        self.slot(self.inverse[partner])
    }
}

/// Converts raw weights into angular widths on each entity's own arc.
/// Rows without weight map to zero widths.
pub fn map_weights(matrix: &WeightMatrix, row_sums: &[f64], lengths: &[f64]) -> Vec<Vec<f64>> {
    let size = matrix.size();
    (0..size)
        .map(|k| {
            if row_sums[k] > 0.0 {
                matrix
                    .row(k)
                    .iter()
                    .map(|&value| lengths[k] * value / row_sums[k])
                    .collect()
            } else {
                vec![0.0; size]
            }
        })
        .collect()
}

/// Ascending order of partners per entity, ties broken by partner index.
pub fn sort_permutation(mapped: &[Vec<f64>]) -> Vec<Vec<usize>> {
    mapped
        .iter()
        .map(|row| {
            let mut order: Vec<usize> = (0..row.len()).collect();
            order.sort_by(|&a, &b| {
                row[a]
                    .partial_cmp(&row[b])
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.cmp(&b))
            });
            order
        })
        .collect()
}

pub fn invert(permutation: &[usize]) -> Result<Vec<usize>> {
    let size = permutation.len();
    let mut inverse = vec![usize::MAX; size];
    for (slot, &partner) in permutation.iter().enumerate() {
        if partner >= size {
            return Err(ChordError::InvalidPermutation {
                reason: format!("entry {partner} at position {slot} is out of range 0..{size}"),
            });
        }
        if inverse[partner] != usize::MAX {
            return Err(ChordError::InvalidPermutation {
                reason: format!("entry {partner} appears more than once"),
            });
        }
        inverse[partner] = slot;
    }
    Ok(inverse)
}

/// Subdivides every ideogram into per-partner ribbon ends, laid down in
/// sorted partner order starting at the ideogram's start.
pub fn ribbon_ends(
    mapped: &[Vec<f64>],
    ideogram_ends: &[IdeogramEnd],
    permutations: &[Vec<usize>],
) -> Result<Vec<RibbonEndMap>> {
    let mut maps = Vec::with_capacity(mapped.len());
    for (k, row) in mapped.iter().enumerate() {
        let permutation = permutations[k].clone();
        if permutation.len() != row.len() {
            return Err(ChordError::InvalidPermutation {
                reason: format!(
                    "entity {k} has {} partners but a permutation of length {}",
                    row.len(),
                    permutation.len()
                ),
            });
        }
        let inverse = invert(&permutation)?;

        let ideogram = ideogram_ends[k];
        let mut cuts = Vec::with_capacity(row.len() + 1);
        let mut position = ideogram.start;
        cuts.push(position);
        for &partner in &permutation {
            position += row[partner];
            cuts.push(position);
        }
        let total: f64 = row.iter().sum();
        if total > 0.0 {
            if let Some(last) = cuts.last_mut() {
                *last = ideogram.end;
            }
        }

        maps.push(RibbonEndMap {
            cuts,
            permutation,
            inverse,
        });
    }
    Ok(maps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ideogram::{compute_ends, lengths_from_weights};

    fn sample_matrix() -> WeightMatrix {
        WeightMatrix::from_rows(&[
            vec![4.0, 1.0, 3.0, 0.0],
            vec![1.0, 0.0, 5.0, 2.0],
            vec![3.0, 5.0, 2.0, 2.0],
            vec![0.0, 2.0, 2.0, 6.0],
        ])
        .unwrap()
    }

    fn allocate(matrix: &WeightMatrix, gap: f64) -> (Vec<IdeogramEnd>, Vec<RibbonEndMap>) {
        let row_sums = matrix.row_sums();
        let lengths = lengths_from_weights(&row_sums, gap).unwrap();
        let ends = compute_ends(&lengths, gap);
        let mapped = map_weights(matrix, &row_sums, &lengths);
        let perms = sort_permutation(&mapped);
        let maps = ribbon_ends(&mapped, &ends, &perms).unwrap();
        (ends, maps)
    }

    #[test]
    fn permutation_sorts_ascending_with_index_ties() {
        let perms = sort_permutation(&[vec![3.0, 1.0, 3.0, 0.0]]);
        assert_eq!(perms[0], vec![3, 1, 0, 2]);
    }

    #[test]
    fn inverse_law_holds() {
        let matrix = sample_matrix();
        let row_sums = matrix.row_sums();
        let lengths = lengths_from_weights(&row_sums, 0.03).unwrap();
        let perms = sort_permutation(&map_weights(&matrix, &row_sums, &lengths));
        for perm in &perms {
            let inverse = invert(perm).unwrap();
            for (slot, &partner) in perm.iter().enumerate() {
                assert_eq!(inverse[partner], slot);
            }
        }
    }

    #[test]
    fn invert_rejects_non_bijections() {
        assert!(matches!(
            invert(&[0, 0, 1]),
            Err(ChordError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            invert(&[0, 3, 1]),
            Err(ChordError::InvalidPermutation { .. })
        ));
        assert_eq!(invert(&[2, 0, 1]).unwrap(), vec![1, 2, 0]);
    }

    #[test]
    fn ribbon_ends_partition_each_ideogram() {
        let matrix = sample_matrix();
        let (ends, maps) = allocate(&matrix, 0.03);
        for (k, map) in maps.iter().enumerate() {
            assert_eq!(map.cuts.len(), matrix.size() + 1);
            assert_eq!(map.cuts[0], ends[k].start);
            assert_eq!(*map.cuts.last().unwrap(), ends[k].end);
            for pair in map.cuts.windows(2) {
                assert!(pair[1] >= pair[0]);
            }
        }
    }

    #[test]
    fn partner_lookup_matches_weight() {
        let matrix = sample_matrix();
        let (ends, maps) = allocate(&matrix, 0.03);
        let row_sums = matrix.row_sums();
        for k in 0..matrix.size() {
            for j in 0..matrix.size() {
                let end = maps[k].for_partner(j);
                let expected = ends[k].length() * matrix.get(k, j) / row_sums[k];
                assert!((end.width() - expected).abs() < 1e-9, "k={k} j={j}");
            }
        }
    }

    #[test]
    fn heaviest_partner_takes_the_last_slot() {
        let matrix = sample_matrix();
        let (ends, maps) = allocate(&matrix, 0.03);
        let last = maps[1].slot(matrix.size() - 1);
        assert_eq!(maps[1].permutation[matrix.size() - 1], 2);
        assert_eq!(maps[1].for_partner(2), last);
        assert_eq!(last.end, ends[1].end);
    }

    #[test]
    fn empty_row_maps_to_zero_widths() {
        let matrix = WeightMatrix::from_rows(&[vec![1.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let mapped = map_weights(&matrix, &matrix.row_sums(), &[std::f64::consts::PI, 0.0]);
        assert_eq!(mapped[1], vec![0.0, 0.0]);
    }
}
