use std::f64::consts::TAU;

use tracing::debug;

use super::IdeogramEnd;
use super::error::{ChordError, Result};

/// Lays the arcs out in index order, each followed by `gap`.
pub fn compute_ends(lengths: &[f64], gap: f64) -> Vec<IdeogramEnd> {
    let mut ends = Vec::with_capacity(lengths.len());
    let mut left = 0.0;
    for &length in lengths {
        let right = left + length;
        ends.push(IdeogramEnd {
            start: left,
            end: right,
        });
        left = right + gap;
    }
    ends
}

/// Arc length per entity: its share of the full circle minus one gap.
///
/// An entity whose share is smaller than the gap collapses to a zero-length
/// arc. The overshoot is taken from the other arcs in proportion to their
/// length, so arcs and gaps still cover exactly `2π`.
pub fn lengths_from_weights(row_sums: &[f64], gap: f64) -> Result<Vec<f64>> {
    let total: f64 = row_sums.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return Err(ChordError::DegenerateInput {
            reason: format!("total weight must be positive, got {total}"),
        });
    }
    if !gap.is_finite() || gap < 0.0 || row_sums.len() as f64 * gap >= TAU {
        return Err(ChordError::DegenerateInput {
            reason: format!(
                "{} gaps of {gap} rad leave no room on the circle",
                row_sums.len()
            ),
        });
    }

    let raw: Vec<f64> = row_sums
        .iter()
        .map(|&weight| TAU * weight / total - gap)
        .collect();
    let overshoot: f64 = raw.iter().filter(|&&length| length < 0.0).map(|length| -length).sum();
    let mut lengths: Vec<f64> = raw.iter().map(|&length| length.max(0.0)).collect();

    if overshoot > 0.0 {
        let available = TAU - row_sums.len() as f64 * gap;
        let clamped: f64 = lengths.iter().sum();
        debug!(overshoot, "shrinking arcs to make room for collapsed entities");
        let scale = available / clamped;
        for length in &mut lengths {
            *length *= scale;
        }
    }
    Ok(lengths)
}
