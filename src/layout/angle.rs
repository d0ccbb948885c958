use std::f64::consts::{PI, TAU};

use super::error::{ChordError, Result};

/// Which way an arc between two angles travels around the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSweep {
    Short,
    Long,
}

/// Maps `x` onto the half-open interval `[lower, upper)`.
///
/// Circle code always passes bounds that are `2π` apart, e.g. `[0, 2π)` or
/// `[-π, π)`.
pub fn normalize(x: f64, lower: f64, upper: f64) -> Result<f64> {
    if upper <= lower {
        return Err(ChordError::InvalidInterval { lower, upper });
    }
    let width = upper - lower;
    let mut offset = (x - lower).rem_euclid(width);
    // rem_euclid can round up to exactly `width` for tiny negative inputs
    if offset >= width {
        offset = 0.0;
    }
    Ok(lower + offset)
}

pub fn is_in_standard_range(x: f64) -> bool {
    (0.0..TAU).contains(&x)
}

/// Signed angular distance from `from` to `to` along the shorter way, in
/// `(-π, π]`.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI { delta - TAU } else { delta }
}

/// Classifies the counter-clockwise arc from `from` to `to`.
pub fn classify_sweep(from: f64, to: f64) -> ArcSweep {
    let ccw = (to - from).rem_euclid(TAU);
    if ccw <= TAU - ccw {
        ArcSweep::Short
    } else {
        ArcSweep::Long
    }
}
