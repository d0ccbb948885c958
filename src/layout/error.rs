pub type Result<T> = std::result::Result<T, ChordError>;

/// Failures raised while laying out a chord diagram.
///
/// Every variant is produced before any shape is emitted, so a caller never
/// sees a partially built diagram.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChordError {
    #[error("weight matrix must contain at least one entity")]
    EmptyMatrix,

    #[error("weight matrix must be square: row {row} has {len} entries, expected {expected}")]
    NonSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("expected {expected} labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    #[error("expected {expected} colors, got {actual}")]
    ColorCountMismatch { expected: usize, actual: usize },

    #[error("invalid weight {value} at [{row}][{col}]: weights must be finite and non-negative")]
    InvalidWeight { row: usize, col: usize, value: f64 },

    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: String },

    #[error("incorrect interval ends [{lower}, {upper})")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("incorrect angle coordinates for arc from {start} to {end}")]
    InvalidArc { start: f64, end: f64 },

    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },
}
