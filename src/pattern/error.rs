//! Error types for pattern preparation.

use thiserror::Error;

/// Errors raised while preparing, corrupting or reshaping patterns.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// Binarization threshold outside the normalized range.
    #[error("threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f32),

    /// Corruption percentage outside [0, 100].
    #[error("noise percentage must lie in [0, 100], got {0}")]
    InvalidPercentage(f64),

    /// Flat pattern length does not fit the requested 2-D shape.
    #[error("cannot lay out {actual} values as {expected:?}")]
    LayoutMismatch {
        /// Requested (height, width)
        expected: (usize, usize),
        /// Length of the flat pattern
        actual: usize,
    },

    /// One image in a set has a different shape from the first.
    #[error("pattern {index} has shape {actual:?}, expected {expected:?}")]
    InconsistentShapes {
        /// Shape of the first pattern
        expected: (usize, usize),
        /// Shape of the offending pattern
        actual: (usize, usize),
        /// Position of the offending pattern in the set
        index: usize,
    },

    /// Unrecognised noise mode name.
    #[error("unknown noise kind '{0}' (expected additive, subtractive or mixed)")]
    UnknownNoiseKind(String),
}
