//! Error types for the memory core.

use thiserror::Error;

/// Caller-input errors raised by training and recall. None of them are
/// transient; the failed call leaves the memory exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// A pattern or probe does not have the memory's dimensionality.
    #[error("shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// The memory's `n`
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// Training was asked to memorize zero patterns.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Recall was attempted before a successful `train`.
    #[error("memory has not been trained")]
    NotTrained,

    /// A memory was constructed for zero-length patterns.
    #[error("pattern dimensionality must be at least 1")]
    InvalidDimension,
}

impl MemoryError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }
}
