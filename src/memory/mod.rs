//! Morphological associative memory core.
//!
//! - **lattice**: max-plus / min-plus kernels (scalar and rayon)
//! - **morphological**: the trained memory with `recall_max` / `recall_min`
//! - **error**: caller-input errors

pub mod error;
pub mod lattice;
pub mod morphological;

pub use error::MemoryError;
pub use morphological::{LatticeWeights, MorphologicalMemory};
