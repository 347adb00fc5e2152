//! Loading training and test images from disk.

pub mod loader;

pub use loader::{load_pattern_set, PatternSet};
