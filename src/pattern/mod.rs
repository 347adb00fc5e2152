//! Pattern preparation around the memory core.
//!
//! - **binarize**: grayscale image → {0,1} image (black = 1, white = 0)
//! - **layout**: flatten images to memory vectors and reshape recalls back
//! - **noise**: additive / subtractive / mixed corruption of a clean pattern

pub mod binarize;
pub mod error;
pub mod layout;
pub mod noise;

pub use error::PatternError;
