//! # morphmem
//!
//! Binary **morphological associative memories**: content-addressable stores
//! built on lattice (max-plus / min-plus) algebra instead of dot products.
//!
//! ## Components
//!
//! 1. **Memory core** — `train` builds the max-memory `W` and min-memory `M`,
//!    `recall_max` / `recall_min` project a probe back through them
//! 2. **Pattern preparation** — binarization, flat/2-D layout, noise injection
//! 3. **Dataset** — image folders → binary pattern sets
//! 4. **Render** — text and PNG panels of probe and recalls
//! 5. **Runtime** — the two-phase recall session and its report
//!
//! ## Example
//!
//! ```
//! use morphmem::memory::MorphologicalMemory;
//! use ndarray::array;
//!
//! let patterns = vec![array![1.0, 0.0, 0.0, 1.0], array![0.0, 1.0, 1.0, 0.0]];
//! let memory = MorphologicalMemory::trained(4, &patterns).unwrap();
//!
//! // One spurious 1 is removed by the max-memory.
//! let noisy = array![1.0, 1.0, 0.0, 1.0];
//! assert_eq!(memory.recall_max(noisy.view()).unwrap(), patterns[0]);
//! ```

pub mod dataset;
pub mod memory;
pub mod pattern;
pub mod render;
pub mod runtime;

/// Crate-wide constants.
pub mod config {
    /// Recall cutoff: projection values `>= RECALL_THRESHOLD` become 1.
    pub const RECALL_THRESHOLD: f32 = 0.5;

    /// Default normalized grayscale cutoff for binarization.
    pub const BINARIZE_THRESHOLD: f32 = 0.5;

    /// Full scale of 8-bit grayscale.
    pub const GRAY_MAX: f32 = 255.0;

    /// Corruption percentages tried in a default session.
    pub const DEFAULT_NOISE_PERCENTAGES: [f64; 4] = [1.0, 25.0, 50.0, 90.0];

    /// Pattern length from which training and recall use the rayon kernels.
    pub const PARALLEL_MIN_DIM: usize = 256;

    /// Default pixel scale for PNG panels.
    pub const PANEL_SCALE: u32 = 8;
}
