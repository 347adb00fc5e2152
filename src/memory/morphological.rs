//! Autoassociative morphological memory (max and min variants).
//!
//! Training stores a pattern set as two `n × n` envelopes of pairwise
//! coordinate differences:
//!
//!   W[i,j] = max_μ (x^μ[i] - x^μ[j])      M[i,j] = min_μ (x^μ[i] - x^μ[j])
//!
//! Recall runs the probe back through one envelope and binarizes at 0.5:
//!
//!   recall_max: y[i] = min_j (W[i,j] + x[j])   (survives additive noise)
//!   recall_min: y[i] = max_j (M[i,j] + x[j])   (survives subtractive noise)
//!
//! Both recover every training pattern exactly. The memory is flat and
//! dimension-agnostic; spatial layout is the caller's business.

use ndarray::{Array1, Array2, ArrayView1};
use tracing::debug;

use crate::config::{PARALLEL_MIN_DIM, RECALL_THRESHOLD};
use crate::memory::error::MemoryError;
use crate::memory::lattice;

pub type Result<T> = std::result::Result<T, MemoryError>;

/// The trained state: both envelopes plus the number of exemplars that
/// produced them. Never mutated once built.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeWeights {
    /// Max-memory, upper envelope of coordinate differences.
    pub w: Array2<f32>,

    /// Min-memory, lower envelope of coordinate differences.
    pub m: Array2<f32>,

    /// Number of patterns memorized.
    pub n_patterns: usize,
}

/// A binary morphological associative memory for patterns of length `n`.
#[derive(Clone, Debug)]
pub struct MorphologicalMemory {
    n: usize,
    weights: Option<LatticeWeights>,
}

impl MorphologicalMemory {
    /// Create an untrained memory for patterns of length `n`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(MemoryError::InvalidDimension);
        }
        Ok(Self { n, weights: None })
    }

    /// Build a memory and train it in one step.
    pub fn trained(n: usize, patterns: &[Array1<f32>]) -> Result<Self> {
        let mut memory = Self::new(n)?;
        memory.train(patterns)?;
        Ok(memory)
    }

    /// Pattern dimensionality.
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// Trained envelopes, if any.
    pub fn weights(&self) -> Option<&LatticeWeights> {
        self.weights.as_ref()
    }

    /// Memorize `patterns`, replacing whatever was stored before.
    ///
    /// Input is validated before any work starts, and the new envelopes are
    /// swapped in only once both are complete, so an error leaves the
    /// previous state untouched.
    pub fn train(&mut self, patterns: &[Array1<f32>]) -> Result<()> {
        if patterns.is_empty() {
            return Err(MemoryError::EmptyTrainingSet);
        }
        if let Some(bad) = patterns.iter().find(|x| x.len() != self.n) {
            return Err(MemoryError::shape_mismatch(self.n, bad.len()));
        }

        let parallel = self.n >= PARALLEL_MIN_DIM;
        debug!(
            n = self.n,
            p = patterns.len(),
            parallel,
            "building lattice envelopes"
        );

        let (w, m) = if parallel {
            lattice::envelopes_parallel(patterns, self.n)
        } else {
            lattice::envelopes_naive(patterns, self.n)
        };

        self.weights = Some(LatticeWeights {
            w,
            m,
            n_patterns: patterns.len(),
        });
        Ok(())
    }

    /// Real-valued max-memory projection `min_j (W[i,j] + x[j])`, before
    /// thresholding.
    pub fn project_max(&self, probe: ArrayView1<f32>) -> Result<Array1<f32>> {
        let weights = self.checked_weights(probe.len())?;
        Ok(if self.n >= PARALLEL_MIN_DIM {
            lattice::erode_parallel(weights.w.view(), probe)
        } else {
            lattice::erode_naive(weights.w.view(), probe)
        })
    }

    /// Real-valued min-memory projection `max_j (M[i,j] + x[j])`, before
    /// thresholding.
    pub fn project_min(&self, probe: ArrayView1<f32>) -> Result<Array1<f32>> {
        let weights = self.checked_weights(probe.len())?;
        Ok(if self.n >= PARALLEL_MIN_DIM {
            lattice::dilate_parallel(weights.m.view(), probe)
        } else {
            lattice::dilate_naive(weights.m.view(), probe)
        })
    }

    /// Recall through the max-memory `W`.
    pub fn recall_max(&self, probe: ArrayView1<f32>) -> Result<Array1<f32>> {
        let y = self.project_max(probe)?;
        Ok(lattice::threshold(&y, RECALL_THRESHOLD))
    }

    /// Recall through the min-memory `M`.
    pub fn recall_min(&self, probe: ArrayView1<f32>) -> Result<Array1<f32>> {
        let y = self.project_min(probe)?;
        Ok(lattice::threshold(&y, RECALL_THRESHOLD))
    }

    /// Run both recalls on the same probe: `(max, min)`.
    pub fn recall_both(&self, probe: ArrayView1<f32>) -> Result<(Array1<f32>, Array1<f32>)> {
        Ok((self.recall_max(probe)?, self.recall_min(probe)?))
    }

    fn checked_weights(&self, probe_len: usize) -> Result<&LatticeWeights> {
        let weights = self.weights.as_ref().ok_or(MemoryError::NotTrained)?;
        if probe_len != self.n {
            return Err(MemoryError::shape_mismatch(self.n, probe_len));
        }
        Ok(weights)
    }
}
