//! Two-phase recall session over image folders.
//!
//! Phase 1 corrupts every training pattern with each configured noise kind
//! and percentage and asks both memories to repair it. Phase 2 presents the
//! clean images of a separate test folder and scores each recall against the
//! closest training pattern.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use ndarray::{Array1, ArrayView1};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{BINARIZE_THRESHOLD, DEFAULT_NOISE_PERCENTAGES};
use crate::dataset::{load_pattern_set, PatternSet};
use crate::memory::{MemoryError, MorphologicalMemory};
use crate::pattern::layout::flatten;
use crate::pattern::noise::{add_noise, NoiseKind};
use crate::render::{ProbeRecord, RecallSink};
use crate::runtime::report::{hamming, RecallOutcome, SessionReport};

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Folder of training images.
    pub train_dir: PathBuf,

    /// Folder of clean test images; phase 2 is skipped when unset.
    pub test_dir: Option<PathBuf>,

    /// Image file extension to pick up.
    pub extension: String,

    /// Label for the pattern family (used in captions and file names).
    pub category: String,

    /// Normalized grayscale cutoff for binarization.
    pub binarize_threshold: f32,

    /// Corruption models for phase 1.
    pub noise_kinds: Vec<NoiseKind>,

    /// Corruption percentages for phase 1.
    pub percentages: Vec<f64>,

    /// Noise RNG seed; entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            train_dir: PathBuf::from("train"),
            test_dir: Some(PathBuf::from("test")),
            extension: "bmp".to_string(),
            category: "digits".to_string(),
            binarize_threshold: BINARIZE_THRESHOLD,
            noise_kinds: NoiseKind::ALL.to_vec(),
            percentages: DEFAULT_NOISE_PERCENTAGES.to_vec(),
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Read a JSON config. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config '{}'", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.binarize_threshold) {
            bail!(
                "binarize_threshold must lie in [0, 1], got {}",
                self.binarize_threshold
            );
        }
        if let Some(bad) = self
            .percentages
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            bail!("noise percentages must lie in [0, 100], got {}", bad);
        }
        Ok(())
    }
}

/// A trained memory plus the data and RNG needed to probe it.
pub struct Session {
    config: SessionConfig,
    train: PatternSet,
    test: Option<PatternSet>,
    patterns: Vec<Array1<f32>>,
    shape: (usize, usize),
    memory: MorphologicalMemory,
    rng: StdRng,
}

impl Session {
    /// Train a memory on an already-loaded set.
    ///
    /// The test folder named in `config`, if any, is loaded and checked
    /// against the training shape before training starts.
    pub fn new(config: SessionConfig, train: PatternSet) -> Result<Self> {
        config.validate()?;
        let Some(shape) = train.shape else {
            return Err(MemoryError::EmptyTrainingSet).context("no training patterns loaded");
        };

        let test = match &config.test_dir {
            Some(dir) => {
                let test = load_pattern_set(dir, &config.extension, config.binarize_threshold)?;
                ensure_shape(&test, shape)?;
                Some(test)
            }
            None => None,
        };

        let patterns = train.flat();
        let memory = MorphologicalMemory::trained(train.dim(), &patterns)
            .context("failed to train memory")?;
        info!(
            patterns = patterns.len(),
            dim = memory.dim(),
            "memory trained, pattern shape {:?}",
            shape
        );

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            train,
            test,
            patterns,
            shape,
            memory,
            rng,
        })
    }

    /// Load the training folder named in `config` and train on it.
    pub fn load(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let train = load_pattern_set(
            &config.train_dir,
            &config.extension,
            config.binarize_threshold,
        )?;
        Self::new(config, train)
    }

    /// Spatial layout shared by every pattern.
    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Phase 1: corrupted training patterns.
    pub fn run_noise_phase(&mut self, sink: &mut dyn RecallSink) -> Result<Vec<RecallOutcome>> {
        info!("phase 1: recalling noisy training patterns");
        let mut outcomes = Vec::new();

        for (idx, (name, x)) in self.train.names.iter().zip(&self.patterns).enumerate() {
            debug!("probing training pattern {}", name);
            for &kind in &self.config.noise_kinds {
                for &pct in &self.config.percentages {
                    let noisy = add_noise(x.view(), pct, kind, &mut self.rng)?;
                    let (max, min) = self.memory.recall_both(noisy.view())?;

                    sink.present(&ProbeRecord {
                        category: &self.config.category,
                        name,
                        phase: 1,
                        noise: Some((kind, pct)),
                        probe: noisy.view(),
                        recalled_max: max.view(),
                        recalled_min: min.view(),
                        shape: self.shape,
                    })?;

                    outcomes.push(RecallOutcome {
                        name: name.clone(),
                        phase: 1,
                        noise: Some(kind),
                        percentage: Some(pct),
                        reference: idx,
                        probe_distance: hamming(noisy.view(), x.view()),
                        max_distance: hamming(max.view(), x.view()),
                        min_distance: hamming(min.view(), x.view()),
                    });
                }
            }
        }
        Ok(outcomes)
    }

    /// Phase 2: clean test patterns.
    pub fn run_clean_phase(
        &self,
        test: &PatternSet,
        sink: &mut dyn RecallSink,
    ) -> Result<Vec<RecallOutcome>> {
        info!("phase 2: recalling {} clean test patterns", test.len());
        if test.is_empty() {
            return Ok(Vec::new());
        }
        ensure_shape(test, self.shape)?;

        let mut outcomes = Vec::with_capacity(test.len());
        for (name, image) in test.names.iter().zip(&test.images) {
            let probe = flatten(image.view());
            let (max, min) = self.memory.recall_both(probe.view())?;

            sink.present(&ProbeRecord {
                category: &self.config.category,
                name,
                phase: 2,
                noise: None,
                probe: probe.view(),
                recalled_max: max.view(),
                recalled_min: min.view(),
                shape: self.shape,
            })?;

            let (reference, probe_distance) = self.nearest_training(probe.view());
            let target = self.patterns[reference].view();
            outcomes.push(RecallOutcome {
                name: name.clone(),
                phase: 2,
                noise: None,
                percentage: None,
                reference,
                probe_distance,
                max_distance: hamming(max.view(), target),
                min_distance: hamming(min.view(), target),
            });
        }
        Ok(outcomes)
    }

    /// Both phases; phase 2 only when a test folder is configured.
    pub fn run(&mut self, sink: &mut dyn RecallSink) -> Result<SessionReport> {
        let mut outcomes = self.run_noise_phase(sink)?;

        if let Some(test) = &self.test {
            outcomes.extend(self.run_clean_phase(test, sink)?);
        }

        Ok(SessionReport {
            n_patterns: self.patterns.len(),
            dim: self.memory.dim(),
            outcomes,
        })
    }

    /// Closest training pattern by Hamming distance; ties go to the first.
    fn nearest_training(&self, probe: ArrayView1<f32>) -> (usize, usize) {
        self.patterns
            .iter()
            .enumerate()
            .map(|(i, x)| (i, hamming(probe, x.view())))
            .min_by_key(|&(i, d)| (d, i))
            .unwrap_or((0, probe.len()))
    }
}

/// An empty set fits any shape.
fn ensure_shape(set: &PatternSet, shape: (usize, usize)) -> Result<()> {
    match set.shape {
        Some(actual) if actual != shape => bail!(
            "test patterns have shape {:?}, training patterns have {:?}",
            actual,
            shape
        ),
        _ => Ok(()),
    }
}
