//! Recall outcomes and per-phase summaries.

use ndarray::ArrayView1;
use serde::Serialize;

use crate::pattern::noise::NoiseKind;

/// Number of positions where two binary vectors disagree.
pub fn hamming(a: ArrayView1<f32>, b: ArrayView1<f32>) -> usize {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
}

/// What happened to one probe.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecallOutcome {
    /// Probe file name.
    pub name: String,

    /// 1 = corrupted training pattern, 2 = clean test pattern.
    pub phase: u8,

    pub noise: Option<NoiseKind>,
    pub percentage: Option<f64>,

    /// Index of the training pattern the recalls are scored against.
    pub reference: usize,

    /// Hamming distance probe → reference.
    pub probe_distance: usize,

    /// Hamming distance max recall → reference.
    pub max_distance: usize,

    /// Hamming distance min recall → reference.
    pub min_distance: usize,
}

impl RecallOutcome {
    pub fn max_exact(&self) -> bool {
        self.max_distance == 0
    }

    pub fn min_exact(&self) -> bool {
        self.min_distance == 0
    }
}

/// Exact-recall counts for a group of probes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RecallTally {
    pub probes: usize,
    pub max_exact: usize,
    pub min_exact: usize,
}

impl RecallTally {
    pub fn add(&mut self, outcome: &RecallOutcome) {
        self.probes += 1;
        self.max_exact += outcome.max_exact() as usize;
        self.min_exact += outcome.min_exact() as usize;
    }

    /// Fraction of probes the max-memory recovered exactly.
    pub fn max_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.max_exact as f64 / self.probes as f64
        }
    }

    /// Fraction of probes the min-memory recovered exactly.
    pub fn min_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.min_exact as f64 / self.probes as f64
        }
    }
}

/// Everything one session produced.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SessionReport {
    /// Patterns memorized.
    pub n_patterns: usize,

    /// Pattern length.
    pub dim: usize,

    pub outcomes: Vec<RecallOutcome>,
}

impl SessionReport {
    /// Tally for one phase.
    pub fn phase_tally(&self, phase: u8) -> RecallTally {
        let mut tally = RecallTally::default();
        for outcome in self.outcomes.iter().filter(|o| o.phase == phase) {
            tally.add(outcome);
        }
        tally
    }

    /// Phase-1 tallies per noise kind, in `NoiseKind::ALL` order, skipping
    /// kinds that were not run.
    pub fn noise_tallies(&self) -> Vec<(NoiseKind, RecallTally)> {
        NoiseKind::ALL
            .iter()
            .filter_map(|&kind| {
                let mut tally = RecallTally::default();
                for outcome in self.outcomes.iter().filter(|o| o.noise == Some(kind)) {
                    tally.add(outcome);
                }
                (tally.probes > 0).then_some((kind, tally))
            })
            .collect()
    }

    /// Pretty JSON for `--report`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
