//! Presentation of probes and recalls.
//!
//! Nothing here touches the memory: every routine takes a probe and the two
//! recalled vectors plus an explicit `(height, width)` and draws them side by
//! side, either as text or as a PNG strip.

pub mod ascii;
pub mod panel;

use ndarray::ArrayView1;

use crate::pattern::noise::NoiseKind;

/// One probe and what both memories made of it.
#[derive(Clone, Debug)]
pub struct ProbeRecord<'a> {
    /// Pattern family, e.g. "digits".
    pub category: &'a str,

    /// Source file name of the probe.
    pub name: &'a str,

    /// 1 = corrupted training pattern, 2 = clean test pattern.
    pub phase: u8,

    /// Corruption applied, if any.
    pub noise: Option<(NoiseKind, f64)>,

    pub probe: ArrayView1<'a, f32>,
    pub recalled_max: ArrayView1<'a, f32>,
    pub recalled_min: ArrayView1<'a, f32>,

    /// Spatial layout of all three vectors.
    pub shape: (usize, usize),
}

impl ProbeRecord<'_> {
    /// Human-readable caption.
    pub fn title(&self) -> String {
        match self.noise {
            Some((kind, pct)) => format!("{} ({}, {}%)", self.name, kind, pct),
            None => format!("test probe {}", self.name),
        }
    }
}

/// Somewhere to send each probe as the session runs.
pub trait RecallSink {
    fn present(&mut self, record: &ProbeRecord<'_>) -> anyhow::Result<()>;
}

/// Discards everything.
pub struct NullSink;

impl RecallSink for NullSink {
    fn present(&mut self, _record: &ProbeRecord<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Fans one record out to several sinks.
#[derive(Default)]
pub struct SinkSet {
    sinks: Vec<Box<dyn RecallSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn RecallSink>) {
        self.sinks.push(sink);
    }
}

impl RecallSink for SinkSet {
    fn present(&mut self, record: &ProbeRecord<'_>) -> anyhow::Result<()> {
        for sink in &mut self.sinks {
            sink.present(record)?;
        }
        Ok(())
    }
}
