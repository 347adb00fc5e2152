//! morphmem — morphological associative memory recall experiments.
//!
//! Trains a max/min memory on a folder of images, then probes it with noisy
//! copies of the training set (phase 1) and with clean test images (phase 2).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use morphmem::config::PANEL_SCALE;
use morphmem::pattern::noise::NoiseKind;
use morphmem::render::ascii::TextSink;
use morphmem::render::panel::PngSink;
use morphmem::render::SinkSet;
use morphmem::runtime::{Session, SessionConfig};

/// Morphological memory recall CLI.
#[derive(Parser, Debug)]
#[command(
    name = "morphmem",
    about = "Train a morphological associative memory on images and test recall",
    version
)]
struct Cli {
    /// JSON session config; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder of training images.
    #[arg(long)]
    train_dir: Option<PathBuf>,

    /// Folder of clean test images.
    #[arg(long)]
    test_dir: Option<PathBuf>,

    /// Skip phase 2 even if a test folder is configured.
    #[arg(long, default_value_t = false)]
    no_test: bool,

    /// Image file extension.
    #[arg(long)]
    extension: Option<String>,

    /// Binarization threshold in [0, 1].
    #[arg(short, long)]
    threshold: Option<f32>,

    /// Noise kinds for phase 1 (additive, subtractive, mixed).
    #[arg(long, value_delimiter = ',')]
    noise: Vec<NoiseKind>,

    /// Noise percentages for phase 1.
    #[arg(short, long, value_delimiter = ',')]
    percentages: Vec<f64>,

    /// Seed for the noise generator.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write one PNG panel per probe into this folder.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Pixel scale for PNG panels.
    #[arg(long, default_value_t = PANEL_SCALE)]
    scale: u32,

    /// Do not print text panels.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Write the session report as JSON to this file.
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_json_file(path)?,
            None => SessionConfig::default(),
        };
        if let Some(dir) = &self.train_dir {
            config.train_dir = dir.clone();
        }
        if let Some(dir) = &self.test_dir {
            config.test_dir = Some(dir.clone());
        }
        if self.no_test {
            config.test_dir = None;
        }
        if let Some(ext) = &self.extension {
            config.extension = ext.clone();
        }
        if let Some(t) = self.threshold {
            config.binarize_threshold = t;
        }
        if !self.noise.is_empty() {
            config.noise_kinds = self.noise.clone();
        }
        if !self.percentages.is_empty() {
            config.percentages = self.percentages.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    // Initialise tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    tracing::info!("morphmem v{}", env!("CARGO_PKG_VERSION"));

    let config = cli.session_config()?;
    tracing::info!("Training folder: {}", config.train_dir.display());

    let mut sinks = SinkSet::new();
    if !cli.quiet {
        sinks.push(Box::new(TextSink::new(std::io::stdout())));
    }
    if let Some(dir) = &cli.out_dir {
        sinks.push(Box::new(PngSink::new(dir, cli.scale)?));
    }

    let mut session = Session::load(config)?;
    let report = session.run(&mut sinks)?;

    let (h, w) = session.shape();
    println!(
        "Memory: {} patterns, {}x{} = {} pixels",
        report.n_patterns, h, w, report.dim
    );
    let noisy = report.phase_tally(1);
    println!(
        "Phase 1: {} noisy probes, exact recall max {:.1}%  min {:.1}%",
        noisy.probes,
        noisy.max_rate() * 100.0,
        noisy.min_rate() * 100.0
    );
    for (kind, tally) in report.noise_tallies() {
        println!(
            "  {:<12} max {:>5.1}%  min {:>5.1}%",
            kind,
            tally.max_rate() * 100.0,
            tally.min_rate() * 100.0
        );
    }
    let clean = report.phase_tally(2);
    if clean.probes > 0 {
        println!(
            "Phase 2: {} test probes, matches nearest pattern: max {}  min {}",
            clean.probes, clean.max_exact, clean.min_exact
        );
    }

    if let Some(path) = &cli.report {
        let json = report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report '{}'", path.display()))?;
        tracing::info!("Report written to {}", path.display());
    }

    tracing::info!("Done.");
    Ok(())
}
