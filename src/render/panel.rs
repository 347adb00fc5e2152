//! PNG strips: probe | max recall | min recall.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use ndarray::ArrayView1;

use crate::pattern::layout::reshape;
use crate::pattern::noise::NoiseKind;
use crate::render::{ProbeRecord, RecallSink};

/// Pixels between adjacent panels.
const GAP: u32 = 4;

/// Build the three-panel strip. Ones are drawn black, each cell as a
/// `scale × scale` block.
pub fn compose_panel(
    probe: ArrayView1<f32>,
    recalled_max: ArrayView1<f32>,
    recalled_min: ArrayView1<f32>,
    shape: (usize, usize),
    scale: u32,
) -> Result<GrayImage> {
    let scale = scale.max(1);
    let (h, w) = shape;
    let tiles = [
        reshape(probe, shape)?,
        reshape(recalled_max, shape)?,
        reshape(recalled_min, shape)?,
    ];

    let tile_w = w as u32 * scale;
    let tile_h = h as u32 * scale;
    let mut canvas = GrayImage::from_pixel(3 * tile_w + 2 * GAP, tile_h, Luma([255u8]));

    for (t, tile) in tiles.iter().enumerate() {
        let x0 = t as u32 * (tile_w + GAP);
        for ((r, c), &v) in tile.indexed_iter() {
            if v < 0.5 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    canvas.put_pixel(
                        x0 + c as u32 * scale + dx,
                        r as u32 * scale + dy,
                        Luma([0u8]),
                    );
                }
            }
        }
    }
    Ok(canvas)
}

/// Compose and write a strip to `path`.
pub fn save_panel(
    path: &Path,
    probe: ArrayView1<f32>,
    recalled_max: ArrayView1<f32>,
    recalled_min: ArrayView1<f32>,
    shape: (usize, usize),
    scale: u32,
) -> Result<()> {
    let canvas = compose_panel(probe, recalled_max, recalled_min, shape, scale)?;
    canvas
        .save(path)
        .with_context(|| format!("failed to write panel '{}'", path.display()))
}

/// File name for a panel.
///
/// `recall_{category}_{name}_{noise}_{pct}_phase{phase}.png` for noisy
/// probes, `recall_{category}_{name}_phase{phase}.png` for clean ones.
/// `name` is used without its extension.
pub fn panel_file_name(
    category: &str,
    name: &str,
    noise: Option<(NoiseKind, f64)>,
    phase: u8,
) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    match noise {
        Some((kind, pct)) => format!(
            "recall_{}_{}_{}_{}_phase{}.png",
            category, stem, kind, pct, phase
        ),
        None => format!("recall_{}_{}_phase{}.png", category, stem, phase),
    }
}

/// Saves one PNG strip per probe into a directory.
pub struct PngSink {
    dir: PathBuf,
    scale: u32,
    written: usize,
}

impl PngSink {
    /// Create the sink, making `dir` if needed.
    pub fn new(dir: &Path, scale: u32) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            scale,
            written: 0,
        })
    }

    /// Number of files written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl RecallSink for PngSink {
    fn present(&mut self, record: &ProbeRecord<'_>) -> Result<()> {
        let file = panel_file_name(record.category, record.name, record.noise, record.phase);
        save_panel(
            &self.dir.join(file),
            record.probe,
            record.recalled_max,
            record.recalled_min,
            record.shape,
            self.scale,
        )?;
        self.written += 1;
        Ok(())
    }
}
