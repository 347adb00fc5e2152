//! Text rendering for terminals and logs.

use std::io::Write;

use anyhow::Context;
use ndarray::{Array2, ArrayView1};

use crate::pattern::error::PatternError;
use crate::pattern::layout::reshape;
use crate::render::{ProbeRecord, RecallSink};

/// Glyph for a one (black) pixel.
pub const INK: char = '#';
/// Glyph for a zero (white) pixel.
pub const PAPER: char = '.';

const GUTTER: &str = "   ";

/// Draw one binary image, one text line per row.
pub fn render_image(image: &Array2<f32>) -> Vec<String> {
    image
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&v| if v >= 0.5 { INK } else { PAPER })
                .collect()
        })
        .collect()
}

/// Draw probe, max recall and min recall side by side under a title line.
pub fn render_panel(
    title: &str,
    probe: ArrayView1<f32>,
    recalled_max: ArrayView1<f32>,
    recalled_min: ArrayView1<f32>,
    shape: (usize, usize),
) -> Result<String, PatternError> {
    let columns = [
        ("probe", render_image(&reshape(probe, shape)?)),
        ("max", render_image(&reshape(recalled_max, shape)?)),
        ("min", render_image(&reshape(recalled_min, shape)?)),
    ];
    let width = shape.1.max(5);

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    let header: Vec<String> = columns
        .iter()
        .map(|(label, _)| format!("{:<width$}", label, width = width))
        .collect();
    out.push_str(header.join(GUTTER).trim_end());
    out.push('\n');

    for r in 0..shape.0 {
        let line: Vec<String> = columns
            .iter()
            .map(|(_, lines)| format!("{:<width$}", lines[r], width = width))
            .collect();
        out.push_str(line.join(GUTTER).trim_end());
        out.push('\n');
    }
    Ok(out)
}

/// Writes a text panel per probe to any writer (usually stdout).
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecallSink for TextSink<W> {
    fn present(&mut self, record: &ProbeRecord<'_>) -> anyhow::Result<()> {
        let text = render_panel(
            &record.title(),
            record.probe,
            record.recalled_max,
            record.recalled_min,
            record.shape,
        )?;
        writeln!(self.out, "{}", text).context("failed to write text panel")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_render_image() {
        let img = array![[1.0, 0.0], [0.0, 1.0]];
        assert_eq!(render_image(&img), vec!["#.", ".#"]);
    }

    #[test]
    fn test_render_panel_layout() {
        let probe = array![1.0, 1.0, 0.0, 1.0];
        let max = array![1.0, 0.0, 0.0, 1.0];
        let min = array![1.0, 1.0, 1.0, 1.0];
        let text = render_panel("digit 0", probe.view(), max.view(), min.view(), (2, 2)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "digit 0");
        assert_eq!(lines[1], "probe   max     min");
        assert_eq!(lines[2], "##      #.      ##");
        assert_eq!(lines[3], ".#      .#      ##");
    }

    #[test]
    fn test_render_panel_rejects_bad_shape() {
        let v = array![1.0, 0.0, 1.0];
        assert!(render_panel("x", v.view(), v.view(), v.view(), (2, 2)).is_err());
    }

    #[test]
    fn test_text_sink_writes_panel() {
        let v = array![1.0, 0.0, 0.0, 1.0];
        let record = ProbeRecord {
            category: "digits",
            name: "a.bmp",
            phase: 2,
            noise: None,
            probe: v.view(),
            recalled_max: v.view(),
            recalled_min: v.view(),
            shape: (2, 2),
        };
        let mut sink = TextSink::new(Vec::new());
        sink.present(&record).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with("test probe a.bmp\n"));
        assert!(text.contains("#.      #.      #."));
    }
}
