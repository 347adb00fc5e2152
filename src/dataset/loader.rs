//! Image folder → binary pattern set.
//!
//! Files are picked by extension (case-insensitive) and sorted by name so
//! pattern order is stable across runs. Each image is decoded, converted to
//! 8-bit luma and binarized; the whole set must share one shape.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::pattern::binarize::binarize;
use crate::pattern::layout::{common_shape, flatten};

/// A named, binarized image set with a common shape.
#[derive(Clone, Debug)]
pub struct PatternSet {
    /// File names, in load order.
    pub names: Vec<String>,

    /// Binary images (black = 1).
    pub images: Vec<Array2<f32>>,

    /// Shared `(height, width)`; `None` for an empty set.
    pub shape: Option<(usize, usize)>,
}

impl PatternSet {
    /// Build a set from already-binarized images, checking shapes.
    pub fn new(names: Vec<String>, images: Vec<Array2<f32>>) -> Result<Self> {
        let shape = common_shape(&images)?;
        Ok(Self {
            names,
            images,
            shape,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Flat pattern length (`height · width`).
    pub fn dim(&self) -> usize {
        self.shape.map(|(h, w)| h * w).unwrap_or(0)
    }

    /// Row-major flat patterns, ready for the memory.
    pub fn flat(&self) -> Vec<Array1<f32>> {
        self.images.iter().map(|img| flatten(img.view())).collect()
    }
}

/// List files in `dir` with the given extension, sorted by file name.
pub fn list_images(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read image directory '{}'", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read an entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            paths.push(path);
        } else {
            debug!("skipping {}", path.display());
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Decode one image as grayscale in [0, 255].
pub fn load_gray(path: &Path) -> Result<Array2<f32>> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode image '{}'", path.display()))?
        .to_luma8();
    let (w, h) = img.dimensions();
    Ok(Array2::from_shape_fn((h as usize, w as usize), |(r, c)| {
        img.get_pixel(c as u32, r as u32)[0] as f32
    }))
}

/// Load and binarize every matching image in `dir`.
pub fn load_pattern_set(dir: &Path, extension: &str, threshold: f32) -> Result<PatternSet> {
    let paths = list_images(dir, extension)?;
    if paths.is_empty() {
        warn!(
            "no .{} images found in '{}'",
            extension,
            dir.display()
        );
    }

    let mut names = Vec::with_capacity(paths.len());
    let mut images = Vec::with_capacity(paths.len());
    for path in &paths {
        let gray = load_gray(path)?;
        let binary = binarize(gray.view(), threshold)
            .with_context(|| format!("failed to binarize '{}'", path.display()))?;
        names.push(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        images.push(binary);
    }

    let set = PatternSet::new(names, images)
        .with_context(|| format!("patterns in '{}' have different sizes", dir.display()))?;
    debug!(
        count = set.len(),
        shape = ?set.shape,
        "loaded pattern set from {}",
        dir.display()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;
    use ndarray::array;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, dark: &[(u32, u32)]) {
        let img = GrayImage::from_fn(w, h, |x, y| {
            if dark.contains(&(x, y)) {
                image::Luma([0u8])
            } else {
                image::Luma([255u8])
            }
        });
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_list_images_sorted_and_filtered() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "b.png", 2, 2, &[]);
        write_png(tmp.path(), "a.PNG", 2, 2, &[]);
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let paths = list_images(tmp.path(), "png").unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn test_list_images_missing_dir() {
        let err = list_images(Path::new("/definitely/not/here"), "bmp").unwrap_err();
        assert!(err.to_string().contains("failed to read image directory"));
    }

    #[test]
    fn test_load_gray_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "wide.png", 3, 2, &[(2, 0)]);
        let gray = load_gray(&tmp.path().join("wide.png")).unwrap();
        assert_eq!(gray.dim(), (2, 3));
        assert_eq!(gray[[0, 2]], 0.0);
        assert_eq!(gray[[1, 0]], 255.0);
    }

    #[test]
    fn test_load_pattern_set_binarizes() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "one.png", 2, 2, &[(0, 0), (1, 1)]);
        write_png(tmp.path(), "two.png", 2, 2, &[(1, 0)]);

        let set = load_pattern_set(tmp.path(), "png", 0.5).unwrap();
        assert_eq!(set.names, vec!["one.png", "two.png"]);
        assert_eq!(set.shape, Some((2, 2)));
        assert_eq!(set.dim(), 4);
        assert_eq!(set.images[0], array![[1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(set.flat()[1], array![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_load_pattern_set_rejects_mixed_sizes() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(tmp.path(), "a.png", 2, 2, &[]);
        write_png(tmp.path(), "b.png", 3, 2, &[]);
        let err = load_pattern_set(tmp.path(), "png", 0.5).unwrap_err();
        assert!(err.to_string().contains("different sizes"));
    }

    #[test]
    fn test_empty_folder_gives_empty_set() {
        let tmp = tempfile::tempdir().unwrap();
        let set = load_pattern_set(tmp.path(), "bmp", 0.5).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.shape, None);
        assert_eq!(set.dim(), 0);
    }
}
