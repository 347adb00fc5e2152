//! Grayscale → binary conversion.
//!
//! Dark pixels become ones. Images with values above 1 are assumed to be
//! 8-bit and are rescaled by 1/255 first, so a threshold of 0.5 splits at 127.5.

use ndarray::{Array2, ArrayView2};

use crate::config::GRAY_MAX;
use crate::pattern::error::PatternError;

/// Binarize a grayscale image: `1` where the normalized value is
/// `<= threshold`, `0` elsewhere.
pub fn binarize(gray: ArrayView2<f32>, threshold: f32) -> Result<Array2<f32>, PatternError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(PatternError::InvalidThreshold(threshold));
    }

    let peak = gray.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let scale = if peak > 1.0 { GRAY_MAX } else { 1.0 };

    Ok(gray.mapv(|v| if v / scale <= threshold { 1.0 } else { 0.0 }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_binarize_8bit_image() {
        let gray = array![[0.0, 255.0], [127.0, 128.0]];
        let out = binarize(gray.view(), 0.5).unwrap();
        assert_eq!(out, array![[1.0, 0.0], [1.0, 0.0]]);
    }

    #[test]
    fn test_binarize_normalized_image() {
        let gray = array![[0.2, 0.5], [0.51, 1.0]];
        let out = binarize(gray.view(), 0.5).unwrap();
        assert_eq!(out, array![[1.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_binarize_threshold_extremes() {
        let gray = array![[0.0, 64.0, 255.0]];
        assert_eq!(binarize(gray.view(), 1.0).unwrap(), array![[1.0, 1.0, 1.0]]);
        assert_eq!(binarize(gray.view(), 0.0).unwrap(), array![[1.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_binarize_rejects_bad_threshold() {
        let gray = array![[0.0]];
        assert_eq!(
            binarize(gray.view(), 1.5),
            Err(PatternError::InvalidThreshold(1.5))
        );
        assert!(binarize(gray.view(), f32::NAN).is_err());
    }
}
