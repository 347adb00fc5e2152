//! Flat ↔ 2-D conversion.
//!
//! The memory only sees flat vectors. Images are flattened row-major on the
//! way in and recalls are reshaped with an explicit `(height, width)` on the
//! way out.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::pattern::error::PatternError;

/// Row-major flatten.
pub fn flatten(image: ArrayView2<f32>) -> Array1<f32> {
    image.iter().copied().collect()
}

/// Reshape a flat pattern to `(height, width)`.
pub fn reshape(pattern: ArrayView1<f32>, shape: (usize, usize)) -> Result<Array2<f32>, PatternError> {
    let (h, w) = shape;
    if h * w != pattern.len() {
        return Err(PatternError::LayoutMismatch {
            expected: shape,
            actual: pattern.len(),
        });
    }
    Array2::from_shape_vec(shape, pattern.to_vec()).map_err(|_| PatternError::LayoutMismatch {
        expected: shape,
        actual: pattern.len(),
    })
}

/// Check that every image in a set has the shape of the first one and
/// return that shape. An empty set has no shape.
pub fn common_shape(images: &[Array2<f32>]) -> Result<Option<(usize, usize)>, PatternError> {
    let Some(first) = images.first() else {
        return Ok(None);
    };
    let expected = first.dim();
    for (index, image) in images.iter().enumerate().skip(1) {
        if image.dim() != expected {
            return Err(PatternError::InconsistentShapes {
                expected,
                actual: image.dim(),
                index,
            });
        }
    }
    Ok(Some(expected))
}
