//! Lattice (max-plus / min-plus) kernels behind the morphological memory.
//!
//! Nothing in here multiplies: training reduces pairwise coordinate
//! differences over the exemplar axis, and recall composes a weight matrix
//! with a probe using `min(a + b)` or `max(a + b)` where a linear memory
//! would use a dot product.
//!
//! Every kernel comes in two flavours with bit-identical output:
//! 1. `*_naive`: scalar loops, the reference used by tests
//! 2. `*_parallel`: rayon over matrix rows

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rayon::prelude::*;

// ──────────────────────────────────────────────────────────────
// 1. Training: upper / lower envelopes of coordinate differences
// ──────────────────────────────────────────────────────────────

/// Scalar envelope construction.
///
/// Returns `(W, M)` with `W[i,j] = max_μ (x[i] - x[j])` and
/// `M[i,j] = min_μ (x[i] - x[j])`. Every pattern must have length `n` and
/// the set must be non-empty; both are checked by the caller.
pub fn envelopes_naive(patterns: &[Array1<f32>], n: usize) -> (Array2<f32>, Array2<f32>) {
    debug_assert!(!patterns.is_empty());

    let mut w = Array2::from_elem((n, n), f32::NEG_INFINITY);
    let mut m = Array2::from_elem((n, n), f32::INFINITY);

    for x in patterns {
        for i in 0..n {
            let xi = x[i];
            for j in 0..n {
                let d = xi - x[j];
                if d > w[[i, j]] {
                    w[[i, j]] = d;
                }
                if d < m[[i, j]] {
                    m[[i, j]] = d;
                }
            }
        }
    }

    (w, m)
}

/// Row-parallel envelope construction. Each worker owns one output row of
/// both matrices and sweeps the whole pattern set for it.
pub fn envelopes_parallel(patterns: &[Array1<f32>], n: usize) -> (Array2<f32>, Array2<f32>) {
    debug_assert!(!patterns.is_empty());

    let rows: Vec<(Vec<f32>, Vec<f32>)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut w_row = vec![f32::NEG_INFINITY; n];
            let mut m_row = vec![f32::INFINITY; n];
            for x in patterns {
                let xi = x[i];
                for (j, &xj) in x.iter().enumerate() {
                    let d = xi - xj;
                    if d > w_row[j] {
                        w_row[j] = d;
                    }
                    if d < m_row[j] {
                        m_row[j] = d;
                    }
                }
            }
            (w_row, m_row)
        })
        .collect();

    let mut w = Array2::zeros((n, n));
    let mut m = Array2::zeros((n, n));
    for (i, (w_row, m_row)) in rows.iter().enumerate() {
        w.row_mut(i).assign(&ArrayView1::from(w_row.as_slice()));
        m.row_mut(i).assign(&ArrayView1::from(m_row.as_slice()));
    }
    (w, m)
}

// ──────────────────────────────────────────────────────────────
// 2. Recall: min-plus (erosion) and max-plus (dilation) products
// ──────────────────────────────────────────────────────────────

/// `y[i] = min_j (w[i,j] + x[j])`.
pub fn erode_naive(w: ArrayView2<f32>, x: ArrayView1<f32>) -> Array1<f32> {
    assert_eq!(w.ncols(), x.len());

    let mut y = Array1::zeros(w.nrows());
    for (i, row) in w.rows().into_iter().enumerate() {
        let mut acc = f32::INFINITY;
        for (&a, &b) in row.iter().zip(x.iter()) {
            acc = acc.min(a + b);
        }
        y[i] = acc;
    }
    y
}

/// `y[i] = max_j (m[i,j] + x[j])`.
pub fn dilate_naive(m: ArrayView2<f32>, x: ArrayView1<f32>) -> Array1<f32> {
    assert_eq!(m.ncols(), x.len());

    let mut y = Array1::zeros(m.nrows());
    for (i, row) in m.rows().into_iter().enumerate() {
        let mut acc = f32::NEG_INFINITY;
        for (&a, &b) in row.iter().zip(x.iter()) {
            acc = acc.max(a + b);
        }
        y[i] = acc;
    }
    y
}

/// Parallel min-plus product, one row per task.
pub fn erode_parallel(w: ArrayView2<f32>, x: ArrayView1<f32>) -> Array1<f32> {
    assert_eq!(w.ncols(), x.len());

    let out: Vec<f32> = (0..w.nrows())
        .into_par_iter()
        .map(|i| {
            w.row(i)
                .iter()
                .zip(x.iter())
                .fold(f32::INFINITY, |acc, (&a, &b)| acc.min(a + b))
        })
        .collect();
    Array1::from_vec(out)
}

/// Parallel max-plus product, one row per task.
pub fn dilate_parallel(m: ArrayView2<f32>, x: ArrayView1<f32>) -> Array1<f32> {
    assert_eq!(m.ncols(), x.len());

    let out: Vec<f32> = (0..m.nrows())
        .into_par_iter()
        .map(|i| {
            m.row(i)
                .iter()
                .zip(x.iter())
                .fold(f32::NEG_INFINITY, |acc, (&a, &b)| acc.max(a + b))
        })
        .collect();
    Array1::from_vec(out)
}

// ──────────────────────────────────────────────────────────────
// 3. Thresholding
// ──────────────────────────────────────────────────────────────

/// Binarize a projection: 1 where `y >= cutoff`, else 0. Inclusive, so a
/// projection landing exactly on the cutoff is a one.
pub fn threshold(y: &Array1<f32>, cutoff: f32) -> Array1<f32> {
    y.mapv(|v| if v >= cutoff { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn pair() -> Vec<Array1<f32>> {
        vec![array![1.0, 0.0, 0.0, 1.0], array![0.0, 1.0, 1.0, 0.0]]
    }

    #[test]
    fn test_envelopes_known_values() {
        let (w, m) = envelopes_naive(&pair(), 4);
        assert_eq!(w[[0, 1]], 1.0);
        assert_eq!(m[[0, 1]], -1.0);
        assert_eq!(
            w,
            array![
                [0.0, 1.0, 1.0, 0.0],
                [1.0, 0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0, 1.0],
                [0.0, 1.0, 1.0, 0.0],
            ]
        );
        assert_eq!(
            m,
            array![
                [0.0, -1.0, -1.0, 0.0],
                [-1.0, 0.0, 0.0, -1.0],
                [-1.0, 0.0, 0.0, -1.0],
                [0.0, -1.0, -1.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_envelope_diagonal_is_zero() {
        let patterns = vec![array![1.0, 1.0, 0.0], array![0.0, 1.0, 1.0], array![1.0, 0.0, 1.0]];
        let (w, m) = envelopes_naive(&patterns, 3);
        for i in 0..3 {
            assert_eq!(w[[i, i]], 0.0);
            assert_eq!(m[[i, i]], 0.0);
        }
    }

    #[test]
    fn test_envelopes_are_antisymmetric_duals() {
        // max(x_i - x_j) = -min(x_j - x_i)
        let patterns = vec![array![1.0, 0.0, 1.0, 1.0, 0.0], array![0.0, 0.0, 1.0, 0.0, 1.0]];
        let (w, m) = envelopes_naive(&patterns, 5);
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(w[[i, j]], -m[[j, i]]);
            }
        }
    }

    #[test]
    fn test_single_pattern_envelopes_coincide() {
        let patterns = vec![array![1.0, 0.0, 1.0]];
        let (w, m) = envelopes_naive(&patterns, 3);
        assert_eq!(w, m);
    }

    #[test]
    fn test_parallel_envelopes_match_naive() {
        let patterns: Vec<Array1<f32>> = (0..5)
            .map(|k| Array1::from_iter((0..37).map(|i| ((i * 7 + k * 3) % 5 < 2) as u8 as f32)))
            .collect();
        let (w_a, m_a) = envelopes_naive(&patterns, 37);
        let (w_b, m_b) = envelopes_parallel(&patterns, 37);
        assert_eq!(w_a, w_b);
        assert_eq!(m_a, m_b);
    }

    #[test]
    fn test_erode_and_dilate_known_values() {
        let w = array![[0.0, 1.0], [-1.0, 0.0]];
        let x = array![0.0, 1.0];
        // row 0: min(0+0, 1+1) = 0; row 1: min(-1+0, 0+1) = -1
        assert_eq!(erode_naive(w.view(), x.view()), array![0.0, -1.0]);
        // row 0: max(0, 2) = 2; row 1: max(-1, 1) = 1
        assert_eq!(dilate_naive(w.view(), x.view()), array![2.0, 1.0]);
    }

    #[test]
    fn test_parallel_products_match_naive() {
        let n = 29;
        let w = Array2::from_shape_fn((n, n), |(i, j)| ((i + 2 * j) % 3) as f32 - 1.0);
        let x = Array1::from_iter((0..n).map(|i| (i % 2) as f32));
        assert_eq!(erode_naive(w.view(), x.view()), erode_parallel(w.view(), x.view()));
        assert_eq!(dilate_naive(w.view(), x.view()), dilate_parallel(w.view(), x.view()));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let y = array![0.49, 0.5, 0.51, -1.0, 2.0];
        assert_eq!(threshold(&y, 0.5), array![0.0, 1.0, 1.0, 0.0, 1.0]);
    }
}
