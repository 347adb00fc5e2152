//! Synthetic corruption of binary patterns for recall experiments.
//!
//! A percentage of positions (rounded down) is picked without replacement:
//! - **Additive**: each picked position receives a fresh random bit
//! - **Subtractive**: picked positions are cleared
//! - **Mixed**: the first half of the picks get random bits, the rest are
//!   cleared

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, ArrayView1};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pattern::error::PatternError;

/// Corruption model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    Additive,
    Subtractive,
    Mixed,
}

impl NoiseKind {
    /// All kinds, in experiment order.
    pub const ALL: [NoiseKind; 3] = [NoiseKind::Additive, NoiseKind::Subtractive, NoiseKind::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseKind::Additive => "additive",
            NoiseKind::Subtractive => "subtractive",
            NoiseKind::Mixed => "mixed",
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NoiseKind {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "additive" => Ok(NoiseKind::Additive),
            "subtractive" => Ok(NoiseKind::Subtractive),
            "mixed" => Ok(NoiseKind::Mixed),
            other => Err(PatternError::UnknownNoiseKind(other.to_string())),
        }
    }
}

/// Number of positions touched for a given percentage.
pub fn changed_count(n: usize, percentage: f64) -> usize {
    (n as f64 * percentage / 100.0).floor() as usize
}

/// Return a corrupted copy of `pattern`.
pub fn add_noise<R: Rng + ?Sized>(
    pattern: ArrayView1<f32>,
    percentage: f64,
    kind: NoiseKind,
    rng: &mut R,
) -> Result<Array1<f32>, PatternError> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err(PatternError::InvalidPercentage(percentage));
    }

    let mut noisy = pattern.to_owned();
    let n = noisy.len();
    let n_change = changed_count(n, percentage);
    let picks = index::sample(rng, n, n_change).into_vec();

    let random_until = match kind {
        NoiseKind::Additive => n_change,
        NoiseKind::Subtractive => 0,
        NoiseKind::Mixed => n_change / 2,
    };

    for (k, &i) in picks.iter().enumerate() {
        noisy[i] = if k < random_until {
            if rng.gen::<bool>() {
                1.0
            } else {
                0.0
            }
        } else {
            0.0
        };
    }

    Ok(noisy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn checkerboard(n: usize) -> Array1<f32> {
        Array1::from_iter((0..n).map(|i| (i % 2) as f32))
    }

    fn diff_count(a: &Array1<f32>, b: &Array1<f32>) -> usize {
        a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
    }

    #[test]
    fn test_parse_and_display() {
        for kind in NoiseKind::ALL {
            assert_eq!(kind.to_string().parse::<NoiseKind>().unwrap(), kind);
        }
        assert_eq!("  Mixed ".parse::<NoiseKind>().unwrap(), NoiseKind::Mixed);
        assert!(matches!(
            "salt".parse::<NoiseKind>(),
            Err(PatternError::UnknownNoiseKind(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&NoiseKind::Subtractive).unwrap();
        assert_eq!(json, "\"subtractive\"");
        let back: NoiseKind = serde_json::from_str("\"additive\"").unwrap();
        assert_eq!(back, NoiseKind::Additive);
    }

    #[test]
    fn test_changed_count_floors() {
        assert_eq!(changed_count(100, 25.0), 25);
        assert_eq!(changed_count(10, 25.0), 2);
        assert_eq!(changed_count(10, 1.0), 0);
        assert_eq!(changed_count(7, 100.0), 7);
    }

    #[test]
    fn test_zero_percent_is_identity() {
        let mut rng = StdRng::seed_from_u64(0);
        let x = checkerboard(20);
        for kind in NoiseKind::ALL {
            assert_eq!(add_noise(x.view(), 0.0, kind, &mut rng).unwrap(), x);
        }
    }

    #[test]
    fn test_subtractive_only_clears() {
        let mut rng = StdRng::seed_from_u64(7);
        let x = Array1::<f32>::ones(40);
        let noisy = add_noise(x.view(), 25.0, NoiseKind::Subtractive, &mut rng).unwrap();
        assert_eq!(noisy.iter().filter(|&&v| v == 0.0).count(), 10);
    }

    #[test]
    fn test_subtractive_full_clears_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let x = checkerboard(16);
        let noisy = add_noise(x.view(), 100.0, NoiseKind::Subtractive, &mut rng).unwrap();
        assert_eq!(noisy, Array1::<f32>::zeros(16));
    }

    #[test]
    fn test_additive_writes_random_bits() {
        let mut rng = StdRng::seed_from_u64(11);
        let x = Array1::<f32>::ones(50);
        let noisy = add_noise(x.view(), 90.0, NoiseKind::Additive, &mut rng).unwrap();
        assert!(diff_count(&x, &noisy) <= changed_count(50, 90.0));
        assert!(noisy.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_noise_touches_at_most_n_change() {
        let mut rng = StdRng::seed_from_u64(3);
        let x = checkerboard(64);
        for kind in NoiseKind::ALL {
            let noisy = add_noise(x.view(), 50.0, kind, &mut rng).unwrap();
            assert!(diff_count(&x, &noisy) <= 32);
        }
    }

    #[test]
    fn test_mixed_clears_second_half() {
        let mut rng = StdRng::seed_from_u64(5);
        let x = Array1::<f32>::ones(100);
        let noisy = add_noise(x.view(), 50.0, NoiseKind::Mixed, &mut rng).unwrap();
        // 50 picks: 25 forced to zero, 25 random bits.
        let zeros = noisy.iter().filter(|&&v| v == 0.0).count();
        assert!((25..=50).contains(&zeros), "zeros = {}", zeros);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let x = checkerboard(30);
        let a = add_noise(x.view(), 50.0, NoiseKind::Mixed, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = add_noise(x.view(), 50.0, NoiseKind::Mixed, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_percentage() {
        let mut rng = StdRng::seed_from_u64(0);
        let x = checkerboard(4);
        assert_eq!(
            add_noise(x.view(), 120.0, NoiseKind::Additive, &mut rng),
            Err(PatternError::InvalidPercentage(120.0))
        );
        assert!(add_noise(x.view(), -1.0, NoiseKind::Additive, &mut rng).is_err());
    }
}
