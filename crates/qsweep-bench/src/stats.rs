//! Summary statistics over the successful samples of one sweep cell.

use serde::{Deserialize, Serialize};

/// Distribution of trial times, in seconds.
///
/// The standard deviation is the population form (divides by `n`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialStatistics {
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub first_quartile: f64,
    pub median: f64,
    pub third_quartile: f64,
    pub max: f64,
}

impl TrialStatistics {
    /// Returns `None` for an empty slice. Non-finite samples are ignored.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = samples.iter().copied().filter(|s| s.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;

        Some(Self {
            samples: sorted.len(),
            mean,
            std_dev: variance.sqrt(),
            min: sorted[0],
            first_quartile: quantile(&sorted, 1, 4),
            median: quantile(&sorted, 1, 2),
            third_quartile: quantile(&sorted, 3, 4),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// The `num/den` quantile of a sorted, non-empty slice. Averages the two
/// middle neighbours when the split falls between elements.
fn quantile(sorted: &[f64], num: usize, den: usize) -> f64 {
    let scaled = sorted.len() * num;
    let pos = scaled / den;
    if scaled % den == 0 && pos > 0 {
        (sorted[pos - 1] + sorted[pos]) / 2.0
    } else {
        sorted[pos.min(sorted.len() - 1)]
    }
}
