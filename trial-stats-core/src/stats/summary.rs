use serde::Serialize;

use super::StatsError;

/// Arithmetic mean of the samples, `0.0` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation with Bessel's correction (n-1 denominator).
///
/// Deviations are taken on data shifted by the first sample, so a constant
/// sample has a standard deviation of exactly zero.
pub fn std_dev(samples: &[f64]) -> Result<f64, StatsError> {
    let n = samples.len();
    if n < 2 {
        return Err(StatsError::InsufficientSamples(n));
    }
    let shift = samples[0];
    let shifted_mean = samples.iter().map(|x| x - shift).sum::<f64>() / n as f64;
    let sum_sq_diff: f64 = samples
        .iter()
        .map(|x| {
            let diff = (x - shift) - shifted_mean;
            diff * diff
        })
        .sum();
    Ok((sum_sq_diff / (n - 1) as f64).sqrt())
}

/// Mean, standard deviation and count of one measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl SampleSummary {
    /// Summarize a sample vector. Requires at least two samples.
    pub fn from_samples(samples: &[f64]) -> Result<Self, StatsError> {
        Ok(Self {
            mean: mean(samples),
            std_dev: std_dev(samples)?,
            count: samples.len(),
        })
    }
}
