use serde::Serialize;
use thiserror::Error;

/// Identifies which of the two compared algorithm variants a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variant {
    A,
    B,
}

/// Errors raised while computing summary statistics or a significance test.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatsError {
    /// Standard deviation and the t-test both need at least two samples.
    #[error("insufficient samples: at least 2 required, got {0}")]
    InsufficientSamples(usize),
    /// Both sides have zero variance, so the t statistic is undefined.
    #[error("t-test undefined: combined variance of both samples is zero")]
    UndefinedTest,
    /// The t-distribution could not be constructed for the computed degrees of freedom.
    #[error("invalid t-distribution: {0}")]
    Distribution(String),
}

/// Which significance measure accompanies the t statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestOutput {
    /// Report the Welch-Satterthwaite degrees of freedom truncated to an integer.
    #[default]
    DegreesOfFreedom,
    /// Report a two-tailed p-value from the t-distribution.
    PValue,
}

/// The result of a Welch's t-test between variant A and variant B.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// The t statistic, positive when variant A has the larger mean.
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom (not truncated).
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value, present only in [`TestOutput::PValue`] mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p_value: Option<f64>,
    /// Whether the p-value falls below `1 - confidence_level`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant: Option<bool>,
    /// The variant with the lower mean, when the difference is significant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Variant>,
}

impl TestResult {
    /// Degrees of freedom as the legacy report prints them: truncated toward zero.
    pub fn truncated_dof(&self) -> u64 {
        self.degrees_of_freedom.trunc() as u64
    }
}

/// Trait for two-sample tests comparing variant A against variant B.
pub trait StatisticalTest: Send + Sync {
    /// Compare two sample summaries.
    fn compare(&self, a: &SampleSummary, b: &SampleSummary) -> Result<TestResult, StatsError>;

    /// Which significance measure this test produces.
    fn output(&self) -> TestOutput;
}

mod summary;
mod ttest;

pub use summary::{mean, std_dev, SampleSummary};
pub use ttest::{welch_moments, WelchTTest};
