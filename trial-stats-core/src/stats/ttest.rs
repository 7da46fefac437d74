use statrs::distribution::{ContinuousCDF, StudentsT};

use super::{SampleSummary, StatisticalTest, StatsError, TestOutput, TestResult, Variant};

/// Compute Welch's t statistic and the Welch-Satterthwaite degrees of freedom
/// from the moments of two samples.
///
/// s1 = sd1^2/n1, s2 = sd2^2/n2
/// t  = (mu1 - mu2) / sqrt(s1 + s2)
/// df = (s1 + s2)^2 / (s1^2/(n1-1) + s2^2/(n2-1))
///
/// # Errors
/// Returns [`StatsError::InsufficientSamples`] if either side has fewer than two
/// samples, and [`StatsError::UndefinedTest`] if both variances are zero.
pub fn welch_moments(
    mu1: f64,
    mu2: f64,
    sd1: f64,
    sd2: f64,
    n1: usize,
    n2: usize,
) -> Result<(f64, f64), StatsError> {
    if n1 < 2 || n2 < 2 {
        return Err(StatsError::InsufficientSamples(n1.min(n2)));
    }

    let s1 = sd1 * sd1 / n1 as f64;
    let s2 = sd2 * sd2 / n2 as f64;
    let combined = s1 + s2;
    if combined == 0.0 {
        return Err(StatsError::UndefinedTest);
    }

    let t = (mu1 - mu2) / combined.sqrt();
    let df = combined * combined / (s1 * s1 / (n1 - 1) as f64 + s2 * s2 / (n2 - 1) as f64);
    Ok((t, df))
}

/// Welch's t-test for comparing two independent samples with potentially unequal variances.
#[derive(Debug, Clone)]
pub struct WelchTTest {
    /// Confidence level used to flag significant differences (default: 0.95).
    pub confidence_level: f64,
    /// Whether to report truncated degrees of freedom or a p-value.
    pub output: TestOutput,
}

impl Default for WelchTTest {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            output: TestOutput::DegreesOfFreedom,
        }
    }
}

impl WelchTTest {
    /// Create a new Welch's t-test.
    ///
    /// # Panics
    /// Panics if confidence_level is not in the range (0, 1).
    pub fn new(confidence_level: f64, output: TestOutput) -> Self {
        assert!(
            confidence_level > 0.0 && confidence_level < 1.0,
            "confidence_level must be between 0 and 1 (exclusive)"
        );
        Self {
            confidence_level,
            output,
        }
    }

    /// A test reporting two-tailed p-values at the default confidence level.
    pub fn with_p_value() -> Self {
        Self {
            output: TestOutput::PValue,
            ..Self::default()
        }
    }

    /// Two-tailed p-value: p = 2 * P(T > |t|) for T ~ t(df).
    fn two_tailed_p_value(t: f64, df: f64) -> Result<f64, StatsError> {
        let dist =
            StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution(e.to_string()))?;
        Ok((2.0 * dist.sf(t.abs())).min(1.0))
    }
}

impl StatisticalTest for WelchTTest {
    fn compare(&self, a: &SampleSummary, b: &SampleSummary) -> Result<TestResult, StatsError> {
        let (t_statistic, degrees_of_freedom) =
            welch_moments(a.mean, b.mean, a.std_dev, b.std_dev, a.count, b.count)?;

        let p_value = match self.output {
            TestOutput::DegreesOfFreedom => None,
            TestOutput::PValue => Some(Self::two_tailed_p_value(t_statistic, degrees_of_freedom)?),
        };

        let alpha = 1.0 - self.confidence_level;
        let significant = p_value.map(|p| p < alpha);

        // Lower cost and lower CPU time are both better.
        let winner = match significant {
            Some(true) if a.mean < b.mean => Some(Variant::A),
            Some(true) if b.mean < a.mean => Some(Variant::B),
            _ => None,
        };

        Ok(TestResult {
            t_statistic,
            degrees_of_freedom,
            p_value,
            significant,
            winner,
        })
    }

    fn output(&self) -> TestOutput {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mean: f64, std_dev: f64, count: usize) -> SampleSummary {
        SampleSummary {
            mean,
            std_dev,
            count,
        }
    }

    #[test]
    fn test_worked_example() {
        let (t, df) = welch_moments(10.0, 12.0, 2.0, 3.0, 30, 30).unwrap();
        assert!((t - -3.0382).abs() < 1e-3);
        assert!((df - 50.5258).abs() < 1e-3);
    }

    #[test]
    fn test_legacy_output_truncates_dof() {
        let test = WelchTTest::default();
        let result = test
            .compare(&summary(10.0, 2.0, 30), &summary(12.0, 3.0, 30))
            .unwrap();

        assert_eq!(result.truncated_dof(), 50);
        assert!(result.p_value.is_none());
        assert!(result.significant.is_none());
        assert!(result.winner.is_none());
    }

    #[test]
    fn test_swap_negates_t() {
        let test = WelchTTest::with_p_value();
        let a = summary(10.0, 2.0, 30);
        let b = summary(12.0, 3.0, 30);

        let ab = test.compare(&a, &b).unwrap();
        let ba = test.compare(&b, &a).unwrap();

        assert!((ab.t_statistic + ba.t_statistic).abs() < 1e-12);
        assert!((ab.degrees_of_freedom - ba.degrees_of_freedom).abs() < 1e-12);
        assert!((ab.p_value.unwrap() - ba.p_value.unwrap()).abs() < 1e-12);
    }

    #[test]
    fn test_p_value_known_critical_value() {
        // t = 2.228 is the 95% two-tailed critical value at 10 degrees of freedom.
        let p = WelchTTest::two_tailed_p_value(2.228, 10.0).unwrap();
        assert!((p - 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_clearly_different_samples() {
        let test = WelchTTest::with_p_value();
        let result = test
            .compare(&summary(10.0, 2.0, 30), &summary(12.0, 3.0, 30))
            .unwrap();

        let p = result.p_value.unwrap();
        assert!(p > 0.001 && p < 0.01);
        assert_eq!(result.significant, Some(true));
        assert_eq!(result.winner, Some(Variant::A));
    }

    #[test]
    fn test_overlapping_samples_not_significant() {
        let test = WelchTTest::with_p_value();
        let result = test
            .compare(&summary(100.0, 10.0, 5), &summary(101.0, 10.0, 5))
            .unwrap();

        assert!(result.p_value.unwrap() > 0.5);
        assert_eq!(result.significant, Some(false));
        assert!(result.winner.is_none());
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let test = WelchTTest::with_p_value();
        let result = test.compare(&summary(4.0, 0.0, 2), &summary(7.0, 0.0, 2));
        assert_eq!(result, Err(StatsError::UndefinedTest));
    }

    #[test]
    fn test_one_sided_zero_variance_is_defined() {
        let (t, df) = welch_moments(4.0, 7.0, 0.0, 1.0, 4, 4).unwrap();
        assert!((t - -6.0).abs() < 1e-12);
        assert!((df - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_samples() {
        assert_eq!(
            welch_moments(1.0, 2.0, 0.5, 0.5, 1, 5),
            Err(StatsError::InsufficientSamples(1))
        );
    }

    #[test]
    fn test_custom_confidence_level() {
        let test = WelchTTest::new(0.99, TestOutput::PValue);
        assert_eq!(test.confidence_level, 0.99);
        assert_eq!(test.output(), TestOutput::PValue);
    }

    #[test]
    #[should_panic(expected = "confidence_level must be between 0 and 1")]
    fn test_invalid_confidence_level() {
        WelchTTest::new(1.5, TestOutput::PValue);
    }
}
