//! Per-group sample sets and the analysis that turns them into summary rows.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::stats::{SampleSummary, StatisticalTest, StatsError, TestResult};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Key identifying a group of trials.
///
/// Keys order numerically by run length, then by replication count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    /// Trials grouped by run length alone.
    Length(u64),
    /// Trials grouped by run length and number of restarts.
    Replicated { length: u64, replications: u64 },
}

impl GroupKey {
    pub fn length(&self) -> u64 {
        match *self {
            GroupKey::Length(length) | GroupKey::Replicated { length, .. } => length,
        }
    }

    pub fn replications(&self) -> Option<u64> {
        match *self {
            GroupKey::Length(_) => None,
            GroupKey::Replicated { replications, .. } => Some(replications),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Length(length) => write!(f, "L={}", length),
            GroupKey::Replicated {
                length,
                replications,
            } => write!(f, "L={} R={}", length, replications),
        }
    }
}

/// One trial's measurements for both variants. CPU times are in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurements {
    Costed {
        cost_a: f64,
        cost_b: f64,
        time_a_ns: u64,
        time_b_ns: u64,
    },
    Timed {
        time_a_ns: u64,
        time_b_ns: u64,
    },
}

/// A measurement did not match the quantities a sample set tracks.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("measurement does not match sample set (tracks cost: {tracks_cost})")]
pub struct ShapeMismatch {
    pub tracks_cost: bool,
}

/// Accumulated samples for one group.
///
/// Every push appends to all tracked quantities, so all vectors always have
/// the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    costs: Option<(Vec<f64>, Vec<f64>)>,
    time_a: Vec<f64>,
    time_b: Vec<f64>,
}

impl SampleSet {
    /// An empty set tracking cost and time for both variants.
    pub fn with_costs() -> Self {
        Self {
            costs: Some((Vec::new(), Vec::new())),
            time_a: Vec::new(),
            time_b: Vec::new(),
        }
    }

    /// An empty set tracking only CPU time for both variants.
    pub fn time_only() -> Self {
        Self {
            costs: None,
            time_a: Vec::new(),
            time_b: Vec::new(),
        }
    }

    /// Append one trial. Times are converted from nanoseconds to seconds.
    pub fn push(&mut self, measurements: Measurements) -> Result<(), ShapeMismatch> {
        let tracks_cost = self.costs.is_some();
        let (time_a_ns, time_b_ns) = match (measurements, self.costs.as_mut()) {
            (
                Measurements::Costed {
                    cost_a,
                    cost_b,
                    time_a_ns,
                    time_b_ns,
                },
                Some((costs_a, costs_b)),
            ) => {
                costs_a.push(cost_a);
                costs_b.push(cost_b);
                (time_a_ns, time_b_ns)
            }
            (
                Measurements::Timed {
                    time_a_ns,
                    time_b_ns,
                },
                None,
            ) => (time_a_ns, time_b_ns),
            _ => return Err(ShapeMismatch { tracks_cost }),
        };
        self.time_a.push(time_a_ns as f64 / NANOS_PER_SECOND);
        self.time_b.push(time_b_ns as f64 / NANOS_PER_SECOND);
        Ok(())
    }

    /// Number of trials accumulated.
    pub fn len(&self) -> usize {
        self.time_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_a.is_empty()
    }

    pub fn costs(&self) -> Option<(&[f64], &[f64])> {
        self.costs.as_ref().map(|(a, b)| (a.as_slice(), b.as_slice()))
    }

    /// CPU times in seconds for variants A and B.
    pub fn times(&self) -> (&[f64], &[f64]) {
        (&self.time_a, &self.time_b)
    }
}

/// The measured quantity a comparison is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Cost,
    Time,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Cost => write!(f, "cost"),
            Quantity::Time => write!(f, "time"),
        }
    }
}

/// Analysis of one group failed.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("group {key}: {quantity} statistics failed")]
pub struct GroupError {
    pub key: GroupKey,
    pub quantity: Quantity,
    #[source]
    pub source: StatsError,
}

/// Summary statistics of both variants for one quantity, and the test between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub a: SampleSummary,
    pub b: SampleSummary,
    pub test: TestResult,
}

impl Comparison {
    pub fn compute(
        a: &[f64],
        b: &[f64],
        test: &dyn StatisticalTest,
    ) -> Result<Self, StatsError> {
        let a = SampleSummary::from_samples(a)?;
        let b = SampleSummary::from_samples(b)?;
        let test = test.compare(&a, &b)?;
        Ok(Self { a, b, test })
    }
}

/// One report row: everything computed for a single group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: GroupKey,
    pub trials: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Comparison>,
    pub time: Comparison,
}

/// Compute means, standard deviations and Welch's t-tests for one group.
pub fn analyze_group(
    key: GroupKey,
    samples: &SampleSet,
    test: &dyn StatisticalTest,
) -> Result<GroupSummary, GroupError> {
    let cost = samples
        .costs()
        .map(|(a, b)| Comparison::compute(a, b, test))
        .transpose()
        .map_err(|source| GroupError {
            key,
            quantity: Quantity::Cost,
            source,
        })?;

    let (time_a, time_b) = samples.times();
    let time = Comparison::compute(time_a, time_b, test).map_err(|source| GroupError {
        key,
        quantity: Quantity::Time,
        source,
    })?;

    tracing::debug!(group = %key, trials = samples.len(), "analyzed group");

    Ok(GroupSummary {
        key,
        trials: samples.len(),
        cost,
        time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{StatsError, WelchTTest};

    fn costed(cost_a: f64, cost_b: f64, time_a_ns: u64, time_b_ns: u64) -> Measurements {
        Measurements::Costed {
            cost_a,
            cost_b,
            time_a_ns,
            time_b_ns,
        }
    }

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![
            GroupKey::Replicated {
                length: 16000,
                replications: 1,
            },
            GroupKey::Replicated {
                length: 2000,
                replications: 8,
            },
            GroupKey::Replicated {
                length: 2000,
                replications: 2,
            },
        ];
        keys.sort();
        assert_eq!(keys[0].replications(), Some(2));
        assert_eq!(keys[1].replications(), Some(8));
        assert_eq!(keys[2].length(), 16000);

        assert!(GroupKey::Length(9) < GroupKey::Length(10));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(GroupKey::Length(256).to_string(), "L=256");
        let key = GroupKey::Replicated {
            length: 2000,
            replications: 4,
        };
        assert_eq!(key.to_string(), "L=2000 R=4");
    }

    #[test]
    fn test_push_converts_nanoseconds() {
        let mut set = SampleSet::with_costs();
        set.push(costed(3.0, 4.0, 1_500_000_000, 250_000_000)).unwrap();

        let (a, b) = set.times();
        assert_eq!(a, &[1.5]);
        assert_eq!(b, &[0.25]);
        assert_eq!(set.costs(), Some((&[3.0][..], &[4.0][..])));
    }

    #[test]
    fn test_push_shape_mismatch() {
        let mut set = SampleSet::time_only();
        let err = set.push(costed(1.0, 1.0, 1, 1)).unwrap_err();
        assert!(!err.tracks_cost);
        assert!(set.is_empty());

        let mut set = SampleSet::with_costs();
        let timed = Measurements::Timed {
            time_a_ns: 1,
            time_b_ns: 2,
        };
        assert!(set.push(timed).is_err());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_analyze_group() {
        let mut set = SampleSet::with_costs();
        set.push(costed(10.0, 20.0, 1_000_000_000, 2_000_000_000)).unwrap();
        set.push(costed(12.0, 22.0, 3_000_000_000, 2_500_000_000)).unwrap();
        set.push(costed(14.0, 27.0, 2_000_000_000, 3_000_000_000)).unwrap();

        let summary = analyze_group(GroupKey::Length(64), &set, &WelchTTest::default()).unwrap();

        assert_eq!(summary.trials, 3);
        let cost = summary.cost.unwrap();
        assert_eq!(cost.a.mean, 12.0);
        assert_eq!(cost.a.std_dev, 2.0);
        assert_eq!(cost.b.mean, 23.0);
        assert!(cost.test.t_statistic < 0.0);
        assert_eq!(summary.time.a.mean, 2.0);
        assert_eq!(summary.time.b.mean, 2.5);
    }

    #[test]
    fn test_analyze_time_only_group() {
        let mut set = SampleSet::time_only();
        for (a, b) in [(100, 50), (110, 55), (90, 45)] {
            set.push(Measurements::Timed {
                time_a_ns: a,
                time_b_ns: b,
            })
            .unwrap();
        }
        let key = GroupKey::Replicated {
            length: 2000,
            replications: 1,
        };

        let summary = analyze_group(key, &set, &WelchTTest::with_p_value()).unwrap();

        assert!(summary.cost.is_none());
        assert!(summary.time.test.t_statistic > 0.0);
        assert!(summary.time.test.p_value.is_some());
    }

    #[test]
    fn test_identical_pairs_are_undefined() {
        let mut set = SampleSet::with_costs();
        set.push(costed(5.0, 9.0, 100, 200)).unwrap();
        set.push(costed(5.0, 9.0, 100, 200)).unwrap();

        let err = analyze_group(GroupKey::Length(8), &set, &WelchTTest::default()).unwrap_err();

        assert_eq!(err.key, GroupKey::Length(8));
        assert_eq!(err.quantity, Quantity::Cost);
        assert_eq!(err.source, StatsError::UndefinedTest);
    }

    #[test]
    fn test_constant_float_costs_are_undefined() {
        let mut set = SampleSet::with_costs();
        for time_a_ns in [100, 120, 140] {
            set.push(costed(0.1, 0.2, time_a_ns, 300)).unwrap();
        }

        let err = analyze_group(GroupKey::Length(10), &set, &WelchTTest::default()).unwrap_err();

        assert_eq!(err.quantity, Quantity::Cost);
        assert_eq!(err.source, StatsError::UndefinedTest);
    }

    #[test]
    fn test_constant_times_are_undefined() {
        let mut set = SampleSet::time_only();
        for _ in 0..3 {
            set.push(Measurements::Timed {
                time_a_ns: 100_000_000,
                time_b_ns: 300_000_000,
            })
            .unwrap();
        }
        let key = GroupKey::Replicated {
            length: 10,
            replications: 1,
        };

        let err = analyze_group(key, &set, &WelchTTest::with_p_value()).unwrap_err();

        assert_eq!(err.quantity, Quantity::Time);
        assert_eq!(err.source, StatsError::UndefinedTest);
    }

    #[test]
    fn test_single_trial_is_insufficient() {
        let mut set = SampleSet::with_costs();
        set.push(costed(5.0, 9.0, 100, 200)).unwrap();

        let err = analyze_group(GroupKey::Length(8), &set, &WelchTTest::default()).unwrap_err();

        assert_eq!(err.source, StatsError::InsufficientSamples(1));
    }
}
