//! Reading experiment rows and grouping them into per-key sample sets.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use trial_stats_core::{
    analyze_group, GroupError, GroupKey, GroupSummary, Measurements, Mode, SampleSet,
    ShapeMismatch, StatisticalTest,
};

/// Prefix of the trailer line the experiment drivers print once all trials are done.
pub const DEFAULT_SENTINEL: &str = "Experiment";

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Shape {
        line: usize,
        #[source]
        source: ShapeMismatch,
    },
}

/// One parsed data row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub key: GroupKey,
    pub measurements: Measurements,
}

fn parse_field<T: FromStr>(
    tokens: &[&str],
    index: usize,
    name: &str,
    line: usize,
) -> Result<T, AggregateError> {
    let token = tokens.get(index).ok_or_else(|| AggregateError::Parse {
        line,
        message: format!("missing {} (field {})", name, index + 1),
    })?;
    token.parse().map_err(|_| AggregateError::Parse {
        line,
        message: format!("invalid {} '{}'", name, token),
    })
}

fn parse_cost(
    tokens: &[&str],
    index: usize,
    name: &str,
    line: usize,
    mode: Mode,
) -> Result<f64, AggregateError> {
    let value = match mode {
        Mode::FloatCost => parse_field::<f64>(tokens, index, name, line)?,
        _ => parse_field::<i64>(tokens, index, name, line)? as f64,
    };
    if !value.is_finite() {
        return Err(AggregateError::Parse {
            line,
            message: format!("{} must be finite, got {}", name, value),
        });
    }
    Ok(value)
}

/// Parse one whitespace-delimited data row according to `mode`.
///
/// `line` is the 1-based line number used in error messages. Tokens beyond
/// the ones the mode needs are ignored.
pub fn parse_record(text: &str, line: usize, mode: Mode) -> Result<Record, AggregateError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let length = parse_field::<u64>(&tokens, 0, "run length", line)?;

    let record = match mode {
        Mode::IntegerCost | Mode::FloatCost => Record {
            key: GroupKey::Length(length),
            measurements: Measurements::Costed {
                cost_a: parse_cost(&tokens, 1, "cost1", line, mode)?,
                cost_b: parse_cost(&tokens, 2, "cost2", line, mode)?,
                time_a_ns: parse_field(&tokens, 3, "cpu1", line)?,
                time_b_ns: parse_field(&tokens, 4, "cpu2", line)?,
            },
        },
        Mode::TimeOnly => Record {
            key: GroupKey::Replicated {
                length,
                replications: parse_field(&tokens, 1, "restart count", line)?,
            },
            measurements: Measurements::Timed {
                time_a_ns: parse_field(&tokens, 2, "cpu1", line)?,
                time_b_ns: parse_field(&tokens, 3, "cpu2", line)?,
            },
        },
    };
    Ok(record)
}

/// Groups records by key, accumulating one sample set per key.
#[derive(Debug, Clone)]
pub struct Aggregator {
    mode: Mode,
    sentinel: String,
    groups: BTreeMap<GroupKey, SampleSet>,
}

impl Aggregator {
    /// Create an empty aggregator. An empty `sentinel` disables early termination.
    pub fn new(mode: Mode, sentinel: impl Into<String>) -> Self {
        Self {
            mode,
            sentinel: sentinel.into(),
            groups: BTreeMap::new(),
        }
    }

    /// Read and aggregate an experiment data file.
    pub fn from_path(path: &Path, mode: Mode, sentinel: &str) -> Result<Self, AggregateError> {
        let file = File::open(path)?;
        let mut aggregator = Self::new(mode, sentinel);
        aggregator.read_from(BufReader::new(file))?;
        Ok(aggregator)
    }

    /// Append a record to the sample set for its key, creating the set if needed.
    pub fn push(&mut self, record: Record) -> Result<(), ShapeMismatch> {
        let mode = self.mode;
        self.groups
            .entry(record.key)
            .or_insert_with(|| {
                if mode.has_cost() {
                    SampleSet::with_costs()
                } else {
                    SampleSet::time_only()
                }
            })
            .push(record.measurements)
    }

    fn is_sentinel(&self, text: &str) -> bool {
        !self.sentinel.is_empty() && text.trim_start().starts_with(self.sentinel.as_str())
    }

    /// Aggregate every data row from `reader`, returning the number of records read.
    ///
    /// The first line is a header and is skipped, as are blank lines. Reading
    /// stops at end of input or at the first line starting with the sentinel.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<usize, AggregateError> {
        let mut records = 0;
        for (index, text) in reader.lines().enumerate() {
            let line = index + 1;
            let text = text.map_err(|err| match err.kind() {
                io::ErrorKind::InvalidData => AggregateError::Parse {
                    line,
                    message: "line is not valid UTF-8".to_string(),
                },
                _ => AggregateError::Io(err),
            })?;
            if index == 0 || text.trim().is_empty() {
                continue;
            }
            if self.is_sentinel(&text) {
                tracing::debug!(line, "sentinel reached, ignoring remaining lines");
                break;
            }
            let record = parse_record(&text, line, self.mode)?;
            self.push(record)
                .map_err(|source| AggregateError::Shape { line, source })?;
            records += 1;
        }
        tracing::debug!(records, groups = self.groups.len(), "aggregated input");
        Ok(records)
    }

    /// Sample sets in ascending key order.
    pub fn groups(&self) -> &BTreeMap<GroupKey, SampleSet> {
        &self.groups
    }

    /// Analyze every group, in ascending key order. The first failing group aborts.
    pub fn analyze(&self, test: &dyn StatisticalTest) -> Result<Vec<GroupSummary>, GroupError> {
        self.groups
            .iter()
            .map(|(key, samples)| analyze_group(*key, samples, test))
            .collect()
    }
}
