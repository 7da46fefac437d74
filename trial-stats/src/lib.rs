//! trial-stats: summarize paired algorithm experiments
//!
//! This library reads experiment result files with one row per trial,
//! groups trials by run length, and compares the two algorithm variants'
//! cost and CPU time with Welch's t-test.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod pipeline;

// Re-export core types for convenience
pub use trial_stats_core::report::{JsonReporter, Report, ReportError, Reporter, TableReporter};
pub use trial_stats_core::stats::{StatisticalTest, StatsError, TestOutput, TestResult, WelchTTest};
pub use trial_stats_core::{GroupKey, GroupSummary, Mode};

// Re-export main types from this crate
pub use aggregate::{parse_record, AggregateError, Aggregator, Record, DEFAULT_SENTINEL};
pub use cli::{Cli, ModeArg};
pub use config::{Config, ReportFormat};
pub use pipeline::build_report;
