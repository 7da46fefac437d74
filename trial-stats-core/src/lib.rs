//! Core types and utilities for trial-stats.
//!
//! This crate holds the statistics engine (summary statistics and Welch's
//! t-test), the per-group sample model, and the report formatters shared by
//! the `trial-stats` command-line tool.

pub mod group;
pub mod mode;
pub mod report;
pub mod stats;

// Re-export main types for convenience
pub use group::{
    analyze_group, Comparison, GroupError, GroupKey, GroupSummary, Measurements, Quantity,
    SampleSet, ShapeMismatch,
};
pub use mode::Mode;
pub use report::{JsonReporter, Report, ReportError, Reporter, TableReporter};
pub use stats::{
    mean, std_dev, welch_moments, SampleSummary, StatisticalTest, StatsError, TestOutput,
    TestResult, Variant, WelchTTest,
};
