//! Command-line interface for trial-stats.

use crate::config::{Config, ReportFormat, DEFAULT_CONFIG_FILE};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use trial_stats_core::Mode;

/// Data layout named on the command line. Omitting it selects integer costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// `<length> <cost1> <cost2> <cpu1> <cpu2>` with floating-point costs
    Float,
    /// `<length> <restarts> <cpu1> <cpu2>`, grouped by (length, restarts)
    Anneal,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Float => Mode::FloatCost,
            ModeArg::Anneal => Mode::TimeOnly,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "trial-stats")]
#[command(about = "Summarize paired algorithm experiments with Welch's t-test")]
#[command(version)]
pub struct Cli {
    /// Experiment data file (whitespace-delimited, first line is a header)
    pub datafile: PathBuf,

    /// Data layout; omit for integer costs
    #[arg(value_enum)]
    pub mode: Option<ModeArg>,

    /// Report two-tailed p-values instead of truncated degrees of freedom
    #[arg(long)]
    pub p_value: bool,

    /// Confidence level used to flag significant p-values (0.0-1.0)
    #[arg(long)]
    pub confidence_level: Option<f64>,

    /// Report output format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Disable colored table output
    #[arg(long)]
    pub no_color: bool,

    /// Marker that ends the data section (empty string disables)
    #[arg(long)]
    pub sentinel: Option<String>,

    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The data layout selected by the positional mode argument.
    pub fn mode(&self) -> Mode {
        self.mode.map(Mode::from).unwrap_or_default()
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values. Flags only
    /// override when set, so a config file can enable p-values on its own.
    pub fn apply_to_config(&self, config: &mut Config) {
        if self.p_value {
            config.hypothesis.p_value = true;
        }

        if let Some(confidence_level) = self.confidence_level {
            config.hypothesis.confidence_level = confidence_level;
        }

        if let Some(format) = self.format {
            config.report.format = format;
        }

        if self.no_color {
            config.report.colors = false;
        }

        if let Some(sentinel) = &self.sentinel {
            config.input.sentinel = sentinel.clone();
        }
    }
}
