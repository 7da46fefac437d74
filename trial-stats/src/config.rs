//! Configuration loading for trial-stats.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use trial_stats_core::{JsonReporter, Reporter, TableReporter, TestOutput, WelchTTest};

use crate::aggregate::DEFAULT_SENTINEL;

/// Top-level configuration for trial-stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the significance test.
    pub hypothesis: HypothesisConfig,
    /// Settings for reading experiment data.
    pub input: InputConfig,
    /// Settings for the summary report.
    pub report: ReportConfig,
}

/// Configuration for the significance test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HypothesisConfig {
    /// Confidence level used to flag significant p-values (e.g., 0.95).
    pub confidence_level: f64,
    /// Report two-tailed p-values instead of truncated degrees of freedom.
    pub p_value: bool,
}

/// Configuration for reading experiment data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Lines starting with this marker end the data section. Empty disables it.
    pub sentinel: String,
}

/// Output format of the summary report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Tab-separated table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Configuration for the summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Whether the table reporter uses ANSI colors.
    pub colors: bool,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
            p_value: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Table,
            colors: true,
        }
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".trial-stats.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Check values that cannot be expressed in the type system.
    pub fn validate(&self) -> Result<()> {
        let level = self.hypothesis.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            bail!(
                "confidence_level must be between 0 and 1 (exclusive), got {}",
                level
            );
        }
        Ok(())
    }

    pub fn test_output(&self) -> TestOutput {
        if self.hypothesis.p_value {
            TestOutput::PValue
        } else {
            TestOutput::DegreesOfFreedom
        }
    }

    /// The Welch's t-test this configuration describes. Call [`Config::validate`] first.
    pub fn welch_test(&self) -> WelchTTest {
        WelchTTest::new(self.hypothesis.confidence_level, self.test_output())
    }

    pub fn reporter(&self) -> Box<dyn Reporter> {
        match self.report.format {
            ReportFormat::Json => Box::new(JsonReporter::new()),
            ReportFormat::Table if self.report.colors => Box::new(TableReporter::new()),
            ReportFormat::Table => Box::new(TableReporter::without_colors()),
        }
    }
}
