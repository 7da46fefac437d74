//! The batch pipeline: aggregate a data file, analyze every group, build the report.

use anyhow::{Context, Result};
use std::path::Path;
use trial_stats_core::{Mode, Report, StatisticalTest};

use crate::aggregate::Aggregator;
use crate::config::Config;

/// Read `datafile` in `mode` and compute the summary report.
///
/// Every group is analyzed before anything is returned, so a failure in any
/// group yields an error rather than a partial report.
pub fn build_report(datafile: &Path, mode: Mode, config: &Config) -> Result<Report> {
    config.validate()?;
    tracing::info!(file = %datafile.display(), %mode, "reading experiment data");
    let aggregator = Aggregator::from_path(datafile, mode, &config.input.sentinel)
        .with_context(|| format!("Failed to read data file: {}", datafile.display()))?;

    let test = config.welch_test();
    tracing::info!(
        groups = aggregator.groups().len(),
        output = ?test.output(),
        "analyzing groups"
    );
    let groups = aggregator
        .analyze(&test)
        .context("Failed to analyze experiment data")?;

    Ok(Report {
        source: datafile.display().to_string(),
        mode,
        output: test.output(),
        groups,
    })
}
