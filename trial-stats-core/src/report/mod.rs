use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use crate::group::GroupSummary;
use crate::mode::Mode;
use crate::stats::TestOutput;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything a reporter needs: where the data came from, how it was read,
/// and the per-group rows in ascending key order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    pub mode: Mode,
    pub output: TestOutput,
    pub groups: Vec<GroupSummary>,
}

pub trait Reporter: Send + Sync {
    fn write_report(&self, writer: &mut dyn Write, report: &Report) -> Result<(), ReportError>;

    /// Write the report to standard output.
    fn report(&self, report: &Report) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, report)?;
        writer.flush()?;
        Ok(())
    }
}

mod json;
mod table;
pub use json::JsonReporter;
pub use table::TableReporter;
