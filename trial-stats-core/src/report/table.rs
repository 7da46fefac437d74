use std::io::{self, Write};

use colored::Colorize;

use super::{Report, ReportError, Reporter};
use crate::group::{Comparison, GroupSummary};
use crate::mode::Mode;
use crate::stats::{TestOutput, TestResult};

/// Decimal places used for each kind of column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Precision {
    cost_mean: usize,
    cost_dev: usize,
    time_mean: usize,
    time_dev: usize,
}

impl Precision {
    fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::IntegerCost => Self {
                cost_mean: 2,
                cost_dev: 4,
                time_mean: 3,
                time_dev: 5,
            },
            Mode::FloatCost => Self {
                cost_mean: 5,
                cost_dev: 5,
                time_mean: 3,
                time_dev: 5,
            },
            Mode::TimeOnly => Self {
                cost_mean: 0,
                cost_dev: 0,
                time_mean: 3,
                time_dev: 5,
            },
        }
    }
}

/// A reporter that writes a tab-separated summary table, one line per group.
#[derive(Debug, Clone, Default)]
pub struct TableReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TableReporter {
    /// Create a new table reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a table reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format a p-value, switching to scientific notation for very small values.
    fn format_p_value(p: f64) -> String {
        if p != 0.0 && p < 1e-4 {
            format!("{:.2e}", p)
        } else {
            format!("{:.4}", p)
        }
    }

    /// The cell following a t statistic: truncated df or a (possibly highlighted) p-value.
    fn format_significance(&self, test: &TestResult) -> String {
        match test.p_value {
            None => test.truncated_dof().to_string(),
            Some(p) => {
                let text = Self::format_p_value(p);
                if self.use_colors && test.significant == Some(true) {
                    text.green().bold().to_string()
                } else {
                    text
                }
            }
        }
    }

    fn column_labels(mode: Mode, output: TestOutput) -> Vec<String> {
        let significance = |quantity: &str| match output {
            TestOutput::DegreesOfFreedom => "dof".to_string(),
            TestOutput::PValue => format!("p-{}", quantity),
        };

        let mut labels = vec![format!("{:9}", "L")];
        if mode.is_paired_key() {
            labels.push(format!("{:>4}", "R"));
        }
        if mode.has_cost() {
            labels.extend(["muCost1", "muCost2"].map(String::from));
        }
        labels.extend(["muTime1", "muTime2"].map(String::from));
        if mode.has_cost() {
            labels.extend(["devCost1", "devCost2"].map(String::from));
        }
        labels.extend(["devTime1", "devTime2"].map(String::from));
        labels.push(format!("{:>3}", "N"));
        if mode.has_cost() {
            labels.push("t-cost".to_string());
            labels.push(significance("cost"));
        }
        labels.push("t-time".to_string());
        labels.push(significance("time"));
        labels
    }

    /// Print the title and column header lines.
    fn print_header(&self, writer: &mut dyn Write, report: &Report) -> io::Result<()> {
        writeln!(writer, "Statistical Analysis: {}", report.source)?;
        let header = Self::column_labels(report.mode, report.output).join("\t");
        if self.use_colors {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }
        Ok(())
    }

    /// Print a single group row.
    fn print_row(
        &self,
        writer: &mut dyn Write,
        mode: Mode,
        group: &GroupSummary,
    ) -> io::Result<()> {
        let precision = Precision::for_mode(mode);
        let mut cells = vec![format!("{:9}", group.key.length())];
        if let Some(replications) = group.key.replications() {
            cells.push(format!("{:4}", replications));
        }

        let cost = group.cost.as_ref().filter(|_| mode.has_cost());
        let time = &group.time;
        let pair = |c: &Comparison, mean: bool, places: usize| {
            let (a, b) = if mean {
                (c.a.mean, c.b.mean)
            } else {
                (c.a.std_dev, c.b.std_dev)
            };
            [format!("{:.*}", places, a), format!("{:.*}", places, b)]
        };

        if let Some(cost) = cost {
            cells.extend(pair(cost, true, precision.cost_mean));
        }
        cells.extend(pair(time, true, precision.time_mean));
        if let Some(cost) = cost {
            cells.extend(pair(cost, false, precision.cost_dev));
        }
        cells.extend(pair(time, false, precision.time_dev));
        cells.push(format!("{:3}", group.trials));
        if let Some(cost) = cost {
            cells.push(format!("{:.2}", cost.test.t_statistic));
            cells.push(self.format_significance(&cost.test));
        }
        cells.push(format!("{:.2}", time.test.t_statistic));
        cells.push(self.format_significance(&time.test));

        writeln!(writer, "{}", cells.join("\t"))
    }
}

impl Reporter for TableReporter {
    fn write_report(&self, writer: &mut dyn Write, report: &Report) -> Result<(), ReportError> {
        self.print_header(writer, report)?;

        for group in &report.groups {
            self.print_row(writer, report.mode, group)?;
        }

        writeln!(writer)?;
        Ok(())
    }
}
