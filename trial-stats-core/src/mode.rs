//! Input/report mode selection.

use std::fmt;

use serde::Serialize;

/// The layout of the experiment data, resolved once at startup.
///
/// The mode decides how each row is parsed and which columns the report
/// contains; the statistics themselves do not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// `<length> <cost1> <cost2> <cpu1> <cpu2>` with integer costs.
    #[default]
    IntegerCost,
    /// Same layout as [`Mode::IntegerCost`] but costs are floating point.
    FloatCost,
    /// `<length> <restarts> <cpu1> <cpu2>`, grouped by (length, restarts).
    TimeOnly,
}

impl Mode {
    /// Whether rows carry optimization cost columns.
    pub fn has_cost(self) -> bool {
        !matches!(self, Mode::TimeOnly)
    }

    /// Whether groups are keyed by (length, replications) rather than length.
    pub fn is_paired_key(self) -> bool {
        matches!(self, Mode::TimeOnly)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::IntegerCost => write!(f, "integer cost"),
            Mode::FloatCost => write!(f, "float cost"),
            Mode::TimeOnly => write!(f, "time only"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_layout() {
        assert!(Mode::IntegerCost.has_cost());
        assert!(Mode::FloatCost.has_cost());
        assert!(!Mode::TimeOnly.has_cost());
        assert!(Mode::TimeOnly.is_paired_key());
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::IntegerCost.to_string(), "integer cost");
        assert_eq!(Mode::TimeOnly.to_string(), "time only");
    }
}
