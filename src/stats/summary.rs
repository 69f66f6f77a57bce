//! Printed summary of fitness level by exercise frequency.

use crate::stats::{GroupStats, StatsCalculator};
use serde::Serialize;
use std::fmt;

const COLUMNS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Clone, Serialize)]
pub struct FrequencySummary {
    pub groups: Vec<GroupStats>,
    pub correlation: f64,
}

impl FrequencySummary {
    pub fn from_codes(exercise_frequency: &[i64], fitness_level: &[i64]) -> Self {
        let xs: Vec<f64> = exercise_frequency.iter().map(|&v| v as f64).collect();
        let ys: Vec<f64> = fitness_level.iter().map(|&v| v as f64).collect();

        Self {
            groups: StatsCalculator::describe_by_group(exercise_frequency, &ys),
            correlation: StatsCalculator::pearson(&xs, &ys),
        }
    }

    /// `Correlation between ...: r` rounded to two decimals.
    pub fn correlation_line(&self) -> String {
        format!(
            "Correlation between Exercise Frequency and Fitness Level: {:.2}",
            self.correlation
        )
    }
}

impl fmt::Display for FrequencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary Statistics for Fitness Level by Exercise Frequency:")?;
        write!(f, "{:<20}", "")?;
        for name in COLUMNS {
            write!(f, "{:>10}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "{:<20}", "exercise_frequency")?;

        for gs in &self.groups {
            write!(f, "{:<20}{:>10.1}", gs.group, gs.count as f64)?;
            for v in [gs.mean, gs.std, gs.min, gs.q1, gs.median, gs.q3, gs.max] {
                write!(f, "{:>10.6}", v)?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        write!(f, "{}", self.correlation_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_row_summary() {
        let summary = FrequencySummary::from_codes(&[0, 3], &[1, 5]);

        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].group, 0);
        assert_eq!(summary.groups[1].group, 3);
        assert_eq!(
            summary.correlation_line(),
            "Correlation between Exercise Frequency and Fitness Level: 1.00"
        );
    }

    #[test]
    fn test_display_lists_groups_in_order() {
        let summary = FrequencySummary::from_codes(&[2, 0, 2], &[3, 1, 5]);
        let text = summary.to_string();

        assert!(text.starts_with("Summary Statistics for Fitness Level by Exercise Frequency:"));
        let zero = text.find("\n0 ").unwrap();
        let two = text.find("\n2 ").unwrap();
        assert!(zero < two);
        assert!(text.contains("4.000000"));
        assert!(text.ends_with("Level: 0.87"));
    }

    #[test]
    fn test_constant_series_prints_nan() {
        let summary = FrequencySummary::from_codes(&[1, 1, 1], &[2, 3, 4]);
        assert!(summary.correlation.is_nan());
        assert!(summary.correlation_line().ends_with("NaN"));
    }
}
