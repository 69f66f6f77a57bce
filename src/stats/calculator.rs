//! Statistics Calculator Module
//! Descriptive statistics per exercise group and the exercise/fitness correlation.

use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Descriptive statistics for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub group: i64,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self {
            group: 0,
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Box geometry for one group: quartiles plus 1.5 IQR whiskers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpread {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> GroupStats {
        let n = values.len();
        if n == 0 {
            return GroupStats::default();
        }

        let sorted = Self::sorted(values);
        let mean = values.iter().sum::<f64>() / n as f64;

        // Sample std; undefined for a single observation
        let std = if n > 1 {
            let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        GroupStats {
            group: 0,
            count: n,
            mean,
            std,
            min: sorted[0],
            q1: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q3: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Describe `values` grouped by `keys`, ascending by key.
    pub fn describe_by_group(keys: &[i64], values: &[f64]) -> Vec<GroupStats> {
        Self::group_values(keys, values)
            .into_iter()
            .map(|(group, vals)| GroupStats {
                group,
                ..Self::compute_descriptive_stats(&vals)
            })
            .collect()
    }

    /// Arithmetic mean of `values` per key, ascending by key.
    pub fn group_means(keys: &[i64], values: &[f64]) -> Vec<(i64, f64)> {
        Self::group_values(keys, values)
            .into_iter()
            .map(|(group, vals)| (group, vals.iter().sum::<f64>() / vals.len() as f64))
            .collect()
    }

    fn group_values(keys: &[i64], values: &[f64]) -> BTreeMap<i64, Vec<f64>> {
        let mut groups: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for (&k, &v) in keys.iter().zip(values.iter()) {
            groups.entry(k).or_default().push(v);
        }
        groups
    }

    /// Pearson correlation coefficient. NaN when undefined.
    pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
        if xs.len() != ys.len() || xs.len() < 2 {
            return f64::NAN;
        }

        let cov = xs.iter().covariance(ys.iter());
        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        cov / (sx * sy)
    }

    /// Quartiles and whiskers for drawing a box. `None` for an empty group.
    pub fn box_spread(values: &[f64]) -> Option<BoxSpread> {
        if values.is_empty() {
            return None;
        }

        let sorted = Self::sorted(values);
        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Some(BoxSpread {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
        })
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }
}
