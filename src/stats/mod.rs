//! Statistics module - Descriptive statistics and correlation

mod calculator;
mod summary;

pub use calculator::{BoxSpread, GroupStats, StatsCalculator};
pub use summary::FrequencySummary;
