//! Fitness Analyser - Exercise Frequency vs Perceived Fitness
//!
//! Loads the survey CSV, encodes the exercise and fitness answers, shows the
//! charts and prints group statistics with the correlation coefficient.

mod charts;
mod data;
mod gui;
mod report;
mod settings;
mod stats;

use data::DataCleaner;
use gui::WindowRenderer;
use report::Reporter;
use settings::AnalysisSettings;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    let settings = AnalysisSettings::default();

    let Some(df) = data::load(&settings.csv_path) else {
        return Ok(());
    };

    let cleaner = DataCleaner::from_settings(&settings);
    let Some(cleaned) = data::clean(Some(&df), &cleaner) else {
        return Ok(());
    };

    let mut renderer = WindowRenderer::new(&settings.window_title);
    Reporter::new(&settings).report(Some(&cleaned), &df, &mut renderer);

    Ok(())
}
