//! CSV Data Loader Module
//! Reads the survey CSV into a Polars DataFrame with trimmed headers.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and strip whitespace from its column names.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let mut df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let trimmed: Vec<String> = Self::get_columns(&df)
            .iter()
            .map(|name| name.trim().to_string())
            .collect();
        df.set_column_names(trimmed)?;

        Ok(df)
    }

    /// Get list of column names.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Load the survey table, reporting its shape.
///
/// Failures are logged and collapse to `None`; nothing propagates to the caller.
pub fn load(file_path: &Path) -> Option<DataFrame> {
    match DataLoader::load_csv(file_path) {
        Ok(df) => {
            info!(
                "Dataset loaded successfully with {} rows and {} columns",
                df.height(),
                df.width()
            );
            Some(df)
        }
        Err(e) => {
            error!("Error loading data: {}", e);
            None
        }
    }
}
