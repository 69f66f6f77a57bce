//! Data Cleaner Module
//! Maps the two survey answers to ordinal codes and drops unmappable rows.

use crate::data::mapping::{CategoryMapping, EXERCISE_FREQUENCY_MAPPING, FITNESS_LEVEL_MAPPING};
use crate::settings::AnalysisSettings;
use polars::prelude::*;
use thiserror::Error;
use tracing::{error, info};

pub const EXERCISE_FREQUENCY: &str = "exercise_frequency";
pub const FITNESS_LEVEL: &str = "fitness_level";
/// Position of the respondent in the raw table
pub const ROW_ID: &str = "row_id";

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Respondent rows whose answers both mapped, with the encoded columns added.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    df: DataFrame,
}

impl CleanedTable {
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn exercise_frequency(&self) -> Vec<i64> {
        self.int_column(EXERCISE_FREQUENCY)
    }

    pub fn fitness_level(&self) -> Vec<i64> {
        self.int_column(FITNESS_LEVEL)
    }

    pub fn row_ids(&self) -> Vec<u32> {
        self.df
            .column(ROW_ID)
            .ok()
            .and_then(|col| col.u32().ok())
            .map(|ca| ca.into_iter().flatten().collect())
            .unwrap_or_default()
    }

    fn int_column(&self, name: &str) -> Vec<i64> {
        self.df
            .column(name)
            .ok()
            .and_then(|col| col.i64().ok())
            .map(|ca| ca.into_iter().flatten().collect())
            .unwrap_or_default()
    }
}

/// Encodes the exercise and fitness answers of a survey table.
pub struct DataCleaner {
    exercise_col: String,
    fitness_col: String,
}

impl DataCleaner {
    pub fn new(exercise_col: &str, fitness_col: &str) -> Self {
        Self {
            exercise_col: exercise_col.to_string(),
            fitness_col: fitness_col.to_string(),
        }
    }

    pub fn from_settings(settings: &AnalysisSettings) -> Self {
        Self::new(&settings.exercise_col, &settings.fitness_col)
    }

    /// Read a column as text. `Ok(None)` if the column does not exist.
    pub fn text_values(
        df: &DataFrame,
        column: &str,
    ) -> Result<Option<Vec<Option<String>>>, CleanerError> {
        let Ok(series) = df.column(column) else {
            return Ok(None);
        };

        let as_text = series.cast(&DataType::String)?;
        let values = as_text
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Ok(Some(values))
    }

    /// Distinct non-null values in order of first appearance.
    pub fn unique_values(values: &[Option<String>]) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for v in values.iter().flatten() {
            if !seen.contains(v) {
                seen.push(v.clone());
            }
        }
        seen
    }

    /// Translate answers through a mapping; null and unknown answers become `None`.
    fn encode(
        answers: Option<&[Option<String>]>,
        mapping: &CategoryMapping,
        height: usize,
    ) -> Vec<Option<i64>> {
        match answers {
            Some(answers) => answers
                .iter()
                .map(|a| a.as_deref().and_then(|s| mapping.lookup(s)))
                .collect(),
            None => vec![None; height],
        }
    }

    /// Clean a survey table.
    ///
    /// Output keeps every original column (target answers trimmed) plus
    /// `exercise_frequency`, `fitness_level` and `row_id`, restricted to rows
    /// where both answers mapped.
    pub fn clean(&self, df: &DataFrame) -> Result<CleanedTable, CleanerError> {
        let height = df.height();
        let mut work = df.clone();

        // Trim answers in place when the column exists
        let mut trimmed: Vec<Option<Vec<Option<String>>>> = Vec::with_capacity(2);
        for column in [&self.exercise_col, &self.fitness_col] {
            let values = Self::text_values(df, column)?.map(|values| {
                values
                    .into_iter()
                    .map(|v| v.map(|s| s.trim().to_string()))
                    .collect::<Vec<_>>()
            });
            if let Some(values) = &values {
                let refs: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
                work.with_column(Series::new(column.as_str().into(), refs))?;
            }
            trimmed.push(values);
        }
        let exercise_answers = trimmed[0].as_deref();
        let fitness_answers = trimmed[1].as_deref();

        for (mapping, answers) in [
            (&EXERCISE_FREQUENCY_MAPPING, exercise_answers),
            (&FITNESS_LEVEL_MAPPING, fitness_answers),
        ] {
            info!(
                "Unique {} values: {:?}",
                mapping.name,
                answers.map(Self::unique_values).unwrap_or_default()
            );
        }

        let exercise_codes = Self::encode(exercise_answers, &EXERCISE_FREQUENCY_MAPPING, height);
        let fitness_codes = Self::encode(fitness_answers, &FITNESS_LEVEL_MAPPING, height);

        let keep: Vec<bool> = exercise_codes
            .iter()
            .zip(fitness_codes.iter())
            .map(|(e, f)| e.is_some() && f.is_some())
            .collect();
        let mask = BooleanChunked::from_slice("keep".into(), &keep);

        let row_ids: Vec<u32> = (0..height as u32).collect();
        work.with_column(Series::new(ROW_ID.into(), row_ids))?;
        work.with_column(Series::new(EXERCISE_FREQUENCY.into(), exercise_codes))?;
        work.with_column(Series::new(FITNESS_LEVEL.into(), fitness_codes))?;

        let mut cleaned = work.filter(&mask)?;
        for column in [EXERCISE_FREQUENCY, FITNESS_LEVEL] {
            let as_int = cleaned.column(column)?.cast(&DataType::Int64)?;
            cleaned.with_column(as_int)?;
        }

        info!("Cleaned data contains {} rows", cleaned.height());

        Ok(CleanedTable { df: cleaned })
    }
}

/// Clean a loaded table. Absent input stays absent; failures are logged and
/// reported as absent.
pub fn clean(table: Option<&DataFrame>, cleaner: &DataCleaner) -> Option<CleanedTable> {
    let df = table?;
    match cleaner.clean(df) {
        Ok(cleaned) => Some(cleaned),
        Err(e) => {
            error!("Error cleaning data: {}", e);
            None
        }
    }
}

#[cfg(test)]
impl CleanedTable {
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }
}
