//! Analysis Settings
//! Input path, survey column names and view options.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "fitness_analysis.csv";
pub const EXERCISE_QUESTION: &str = "How often do you exercise?";
pub const FITNESS_QUESTION: &str = "How do you describe your current level of fitness ?";
/// Raw header carries a trailing space; headers are trimmed at load.
pub const AGE_QUESTION: &str = "Your age ";

/// How the age view pairs original respondents with cleaned fitness levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeAlignment {
    /// Join on the row id carried through cleaning
    RowId,
    /// Pair by position; drifts once cleaning has dropped rows
    Positional,
}

impl Default for AgeAlignment {
    fn default() -> Self {
        AgeAlignment::RowId
    }
}

/// Settings for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub csv_path: PathBuf,
    pub exercise_col: String,
    pub fitness_col: String,
    pub age_col: String,
    pub age_alignment: AgeAlignment,
    pub window_title: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            exercise_col: EXERCISE_QUESTION.to_string(),
            fitness_col: FITNESS_QUESTION.to_string(),
            age_col: AGE_QUESTION.trim().to_string(),
            age_alignment: AgeAlignment::default(),
            window_title: "Fitness Analyser".to_string(),
        }
    }
}
