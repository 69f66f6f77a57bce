//! Data module - CSV loading and survey cleaning

mod cleaner;
mod loader;
mod mapping;

pub use cleaner::{clean, CleanedTable, DataCleaner};
pub use loader::load;
pub use mapping::{CategoryMapping, EXERCISE_FREQUENCY_MAPPING, FITNESS_LEVEL_MAPPING};
