//! Data module - CSV loading and processing

mod loader;
mod processor;

pub use loader::{
    load_csv, numeric_columns, DataLoader, LoaderError, AGE_COLUMN, DIABETES_COLUMN,
    REQUIRED_COLUMNS,
};
pub use processor::{DataProcessor, ProcessorError};
