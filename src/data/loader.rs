//! CSV Data Loader Module
//! Handles CSV file loading and column checks using Polars.

use polars::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Column holding the patient age.
pub const AGE_COLUMN: &str = "age";
/// Column holding the diabetes indicator (0 = negative, 1 = positive).
pub const DIABETES_COLUMN: &str = "diabetes";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = [AGE_COLUMN, DIABETES_COLUMN];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    separator: u8,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { separator: b',' }
    }

    /// Load a comma separated file with a header row.
    ///
    /// The whole file is scanned for schema inference, so a stray
    /// non-numeric cell turns its column into text instead of being dropped.
    pub fn load_csv(&self, file_path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let path = file_path.as_ref();

        match std::fs::metadata(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoaderError::FileNotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(LoaderError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let mut df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(self.separator)
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        Self::check_required(&df)?;
        if df.height() == 0 {
            Self::pin_empty_required(&mut df)?;
        }

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded dataset"
        );
        Ok(df)
    }

    fn check_required(df: &DataFrame) -> Result<(), LoaderError> {
        for name in REQUIRED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name.to_string()));
            }
        }
        debug!(columns = ?df.get_column_names(), "required columns present");
        Ok(())
    }

    /// A header-only file gives inference nothing to look at, so the
    /// required columns come back as text. Give them the integer type a
    /// populated file would have.
    fn pin_empty_required(df: &mut DataFrame) -> Result<(), LoaderError> {
        for name in REQUIRED_COLUMNS {
            let column = df.column(name)?;
            if matches!(column.dtype(), DataType::String | DataType::Null) {
                let pinned = column.cast(&DataType::Int64)?;
                df.with_column(pinned)?;
            }
        }
        debug!("empty table, required columns typed as i64");
        Ok(())
    }
}

/// Load `file_path` with the default loader.
pub fn load_csv(file_path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
    DataLoader::new().load_csv(file_path)
}

/// Get list of numeric column names.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric(col.dtype()))
        .map(|col| col.name().to_string())
        .collect()
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
