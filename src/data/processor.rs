//! Data Processor Module
//! Handles type coercion of the loaded table.

use crate::data::loader::{is_numeric, AGE_COLUMN};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Cannot convert column '{column}' to integer: {reason}")]
    TypeConversion { column: String, reason: String },
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Return a copy of `df` with the age column coerced to `Int64`.
    ///
    /// Fractional ages are truncated toward zero. The input table is left
    /// untouched.
    pub fn normalize_age(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let age = Self::to_integer(df.column(AGE_COLUMN)?)?;

        let mut out = df.clone();
        out.with_column(age)?;

        debug!(rows = out.height(), "age column coerced to Int64");
        Ok(out)
    }

    /// Coerce a single column to `Int64`, failing instead of producing nulls.
    pub fn to_integer(column: &Column) -> Result<Column, ProcessorError> {
        let name = column.name().to_string();
        let conversion_error = |reason: String| ProcessorError::TypeConversion {
            column: name.clone(),
            reason,
        };

        if column.null_count() > 0 {
            return Err(conversion_error(format!(
                "{} missing value(s)",
                column.null_count()
            )));
        }

        let numeric = match column.dtype() {
            DataType::Int64 => return Ok(column.clone()),
            DataType::String => column
                .strict_cast(&DataType::Float64)
                .map_err(|_| conversion_error("non-numeric text value".to_string()))?,
            dtype if is_numeric(dtype) => column.clone(),
            dtype => return Err(conversion_error(format!("unsupported type {dtype}"))),
        };

        numeric
            .strict_cast(&DataType::Int64)
            .map_err(|e| conversion_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_fractional_ages() {
        let df = df!(
            "age" => [80.0f64, 0.08, 54.9, 36.0],
            "diabetes" => [0i64, 0, 1, 0],
        )
        .unwrap();

        let out = DataProcessor::normalize_age(&df).unwrap();
        let ages: Vec<i64> = out
            .column("age")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(ages, vec![80, 0, 54, 36]);
    }

    #[test]
    fn leaves_the_input_untouched() {
        let df = df!("age" => [12.5f64, 61.2], "diabetes" => [0i64, 1]).unwrap();

        let out = DataProcessor::normalize_age(&df).unwrap();
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Float64);
        assert_eq!(out.column("age").unwrap().dtype(), &DataType::Int64);
        assert!(out
            .column("diabetes")
            .unwrap()
            .as_materialized_series()
            .equals(df.column("diabetes").unwrap().as_materialized_series()));
    }

    #[test]
    fn is_idempotent() {
        let df = df!("age" => [3.7f64, 19.99, 60.0], "diabetes" => [0i64, 1, 1]).unwrap();

        let once = DataProcessor::normalize_age(&df).unwrap();
        let twice = DataProcessor::normalize_age(&once).unwrap();
        assert!(once.equals(&twice));
    }

    #[test]
    fn parses_numeric_text() {
        let df = df!("age" => ["44", "7.5", "63"], "diabetes" => [0i64, 0, 1]).unwrap();

        let out = DataProcessor::normalize_age(&df).unwrap();
        let ages: Vec<i64> = out
            .column("age")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(ages, vec![44, 7, 63]);
    }

    #[test]
    fn non_numeric_text_is_a_conversion_error() {
        let df = df!("age" => ["44", "unknown"], "diabetes" => [0i64, 1]).unwrap();

        let err = DataProcessor::normalize_age(&df).unwrap_err();
        assert!(matches!(err, ProcessorError::TypeConversion { column, .. } if column == "age"));
    }

    #[test]
    fn missing_age_is_a_conversion_error() {
        let df = df!("age" => [Some(44.0f64), None], "diabetes" => [0i64, 1]).unwrap();

        let err = DataProcessor::normalize_age(&df).unwrap_err();
        assert!(matches!(err, ProcessorError::TypeConversion { .. }));
    }

    #[test]
    fn boolean_age_is_a_conversion_error() {
        let df = df!("age" => [true, false], "diabetes" => [0i64, 1]).unwrap();

        let err = DataProcessor::normalize_age(&df).unwrap_err();
        assert!(matches!(err, ProcessorError::TypeConversion { .. }));
    }

    #[test]
    fn missing_age_column_is_a_polars_error() {
        let df = df!("years" => [1i64], "diabetes" => [0i64]).unwrap();

        let err = DataProcessor::normalize_age(&df).unwrap_err();
        assert!(matches!(err, ProcessorError::Polars(_)));
    }
}
