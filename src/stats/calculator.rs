//! Statistics Calculator Module
//! Handles descriptive statistics for the diagnostic summary.

use crate::data::numeric_columns;
use polars::prelude::*;

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl Default for ColumnStats {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnStats {
        let n = values.len();
        if n == 0 {
            return ColumnStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let variance =
                values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        ColumnStats {
            column: String::new(),
            count: n,
            mean,
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
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

    /// Non-null values of a column as `f64`.
    pub fn column_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<f64>> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().flatten().collect())
    }

    /// Describe every numeric column, in table order.
    pub fn describe(df: &DataFrame) -> PolarsResult<Vec<ColumnStats>> {
        numeric_columns(df)
            .into_iter()
            .map(|column| -> PolarsResult<ColumnStats> {
                let values = Self::column_values(df, &column)?;
                Ok(ColumnStats {
                    column,
                    ..Self::compute_descriptive_stats(&values)
                })
            })
            .collect()
    }

    /// Format `describe` output as rows of statistics by columns of data.
    pub fn format_describe(stats: &[ColumnStats]) -> String {
        let rows: [(&str, fn(&ColumnStats) -> f64); 8] = [
            ("count", |s: &ColumnStats| s.count as f64),
            ("mean", |s: &ColumnStats| s.mean),
            ("std", |s: &ColumnStats| s.std),
            ("min", |s: &ColumnStats| s.min),
            ("25%", |s: &ColumnStats| s.p25),
            ("50%", |s: &ColumnStats| s.median),
            ("75%", |s: &ColumnStats| s.p75),
            ("max", |s: &ColumnStats| s.max),
        ];
        let width = stats
            .iter()
            .map(|s| s.column.len())
            .max()
            .unwrap_or(0)
            .max(14);

        let mut out = format!("{:<6}", "");
        for s in stats {
            out.push_str(&format!(" {:>width$}", s.column));
        }
        out.push('\n');
        for (label, get) in rows {
            out.push_str(&format!("{label:<6}"));
            for s in stats {
                out.push_str(&format!(" {:>width$.6}", get(s)));
            }
            out.push('\n');
        }
        out
    }
}
