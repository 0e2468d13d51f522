//! Stats module - bracket aggregation, binning and descriptive statistics

mod brackets;
mod calculator;
mod histogram;
mod report;

pub use brackets::{
    bracket_aggregates, bracket_counts, partition, percentage_aggregates, AgeBracket,
    BracketAggregate, BracketCount, DiabetesStatus, PercentageAggregate,
};
pub use calculator::{ColumnStats, StatsCalculator};
pub use histogram::{histogram, HistogramBin, AGE_HISTOGRAM_BINS};
pub use report::{diagnostics_report, schema_summary, PREVIEW_ROWS};
