//! Console diagnostics: table dump, schema summary, head/tail rows and
//! descriptive statistics.

use crate::stats::StatsCalculator;
use polars::prelude::*;

/// Rows shown by the head/tail sections.
pub const PREVIEW_ROWS: usize = 5;

/// Column, non-null count and dtype for every column.
pub fn schema_summary(df: &DataFrame) -> String {
    let mut out = format!("{} rows x {} columns\n", df.height(), df.width());
    out.push_str(&format!(
        " #  {:<22} {:>14}  {}\n",
        "Column", "Non-Null Count", "Dtype"
    ));
    for (i, col) in df.get_columns().iter().enumerate() {
        out.push_str(&format!(
            "{i:>2}  {:<22} {:>14}  {}\n",
            col.name().as_str(),
            col.len() - col.null_count(),
            col.dtype()
        ));
    }
    out
}

/// Human-readable summary of the table; not meant to be parsed.
pub fn diagnostics_report(df: &DataFrame) -> PolarsResult<String> {
    let stats = StatsCalculator::describe(df)?;

    let mut out = format!("{df}\n");
    out.push_str(&format!("{}\n", schema_summary(df)));
    out.push_str(&format!("{}\n", df.head(Some(PREVIEW_ROWS))));
    out.push_str(&format!("{}\n", df.tail(Some(PREVIEW_ROWS))));
    out.push_str(&StatsCalculator::format_describe(&stats));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_summary_lists_columns_and_non_null_counts() {
        let df = df!(
            "age" => [Some(80.0f64), None, Some(3.0)],
            "diabetes" => [0i64, 1, 0],
        )
        .unwrap();

        let text = schema_summary(&df);
        assert!(text.starts_with("3 rows x 2 columns"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.ends_with('\n'));
        let age_line = text.lines().find(|l| l.contains("age")).unwrap();
        assert!(age_line.contains(" 2 "));
        assert!(age_line.contains("f64"));
        let diabetes_line = text.lines().find(|l| l.contains("diabetes")).unwrap();
        assert!(diabetes_line.contains("i64"));
    }

    #[test]
    fn report_contains_describe_section() {
        let df = df!("age" => [5i64, 25, 70], "diabetes" => [0i64, 1, 0]).unwrap();

        let text = diagnostics_report(&df).unwrap();
        assert!(text.contains("count"));
        assert!(text.contains("75%"));
        assert!(text.contains("diabetes"));
    }
}
