//! Age bracket aggregation.
//!
//! One definition of the four age brackets, shared by every chart that
//! groups records by age.

use crate::data::{ProcessorError, AGE_COLUMN, DIABETES_COLUMN};
use polars::prelude::*;
use std::fmt;

/// Fixed, contiguous age ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBracket {
    /// 0 to 9
    Children,
    /// 10 to 19
    Adolescents,
    /// 20 to 59
    Adults,
    /// 60 and up
    Seniors,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::Children,
        AgeBracket::Adolescents,
        AgeBracket::Adults,
        AgeBracket::Seniors,
    ];

    /// Inclusive bounds; `None` means unbounded on that side.
    ///
    /// Children has no lower bound so that the four brackets cover every
    /// integer age.
    pub fn bounds(self) -> (Option<i64>, Option<i64>) {
        match self {
            AgeBracket::Children => (None, Some(9)),
            AgeBracket::Adolescents => (Some(10), Some(19)),
            AgeBracket::Adults => (Some(20), Some(59)),
            AgeBracket::Seniors => (Some(60), None),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::Children => "Children (0-9)",
            AgeBracket::Adolescents => "Adolescents (10-19)",
            AgeBracket::Adults => "Adults (20-59)",
            AgeBracket::Seniors => "Seniors (60+)",
        }
    }

    pub fn contains(self, age: i64) -> bool {
        let (low, high) = self.bounds();
        low.map_or(true, |l| age >= l) && high.map_or(true, |h| age <= h)
    }

    /// Bracket an age falls into.
    pub fn of(age: i64) -> Self {
        match age {
            ..=9 => AgeBracket::Children,
            10..=19 => AgeBracket::Adolescents,
            20..=59 => AgeBracket::Adults,
            _ => AgeBracket::Seniors,
        }
    }

    /// Row filter selecting this bracket from a table with an integer age column.
    pub fn predicate(self) -> Expr {
        let age = col(AGE_COLUMN);
        match self.bounds() {
            (Some(low), Some(high)) => age.clone().gt_eq(lit(low)).and(age.lt_eq(lit(high))),
            (None, Some(high)) => age.lt_eq(lit(high)),
            (Some(low), None) => age.gt_eq(lit(low)),
            (None, None) => lit(true),
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Diabetes indicator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiabetesStatus {
    Negative,
    Positive,
}

impl DiabetesStatus {
    pub fn code(self) -> i64 {
        match self {
            DiabetesStatus::Negative => 0,
            DiabetesStatus::Positive => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiabetesStatus::Negative => "No diabetes",
            DiabetesStatus::Positive => "Diabetes",
        }
    }

    fn predicate(self) -> Expr {
        col(DIABETES_COLUMN).eq(lit(self.code()))
    }
}

/// Rows per bracket, ignoring diabetes status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketCount {
    pub bracket: AgeBracket,
    pub total: usize,
}

/// Rows per bracket split by diabetes status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketAggregate {
    pub bracket: AgeBracket,
    pub negative: usize,
    pub positive: usize,
}

impl BracketAggregate {
    pub fn total(&self) -> usize {
        self.negative + self.positive
    }

    /// Share of each status within the bracket, in percent.
    ///
    /// An empty bracket yields 0% for both statuses.
    pub fn percentages(&self) -> PercentageAggregate {
        let total = self.total();
        let (negative_pct, positive_pct) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                self.negative as f64 / total as f64 * 100.0,
                self.positive as f64 / total as f64 * 100.0,
            )
        };

        PercentageAggregate {
            bracket: self.bracket,
            total,
            negative_pct,
            positive_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentageAggregate {
    pub bracket: AgeBracket,
    pub total: usize,
    pub negative_pct: f64,
    pub positive_pct: f64,
}

impl PercentageAggregate {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Split the table into one sub-table per bracket, in `AgeBracket::ALL` order.
pub fn partition(df: &DataFrame) -> Result<Vec<(AgeBracket, DataFrame)>, ProcessorError> {
    AgeBracket::ALL
        .iter()
        .map(|&bracket| -> Result<_, ProcessorError> {
            let subset = df.clone().lazy().filter(bracket.predicate()).collect()?;
            Ok((bracket, subset))
        })
        .collect()
}

pub fn bracket_counts(df: &DataFrame) -> Result<Vec<BracketCount>, ProcessorError> {
    Ok(partition(df)?
        .into_iter()
        .map(|(bracket, subset)| BracketCount {
            bracket,
            total: subset.height(),
        })
        .collect())
}

pub fn bracket_aggregates(df: &DataFrame) -> Result<Vec<BracketAggregate>, ProcessorError> {
    partition(df)?
        .into_iter()
        .map(|(bracket, subset)| -> Result<_, ProcessorError> {
            Ok(BracketAggregate {
                bracket,
                negative: count_status(&subset, DiabetesStatus::Negative)?,
                positive: count_status(&subset, DiabetesStatus::Positive)?,
            })
        })
        .collect()
}

pub fn percentage_aggregates(df: &DataFrame) -> Result<Vec<PercentageAggregate>, ProcessorError> {
    Ok(bracket_aggregates(df)?
        .iter()
        .map(BracketAggregate::percentages)
        .collect())
}

fn count_status(df: &DataFrame, status: DiabetesStatus) -> Result<usize, ProcessorError> {
    let matching = df.clone().lazy().filter(status.predicate()).collect()?;
    Ok(matching.height())
}
