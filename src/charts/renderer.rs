//! Static Chart Renderer
//! Draws the age charts as PNG files with plotters.
//!
//! Charts:
//! 1. Age histogram (30 equal-width bins)
//! 2. Rows per age bracket
//! 3. Rows per age bracket, stacked by diabetes status
//! 4. Same as 3, as percentages of each bracket

use crate::charts::style::*;
use crate::data::AGE_COLUMN;
use crate::stats::{
    bracket_aggregates, bracket_counts, histogram, percentage_aggregates, AgeBracket,
    BracketAggregate, BracketCount, DiabetesStatus, HistogramBin, PercentageAggregate,
    StatsCalculator, AGE_HISTOGRAM_BINS,
};
use plotters::coord::ranged1d::SegmentedCoord;
use plotters::coord::types::{RangedCoordf64, RangedCoordi32};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::info;

pub const HISTOGRAM_FILE: &str = "age_histogram.png";
pub const BRACKET_COUNT_FILE: &str = "age_brackets.png";
pub const STACKED_COUNT_FILE: &str = "age_brackets_diabetes.png";
pub const STACKED_PERCENT_FILE: &str = "age_brackets_diabetes_pct.png";

/// Room above the tallest bar for its value label.
const HEADROOM: f64 = 1.15;
/// Horizontal gap between a bar and its segment edge, in pixels.
const BAR_GAP: u32 = 14;

type BarCoord = Cartesian2d<SegmentedCoord<RangedCoordi32>, RangedCoordf64>;

/// A written chart and the numbers drawn in it.
#[derive(Debug, Clone)]
pub struct ChartOutput<T> {
    pub path: PathBuf,
    pub data: T,
}

/// Writes each chart into `out_dir`, sized by `dpi`.
pub struct ChartRenderer {
    out_dir: PathBuf,
    dpi: u32,
}

impl ChartRenderer {
    pub fn new(out_dir: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            dpi,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Age distribution over the observed range.
    pub fn render_histogram(
        &self,
        df: &DataFrame,
    ) -> Result<ChartOutput<Vec<HistogramBin>>, ChartError> {
        let ages = StatsCalculator::column_values(df, AGE_COLUMN)?;
        let bins = histogram(&ages, AGE_HISTOGRAM_BINS);

        let path = self.prepare(HISTOGRAM_FILE)?;
        Self::draw_histogram(&path, FigureSize::HISTOGRAM.pixels(self.dpi), &bins)?;

        info!(path = %path.display(), bins = bins.len(), "histogram written");
        Ok(ChartOutput { path, data: bins })
    }

    /// One bar per age bracket with its row count above it.
    pub fn render_bracket_counts(
        &self,
        df: &DataFrame,
    ) -> Result<ChartOutput<Vec<BracketCount>>, ChartError> {
        let counts = bracket_counts(df)?;

        let path = self.prepare(BRACKET_COUNT_FILE)?;
        Self::draw_bracket_counts(&path, FigureSize::BAR.pixels(self.dpi), &counts)?;

        info!(path = %path.display(), "bracket count chart written");
        Ok(ChartOutput { path, data: counts })
    }

    /// Negative and positive counts stacked per bracket, total above each stack.
    pub fn render_stacked_counts(
        &self,
        df: &DataFrame,
    ) -> Result<ChartOutput<Vec<BracketAggregate>>, ChartError> {
        let aggregates = bracket_aggregates(df)?;

        let path = self.prepare(STACKED_COUNT_FILE)?;
        Self::draw_stacked_counts(&path, FigureSize::BAR.pixels(self.dpi), &aggregates)?;

        info!(path = %path.display(), "stacked count chart written");
        Ok(ChartOutput {
            path,
            data: aggregates,
        })
    }

    /// Status shares stacked to 100% per bracket.
    ///
    /// Empty brackets are drawn as zero-height bars without labels.
    pub fn render_stacked_percentages(
        &self,
        df: &DataFrame,
    ) -> Result<ChartOutput<Vec<PercentageAggregate>>, ChartError> {
        let percentages = percentage_aggregates(df)?;

        let path = self.prepare(STACKED_PERCENT_FILE)?;
        Self::draw_stacked_percentages(&path, FigureSize::BAR.pixels(self.dpi), &percentages)?;

        info!(path = %path.display(), "stacked percentage chart written");
        Ok(ChartOutput {
            path,
            data: percentages,
        })
    }

    fn prepare(&self, file_name: &str) -> Result<PathBuf, ChartError> {
        std::fs::create_dir_all(&self.out_dir)?;
        Ok(self.out_dir.join(file_name))
    }

    fn draw_histogram(
        path: &Path,
        size: (u32, u32),
        bins: &[HistogramBin],
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let (x_min, x_max) = match (bins.first(), bins.last()) {
            (Some(first), Some(last)) => (first.start, last.end),
            _ => (0.0, 1.0),
        };
        let tallest = bins.iter().map(|b| b.count).max().unwrap_or(0);

        let mut chart = ChartBuilder::on(&root)
            .caption("Age distribution", (FONT_FAMILY, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_top(tallest as f64))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(TRANSPARENT)
            .x_desc("Age")
            .y_desc("Frequency")
            .axis_desc_style((FONT_FAMILY, AXIS_DESC_SIZE))
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.start, 0.0), (b.end, b.count as f64)],
                ROYAL_BLUE.mix(BAR_ALPHA).filled(),
            )
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new(
                [(b.start, 0.0), (b.end, b.count as f64)],
                BLACK.stroke_width(1),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_bracket_counts(
        path: &Path,
        size: (u32, u32),
        counts: &[BracketCount],
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let tallest = counts.iter().map(|c| c.total).max().unwrap_or(0);
        let mut chart = Self::bar_chart(
            &root,
            "Age distribution by bracket",
            "People",
            y_top(tallest as f64),
        )?;

        chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
            let (left, right) = segment(i);
            let color = BRACKET_PALETTE[i % BRACKET_PALETTE.len()];
            bar([(left, 0.0), (right, c.total as f64)], color.mix(BAR_ALPHA).filled())
        }))?;

        let label_style = above_bar_style();
        chart.draw_series(counts.iter().enumerate().map(|(i, c)| {
            Text::new(
                c.total.to_string(),
                (SegmentValue::CenterOf(i as i32), c.total as f64),
                label_style.clone(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    fn draw_stacked_counts(
        path: &Path,
        size: (u32, u32),
        aggregates: &[BracketAggregate],
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let tallest = aggregates.iter().map(|a| a.total()).max().unwrap_or(0);
        let mut chart = Self::bar_chart(
            &root,
            "Age brackets by diabetes status",
            "People",
            y_top(tallest as f64),
        )?;

        let stacks: Vec<(f64, f64)> = aggregates
            .iter()
            .map(|a| (a.negative as f64, a.positive as f64))
            .collect();
        Self::draw_stacks(&mut chart, &stacks)?;

        let label_style = above_bar_style();
        chart.draw_series(aggregates.iter().enumerate().map(|(i, a)| {
            Text::new(
                a.total().to_string(),
                (SegmentValue::CenterOf(i as i32), a.total() as f64),
                label_style.clone(),
            )
        }))?;

        Self::draw_legend(&mut chart)?;
        root.present()?;
        Ok(())
    }

    fn draw_stacked_percentages(
        path: &Path,
        size: (u32, u32),
        percentages: &[PercentageAggregate],
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = Self::bar_chart(
            &root,
            "Diabetes share by age bracket",
            "Percent (%)",
            y_top(100.0),
        )?;

        let stacks: Vec<(f64, f64)> = percentages
            .iter()
            .map(|p| (p.negative_pct, p.positive_pct))
            .collect();
        Self::draw_stacks(&mut chart, &stacks)?;

        let label_style = TextStyle::from((FONT_FAMILY, SEGMENT_LABEL_SIZE).into_font())
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let labels = percentages
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
            .flat_map(|(i, p)| {
                let x = SegmentValue::CenterOf(i as i32);
                [
                    (x.clone(), p.negative_pct / 2.0, p.negative_pct),
                    (x, p.negative_pct + p.positive_pct / 2.0, p.positive_pct),
                ]
            });
        chart.draw_series(labels.map(|(x, y, pct)| {
            Text::new(format!("{pct:.1}%"), (x, y), label_style.clone())
        }))?;

        Self::draw_legend(&mut chart)?;
        root.present()?;
        Ok(())
    }

    /// Axes, ticks and captions shared by the bracket charts.
    fn bar_chart<'a, DB: DrawingBackend + 'a>(
        root: &'a DrawingArea<DB, Shift>,
        title: &str,
        y_desc: &str,
        y_max: f64,
    ) -> Result<ChartContext<'a, DB, BarCoord>, ChartError> {
        // Integer ranges are inclusive, so 0..last yields one segment per bracket.
        let last = AgeBracket::ALL.len() as i32 - 1;

        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT_FAMILY, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d((0..last).into_segmented(), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(BLACK.mix(0.15))
            .light_line_style(TRANSPARENT)
            .x_labels(AgeBracket::ALL.len())
            .x_label_formatter(&bracket_tick)
            .y_label_formatter(&|v| format!("{v:.0}"))
            .x_desc("Age bracket")
            .y_desc(y_desc)
            .axis_desc_style((FONT_FAMILY, AXIS_DESC_SIZE))
            .draw()?;

        Ok(chart)
    }

    /// Negative segment at the base, positive stacked on top, one stack per bracket.
    fn draw_stacks<'a, DB: DrawingBackend + 'a>(
        chart: &mut ChartContext<'a, DB, BarCoord>,
        stacks: &[(f64, f64)],
    ) -> Result<(), ChartError> {
        chart
            .draw_series(stacks.iter().enumerate().map(|(i, &(negative, _))| {
                let (left, right) = segment(i);
                bar(
                    [(left, 0.0), (right, negative)],
                    NEGATIVE_COLOR.mix(BAR_ALPHA).filled(),
                )
            }))?
            .label(DiabetesStatus::Negative.label())
            .legend(|(x, y)| legend_swatch(x, y, NEGATIVE_COLOR));

        chart
            .draw_series(stacks.iter().enumerate().map(|(i, &(negative, positive))| {
                let (left, right) = segment(i);
                bar(
                    [(left, negative), (right, negative + positive)],
                    POSITIVE_COLOR.mix(BAR_ALPHA).filled(),
                )
            }))?
            .label(DiabetesStatus::Positive.label())
            .legend(|(x, y)| legend_swatch(x, y, POSITIVE_COLOR));

        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a>(
        chart: &mut ChartContext<'a, DB, BarCoord>,
    ) -> Result<(), ChartError> {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, SEGMENT_LABEL_SIZE))
            .draw()?;
        Ok(())
    }
}

fn y_top(tallest: f64) -> f64 {
    if tallest > 0.0 {
        tallest * HEADROOM
    } else {
        1.0
    }
}

/// Bar filling a bracket segment, inset from its edges.
fn bar<C>(corners: [C; 2], style: ShapeStyle) -> Rectangle<C> {
    let mut rect = Rectangle::new(corners, style);
    rect.set_margin(0, 0, BAR_GAP, BAR_GAP);
    rect
}

/// Left and right edge of the segment holding bracket `i`.
fn segment(i: usize) -> (SegmentValue<i32>, SegmentValue<i32>) {
    let i = i as i32;
    (SegmentValue::Exact(i), SegmentValue::Exact(i + 1))
}

fn bracket_tick(value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| AgeBracket::ALL.get(i))
            .map(|b| b.label().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn above_bar_style() -> TextStyle<'static> {
    TextStyle::from((FONT_FAMILY, VALUE_LABEL_SIZE).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom))
}

fn legend_swatch(x: i32, y: i32, color: RGBColor) -> Rectangle<(i32, i32)> {
    Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.mix(BAR_ALPHA).filled())
}
