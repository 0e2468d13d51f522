//! Load, normalize, render.

use crate::charts::{ChartOutput, ChartRenderer};
use crate::config::Config;
use crate::data::{DataLoader, DataProcessor};
use crate::stats::{
    diagnostics_report, schema_summary, BracketAggregate, BracketCount, HistogramBin,
    PercentageAggregate,
};
use anyhow::Context;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything a run produced, in rendering order.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub rows: usize,
    pub histogram: ChartOutput<Vec<HistogramBin>>,
    pub bracket_counts: ChartOutput<Vec<BracketCount>>,
    pub stacked_counts: ChartOutput<Vec<BracketAggregate>>,
    pub stacked_percentages: ChartOutput<Vec<PercentageAggregate>>,
}

impl PipelineReport {
    pub fn chart_paths(&self) -> Vec<PathBuf> {
        vec![
            self.histogram.path.clone(),
            self.bracket_counts.path.clone(),
            self.stacked_counts.path.clone(),
            self.stacked_percentages.path.clone(),
        ]
    }
}

/// Run the whole pipeline once. The first failure aborts the run.
pub fn run(config: &Config) -> anyhow::Result<PipelineReport> {
    let raw = DataLoader::new()
        .load_csv(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    if config.diagnostics {
        println!("{}", diagnostics_report(&raw).context("summarizing raw table")?);
    }

    let table = DataProcessor::normalize_age(&raw).context("normalizing age column")?;
    if config.diagnostics {
        println!("{}", schema_summary(&table));
    }
    info!(rows = table.height(), "age column normalized");

    let report = render_all(&table, &ChartRenderer::new(&config.out_dir, config.dpi))?;

    if config.show {
        for path in report.chart_paths() {
            if let Err(e) = open::that(&path) {
                warn!(path = %path.display(), error = %e, "could not open chart viewer");
            }
        }
    }

    Ok(report)
}

/// Render the four charts in order from a normalized table.
pub fn render_all(table: &DataFrame, renderer: &ChartRenderer) -> anyhow::Result<PipelineReport> {
    let histogram = renderer
        .render_histogram(table)
        .context("rendering age histogram")?;
    let bracket_counts = renderer
        .render_bracket_counts(table)
        .context("rendering bracket counts")?;
    let stacked_counts = renderer
        .render_stacked_counts(table)
        .context("rendering stacked counts")?;
    let stacked_percentages = renderer
        .render_stacked_percentages(table)
        .context("rendering stacked percentages")?;

    info!(out_dir = %renderer.out_dir().display(), "all charts written");
    Ok(PipelineReport {
        rows: table.height(),
        histogram,
        bracket_counts,
        stacked_counts,
        stacked_percentages,
    })
}
