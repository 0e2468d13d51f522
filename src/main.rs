//! diabetes-brackets - Diabetes prevalence by age bracket
//!
//! Reads the dataset, prints diagnostics and writes the age charts.

use clap::Parser;
use diabetes_brackets::config::{Config, DEFAULT_DPI, DEFAULT_INPUT, DEFAULT_OUT_DIR};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(author, version, about = "Diabetes prevalence by age bracket", long_about = None)]
struct Cli {
    /// CSV file with `age` and `diabetes` columns
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Directory the charts are written to
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Chart resolution in pixels per inch
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,

    /// Open the charts with the system viewer when done
    #[arg(long)]
    show: bool,

    /// Skip the table dumps and summary statistics
    #[arg(long)]
    quiet: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            out_dir: cli.out_dir,
            dpi: cli.dpi,
            diagnostics: !cli.quiet,
            show: cli.show,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_target(false)
        .init();

    let config = Config::from(Cli::parse());
    let report = diabetes_brackets::run(&config)?;

    for path in report.chart_paths() {
        println!("{}", path.display());
    }
    Ok(())
}
