//! Run configuration.

use std::path::PathBuf;

/// Input file read when none is given.
pub const DEFAULT_INPUT: &str = "diabetes_prediction_dataset.csv";
/// Directory charts are written to when none is given.
pub const DEFAULT_OUT_DIR: &str = "charts";
pub const DEFAULT_DPI: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Comma separated input with `age` and `diabetes` columns.
    pub input: PathBuf,
    pub out_dir: PathBuf,
    /// Pixels per inch of figure size.
    pub dpi: u32,
    /// Print table dumps and summary statistics to stdout.
    pub diagnostics: bool,
    /// Open each chart with the system viewer once all are written.
    pub show: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            dpi: DEFAULT_DPI,
            diagnostics: true,
            show: false,
        }
    }
}
