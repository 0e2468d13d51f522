//! Charts module - Chart rendering

mod renderer;
mod style;

pub use renderer::{
    ChartOutput, ChartRenderer, BRACKET_COUNT_FILE, HISTOGRAM_FILE, STACKED_COUNT_FILE,
    STACKED_PERCENT_FILE,
};
pub use style::{ChartError, FigureSize};
