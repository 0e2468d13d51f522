//! Chart styling and error types shared by the renderers.

use crate::data::ProcessorError;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::style::RGBColor;
use plotters_backend::DrawingErrorKind;
use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Fill colors are drawn at this opacity.
pub const BAR_ALPHA: f64 = 0.7;

pub const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);
pub const BAR_RED: RGBColor = RGBColor(255, 0, 0);

/// One color per age bracket, in bracket order.
pub const BRACKET_PALETTE: [RGBColor; 4] = [
    RGBColor(0, 0, 255),   // Blue
    RGBColor(0, 128, 0),   // Green
    RGBColor(255, 165, 0), // Orange
    RGBColor(255, 0, 0),   // Red
];

/// Diabetes negative segments.
pub const NEGATIVE_COLOR: RGBColor = ROYAL_BLUE;
/// Diabetes positive segments.
pub const POSITIVE_COLOR: RGBColor = BAR_RED;

pub const FONT_FAMILY: &str = "sans-serif";
pub const TITLE_SIZE: u32 = 22;
pub const AXIS_DESC_SIZE: u32 = 16;
pub const VALUE_LABEL_SIZE: u32 = 14;
pub const SEGMENT_LABEL_SIZE: u32 = 12;

/// Figure size in inches, before scaling by dpi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    pub const HISTOGRAM: FigureSize = FigureSize {
        width: 10.0,
        height: 5.0,
    };
    pub const BAR: FigureSize = FigureSize {
        width: 8.0,
        height: 5.0,
    };

    pub fn pixels(self, dpi: u32) -> (u32, u32) {
        (
            (self.width * dpi as f64).round() as u32,
            (self.height * dpi as f64).round() as u32,
        )
    }
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to prepare chart output: {0}")]
    Io(#[from] io::Error),
    #[error("No usable font: {0}")]
    Font(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error(transparent)]
    Data(#[from] ProcessorError),
}

impl<E: StdError + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        match err {
            DrawingAreaErrorKind::BackendError(DrawingErrorKind::FontError(e)) => {
                ChartError::Font(e.to_string())
            }
            other => ChartError::Draw(other.to_string()),
        }
    }
}

impl From<polars::prelude::PolarsError> for ChartError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        ChartError::Data(ProcessorError::from(err))
    }
}
