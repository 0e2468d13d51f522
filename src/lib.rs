//! Diabetes prevalence by age bracket.
//!
//! Loads a CSV of patient records, coerces the age column to integers and
//! renders an age histogram plus three bracket charts of diabetes status.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;

pub use config::Config;
pub use pipeline::{run, PipelineReport};
