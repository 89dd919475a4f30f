//! Analysis pipeline
//!
//! Wires the stages together for one season file:
//! - reading and classifying box scores
//! - estimating raw and smoothed transition matrices
//! - solving for the steady state
//! - scoring the predictor and the baseline

pub mod analysis;
pub mod config;

pub use analysis::{AnalysisOutcome, AnalysisPipeline};
pub use config::AnalysisConfig;
