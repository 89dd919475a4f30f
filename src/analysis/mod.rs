//! Predictive evaluation of the estimated chain
//!
//! This module scores the one-step Markov predictor and the naive
//! most-frequent-state baseline against the observed season.

pub mod accuracy;
pub mod baseline;

pub use accuracy::{AccuracyEvaluator, AccuracyReport, PredictionRecord};
pub use baseline::{BaselineEvaluator, BaselineReport};
