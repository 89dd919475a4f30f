//! Rebound Markov: season outcomes as a six-state Markov chain
//!
//! This crate provides:
//! - Classification of box scores into rebound-tier × result states
//! - Raw and Laplace-smoothed transition matrix estimation
//! - Steady-state distribution by power iteration, with return times
//! - One-step prediction accuracy against a most-frequent-state baseline
//! - Text and JSON reports, and a CLI tying it together

pub mod analysis;
pub mod cli;
pub mod error;
pub mod export;
pub mod markov;
pub mod pipeline;
pub mod records;
pub mod sequence;
pub mod state;

pub use analysis::{AccuracyEvaluator, AccuracyReport, BaselineEvaluator, BaselineReport};
pub use error::{Error, Result};
pub use markov::{
    ReturnTime, Smoothing, SolverConfig, StationaryDistribution, SteadyStateSolver,
    TransitionMatrix,
};
pub use pipeline::{AnalysisConfig, AnalysisOutcome, AnalysisPipeline};
pub use records::{GameRecord, MarkerPolicy, RecordReader, RecordSchema, RowError};
pub use sequence::{SequenceBuilder, StateFrequencies, StateSequence};
pub use state::{GameState, Outcome, ReboundTier};
