//! CLI infrastructure for the rebound Markov toolkit
//!
//! This module provides the command-line interface for estimating the chain,
//! solving its steady state, and scoring the predictor and baseline.

pub mod commands;
pub mod config;
pub mod output;
