//! Shared configuration arguments for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    markov::Smoothing,
    pipeline::{AnalysisConfig, AnalysisPipeline},
    records::MarkerPolicy,
};

/// Input options common to every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Season box-score CSV (header row, result in column 6, rebounds in column 25)
    pub csv: PathBuf,

    /// JSON analysis config; flags below override its fields
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Reject result markers other than the win/loss markers instead of counting them as losses
    #[arg(long)]
    pub strict_results: bool,
}

impl InputArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    pub fn load_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AnalysisConfig::default(),
        };
        if self.strict_results {
            config = config.with_marker_policy(MarkerPolicy::Strict);
        }
        Ok(config)
    }
}

/// Solver overrides shared by commands that compute a steady state
#[derive(Args, Debug, Clone, Default)]
pub struct SolverArgs {
    /// Maximum power-iteration steps
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Convergence tolerance on the largest per-state change
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl SolverArgs {
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(n) = self.max_iterations {
            config = config.with_max_iterations(n);
        }
        if let Some(t) = self.tolerance {
            config = config.with_tolerance(t);
        }
        config
    }
}

/// Apply an optional `--smoothing` override.
pub fn apply_smoothing(config: AnalysisConfig, smoothing: Option<Smoothing>) -> AnalysisConfig {
    match smoothing {
        Some(s) => config.with_evaluation_matrix(s),
        None => config,
    }
}

/// Build a pipeline, attaching context to configuration errors.
pub fn build_pipeline(config: AnalysisConfig) -> Result<AnalysisPipeline> {
    AnalysisPipeline::new(config).context("Invalid analysis configuration")
}
