//! Rebound Markov CLI - Season analysis of rebound tiers and results
//!
//! This CLI provides a unified interface for:
//! - Estimating raw and Laplace-smoothed transition matrices
//! - Solving the chain's steady state and expected return times
//! - Scoring the one-step predictor against a most-frequent baseline
//! - Writing the full report set for a season in one go
//!
//! Diagnostics go to stderr through `env_logger`; set `RUST_LOG=debug` for
//! more detail.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rebound_markov::cli::commands::{baseline, evaluate, matrix, run, steady_state};

#[derive(Parser)]
#[command(name = "rebound")]
#[command(version, about = "Markov analysis of games by rebound tier and result", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis and write all reports
    Run(run::RunArgs),

    /// Print raw and/or Laplace-smoothed transition matrices
    Matrix(matrix::MatrixArgs),

    /// Solve for the stationary distribution
    SteadyState(steady_state::SteadyStateArgs),

    /// Score next-game predictions from the transition matrix
    Evaluate(evaluate::EvaluateArgs),

    /// Score the most-frequent-state baseline
    Baseline(baseline::BaselineArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Matrix(args) => matrix::execute(args),
        Commands::SteadyState(args) => steady_state::execute(args),
        Commands::Evaluate(args) => evaluate::execute(args),
        Commands::Baseline(args) => baseline::execute(args),
    }
}
