//! Steady-state command - Stationary distribution and expected return times

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::config::{InputArgs, SolverArgs, apply_smoothing, build_pipeline},
    export::render_steady_state,
    markov::{Smoothing, SteadyStateSolver, TransitionMatrix},
};

#[derive(Parser, Debug)]
#[command(about = "Solve for the steady-state distribution")]
pub struct SteadyStateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Matrix to solve (defaults to the configured evaluation matrix)
    #[arg(long, value_enum)]
    pub smoothing: Option<Smoothing>,

    /// Also write the report to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: SteadyStateArgs) -> Result<()> {
    let config = apply_smoothing(args.solver.apply(args.input.load_config()?), args.smoothing);
    let pipeline = build_pipeline(config)?;
    let config = pipeline.config();

    let season = pipeline.classify(&args.input.csv)?;
    let matrix = TransitionMatrix::estimate(&season.sequence, config.evaluation_matrix);
    let dist = SteadyStateSolver::new(config.solver)?.solve(&matrix);

    let text = render_steady_state(&dist, config.evaluation_matrix);
    print!("{text}");
    println!(
        "({} iterations, tolerance {:e})",
        dist.iterations(),
        config.solver.tolerance
    );

    if let Some(path) = &args.output {
        std::fs::write(path, &text)?;
        println!("Steady-state distribution written to: {}", path.display());
    }

    Ok(())
}
