//! Matrix command - Print raw and/or smoothed transition matrices

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::config::{InputArgs, build_pipeline},
    export::render_matrix,
    markov::{Smoothing, TransitionMatrix},
};

#[derive(Parser, Debug)]
#[command(about = "Estimate transition matrices")]
pub struct MatrixArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only show this variant (both are shown by default)
    #[arg(long, value_enum)]
    pub smoothing: Option<Smoothing>,

    /// Also write the rendered matrices to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: MatrixArgs) -> Result<()> {
    let pipeline = build_pipeline(args.input.load_config()?)?;
    let season = pipeline.classify(&args.input.csv)?;

    let variants: Vec<Smoothing> = match args.smoothing {
        Some(s) => vec![s],
        None => vec![Smoothing::None, Smoothing::Laplace],
    };

    let rendered: Vec<String> = variants
        .into_iter()
        .map(|s| render_matrix(&TransitionMatrix::estimate(&season.sequence, s)))
        .collect();
    let text = rendered.join("\n");

    println!("{text}");

    if let Some(path) = &args.output {
        std::fs::write(path, &text)?;
        println!("Matrices written to: {}", path.display());
    }

    Ok(())
}
