//! Baseline command - Accuracy of always predicting the most frequent state

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    analysis::BaselineEvaluator,
    cli::config::{InputArgs, build_pipeline},
    export::render_baseline,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the most-frequent-state baseline")]
pub struct BaselineArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also write the report to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: BaselineArgs) -> Result<()> {
    let pipeline = build_pipeline(args.input.load_config()?)?;
    let season = pipeline.classify(&args.input.csv)?;
    let report = BaselineEvaluator::evaluate(&season.sequence);

    let text = render_baseline(&report);
    print!("{text}");

    if let Some(path) = &args.output {
        std::fs::write(path, &text)?;
        println!("Naive baseline accuracy written to: {}", path.display());
    }

    Ok(())
}
