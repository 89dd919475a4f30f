//! Evaluate command - Score the one-step Markov predictor

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    analysis::AccuracyEvaluator,
    cli::{
        config::{InputArgs, apply_smoothing, build_pipeline},
        output::{format_score, print_section, print_stats_table},
    },
    export::render_predictions,
    markov::{Smoothing, TransitionMatrix},
    state::GameState,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate next-game prediction accuracy")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Matrix the predictor reads (defaults to the configured evaluation matrix)
    #[arg(long, value_enum)]
    pub smoothing: Option<Smoothing>,

    /// Write the per-game prediction log to this file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Only score predictions made from this state (code or name, e.g. `HL`)
    #[arg(long, value_name = "STATE")]
    pub from: Option<GameState>,

    /// Print every prediction, not just the totals
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = apply_smoothing(args.input.load_config()?, args.smoothing);
    let pipeline = build_pipeline(config)?;
    let smoothing = pipeline.config().evaluation_matrix;

    let season = pipeline.classify(&args.input.csv)?;
    let matrix = TransitionMatrix::estimate(&season.sequence, smoothing);
    let mut report = AccuracyEvaluator::new(&matrix).evaluate(&season.sequence);
    if let Some(state) = args.from {
        report = report.restricted_to(state);
    }

    if args.verbose {
        for r in &report.records {
            println!(
                "{:>4}  {} -> {}  predicted {}  {}",
                r.index,
                r.current,
                r.actual_next,
                r.predicted_next,
                if r.is_correct() { "✓" } else { "✗" }
            );
        }
    }

    match args.from {
        Some(state) => print_section(&format!(
            "Prediction accuracy from {} ({smoothing})",
            state.name()
        )),
        None => print_section(&format!("Prediction accuracy ({smoothing})")),
    }
    print_stats_table(&[
        ("Predictions", report.total.to_string()),
        (
            "Accuracy",
            format_score(report.accuracy, report.correct, report.total),
        ),
    ]);

    if let Some(path) = &args.log {
        std::fs::write(path, render_predictions(&report))?;
        println!("\nPrediction accuracy written to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_accepts_codes_and_names() {
        let args = EvaluateArgs::parse_from(["evaluate", "season.csv", "--from", "hl"]);
        assert_eq!(args.from, Some(GameState::HighLoss));

        let args = EvaluateArgs::parse_from(["evaluate", "season.csv", "--from", "MediumWin"]);
        assert_eq!(args.from, Some(GameState::MediumWin));
    }

    #[test]
    fn test_from_rejects_unknown_state() {
        let err = EvaluateArgs::try_parse_from(["evaluate", "season.csv", "--from", "XX"])
            .unwrap_err();
        assert!(err.to_string().contains("invalid state code 'XX'"));
    }
}
