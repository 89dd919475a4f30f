//! Run command - Full analysis with all reports written to disk

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{InputArgs, SolverArgs, apply_smoothing, build_pipeline},
        output::{format_score, print_kv, print_section, print_subsection},
    },
    export::{ReportWriter, RunSummary},
    markov::{ReturnTime, Smoothing},
    pipeline::AnalysisOutcome,
};

const DEFAULT_SUMMARY_FILE: &str = "summary.json";

#[derive(Parser, Debug)]
#[command(about = "Run the full analysis and write every report")]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub solver: SolverArgs,

    /// Matrix used for the steady state and the predictor
    #[arg(long, value_enum)]
    pub smoothing: Option<Smoothing>,

    /// Directory for the text reports
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Also write a JSON summary (file, stem, or directory ending in '/')
    #[arg(long)]
    pub summary: Option<String>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = args.input.load_config()?;
    let config = apply_smoothing(args.solver.apply(config), args.smoothing);
    let pipeline = build_pipeline(config)?;

    println!("Analyzing: {}", args.input.csv.display());
    let outcome = pipeline
        .run(&args.input.csv)
        .with_context(|| format!("Analysis of {} failed", args.input.csv.display()))?;

    print_outcome(&outcome);

    let writer = ReportWriter::new(&args.output_dir)?;
    let written = writer.write_all(&outcome)?;
    print_subsection(&format!("Reports in {}", writer.output_dir().display()));
    for path in &written {
        let name = path.file_name().unwrap_or(path.as_os_str());
        println!("  ✓ {}", name.to_string_lossy());
    }

    if let Some(spec) = &args.summary {
        let path = resolve_summary_path(spec)?;
        RunSummary::from_outcome(&outcome)
            .write(&path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("  ✓ {}", path.display());
    }

    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome) {
    print_section("Season");
    print_kv("Games", &outcome.sequence.len().to_string());
    print_kv(
        "Transitions",
        &outcome.sequence.transition_count().to_string(),
    );

    print_subsection("State frequencies");
    for (state, count) in outcome.frequencies.iter() {
        print_kv(state.name(), &count.to_string());
    }

    print_subsection(&format!("Steady state ({})", outcome.evaluation_matrix));
    for (state, p, return_time) in outcome.stationary.entries() {
        let rt = match return_time {
            ReturnTime::Finite(steps) => format!("{steps:.2} games"),
            ReturnTime::Undefined => "undefined".to_string(),
        };
        print_kv(state.name(), &format!("{p:.4} (return {rt})"));
    }
    if !outcome.stationary.converged() {
        println!(
            "  ⚠ did not converge within {} iterations",
            outcome.stationary.iterations()
        );
    }

    print_subsection("Accuracy");
    print_kv(
        "Markov predictor",
        &format_score(
            outcome.accuracy.accuracy,
            outcome.accuracy.correct,
            outcome.accuracy.total,
        ),
    );
    let mode = outcome
        .baseline
        .most_frequent
        .map_or("none", |s| s.name());
    print_kv(
        "Baseline",
        &format!(
            "{}, always {mode}",
            format_score(
                outcome.baseline.accuracy,
                outcome.baseline.correct,
                outcome.baseline.total,
            )
        ),
    );
}

/// Interpret `--summary`: a trailing separator means a directory that gets
/// the default file name, and a path without extension gets `.json`.
pub fn resolve_summary_path(spec: &str) -> Result<PathBuf> {
    if spec.ends_with('/') || spec.ends_with(std::path::MAIN_SEPARATOR) {
        let dir = Path::new(spec);
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create summary directory {}", dir.display()))?;
        return Ok(dir.join(DEFAULT_SUMMARY_FILE));
    }

    let path = PathBuf::from(spec);
    if path.extension().is_none() {
        return Ok(path.with_extension("json"));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stem_gets_json_extension() {
        let path = resolve_summary_path("out/season").unwrap();
        assert_eq!(path, PathBuf::from("out/season.json"));
        let path = resolve_summary_path("report.txt").unwrap();
        assert_eq!(path, PathBuf::from("report.txt"));
    }

    #[test]
    fn test_summary_directory_gets_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let spec = format!("{}/nested/", tmp.path().display());
        let path = resolve_summary_path(&spec).unwrap();
        assert!(path.ends_with("nested/summary.json"));
        assert!(path.parent().unwrap().is_dir());
    }
}
