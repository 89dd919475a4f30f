//! Plain-text analysis reports
//!
//! The layout and decimal places match the files produced by earlier runs so
//! that reports can be diffed across seasons.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{
    Error, Result,
    analysis::{AccuracyReport, BaselineReport},
    markov::{ReturnTime, Smoothing, StationaryDistribution, TransitionMatrix},
    pipeline::AnalysisOutcome,
    state::GameState,
};

pub const RAW_MATRIX_FILE: &str = "transition_matrix_output.txt";
pub const LAPLACE_MATRIX_FILE: &str = "laplace_matrix_output.txt";
pub const STEADY_STATE_FILE: &str = "steady_state_output.txt";
pub const PREDICTION_FILE: &str = "prediction_accuracy_output.txt";
pub const BASELINE_FILE: &str = "naive_baseline_accuracy.txt";

/// Render a transition matrix: 2 decimals for raw, 4 for smoothed.
pub fn render_matrix(matrix: &TransitionMatrix) -> String {
    let (title, precision) = match matrix.smoothing() {
        Smoothing::None => ("Transition Matrix (From → To):", 2),
        Smoothing::Laplace => (
            "Normalized Laplace-Smoothed Transition Matrix (From → To):",
            4,
        ),
    };

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&header_row());
    for from in GameState::ALL {
        out.push_str(from.code());
        out.push(' ');
        for p in matrix.row(from) {
            out.push_str(&format!("{p:5.precision$} "));
        }
        out.push('\n');
    }
    out
}

fn header_row() -> String {
    let codes: Vec<&str> = GameState::ALL.iter().map(|s| s.code()).collect();
    format!("    {}\n", codes.join("     "))
}

pub fn render_steady_state(dist: &StationaryDistribution, smoothing: Smoothing) -> String {
    let mut out = format!("Steady-State Distribution ({smoothing}):\n");
    for (state, p, return_time) in dist.entries() {
        out.push_str(&format!("{state}: {p:.6}\n"));
        match return_time {
            ReturnTime::Finite(steps) => {
                out.push_str(&format!("Expected Return Time: {steps:.6}\n"));
            }
            ReturnTime::Undefined => out.push_str("Expected Return Time: undefined\n"),
        }
    }
    if !dist.converged() {
        out.push_str(&format!(
            "Warning: did not converge within {} iterations\n",
            dist.iterations()
        ));
    }
    out
}

pub fn render_predictions(report: &AccuracyReport) -> String {
    let mut out = String::from("Prediction Accuracy Evaluation:\n");
    out.push_str("Index,CurrentState,ActualNext,PredictedNext,Correct\n");
    for r in &report.records {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            r.index,
            r.current,
            r.actual_next,
            r.predicted_next,
            if r.is_correct() { "YES" } else { "NO" }
        ));
    }
    out.push_str(&format!(
        "\nTotal Predictions: {}\nCorrect Predictions: {}\n",
        report.total, report.correct
    ));
    match report.accuracy {
        Some(a) => out.push_str(&format!("Accuracy: {:.2}%\n", a * 100.0)),
        None => out.push_str("Accuracy: undefined (no transitions)\n"),
    }
    out
}

pub fn render_baseline(report: &BaselineReport) -> String {
    let mut out = String::from("Naive Baseline Accuracy:\n");
    let label = report.most_frequent.map_or("none", |s| s.code());
    out.push_str(&format!("Most Frequent State: {label}\n"));
    match report.accuracy {
        Some(a) => out.push_str(&format!(
            "Accuracy: {:.2}% ({}/{})\n",
            a * 100.0,
            report.correct,
            report.total
        )),
        None => out.push_str("Accuracy: undefined (no transitions)\n"),
    }
    out
}

/// Writes rendered reports into a directory
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create the writer, creating `output_dir` if needed.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            Error::io(
                format!("create output directory '{}'", output_dir.display()),
                e,
            )
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write one report file and return its path.
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let file = File::create(&path)
            .map_err(|e| Error::io(format!("create '{}'", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| Error::io(format!("write '{}'", path.display()), e))?;
        log::info!("wrote {}", path.display());
        Ok(path)
    }

    /// Write all five reports for a completed analysis.
    pub fn write_all(&self, outcome: &AnalysisOutcome) -> Result<Vec<PathBuf>> {
        Ok(vec![
            self.write(RAW_MATRIX_FILE, &render_matrix(&outcome.raw_matrix))?,
            self.write(LAPLACE_MATRIX_FILE, &render_matrix(&outcome.smoothed_matrix))?,
            self.write(
                STEADY_STATE_FILE,
                &render_steady_state(&outcome.stationary, outcome.evaluation_matrix),
            )?,
            self.write(PREDICTION_FILE, &render_predictions(&outcome.accuracy))?,
            self.write(BASELINE_FILE, &render_baseline(&outcome.baseline))?,
        ])
    }
}
