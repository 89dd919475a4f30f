//! JSON summary of a complete run

use std::{fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    markov::{ReturnTime, Smoothing},
    pipeline::AnalysisOutcome,
    state::{GameState, STATE_COUNT},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub source: String,
    pub games: usize,
    pub frequencies: Vec<StateCount>,
    pub raw_matrix: MatrixSection,
    pub smoothed_matrix: MatrixSection,
    pub steady_state: SteadyStateSection,
    pub prediction: AccuracySection,
    pub baseline: BaselineSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCount {
    pub state: GameState,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixSection {
    pub smoothing: Smoothing,
    pub transitions_observed: usize,
    pub rows: [[f64; STATE_COUNT]; STATE_COUNT],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteadyStateSection {
    pub matrix: Smoothing,
    pub converged: bool,
    pub iterations: usize,
    pub states: Vec<SteadyStateEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteadyStateEntry {
    pub state: GameState,
    pub probability: f64,
    pub return_time: ReturnTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracySection {
    pub total: usize,
    pub correct: usize,
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineSection {
    pub most_frequent: Option<GameState>,
    pub total: usize,
    pub correct: usize,
    pub accuracy: Option<f64>,
}

impl RunSummary {
    pub fn from_outcome(outcome: &AnalysisOutcome) -> Self {
        let matrix_section = |m: &crate::markov::TransitionMatrix| MatrixSection {
            smoothing: m.smoothing(),
            transitions_observed: m.transitions_observed(),
            rows: *m.grid(),
        };

        RunSummary {
            source: outcome.source.display().to_string(),
            games: outcome.sequence.len(),
            frequencies: outcome
                .frequencies
                .iter()
                .map(|(state, count)| StateCount { state, count })
                .collect(),
            raw_matrix: matrix_section(&outcome.raw_matrix),
            smoothed_matrix: matrix_section(&outcome.smoothed_matrix),
            steady_state: SteadyStateSection {
                matrix: outcome.evaluation_matrix,
                converged: outcome.stationary.converged(),
                iterations: outcome.stationary.iterations(),
                states: outcome
                    .stationary
                    .entries()
                    .map(|(state, probability, return_time)| SteadyStateEntry {
                        state,
                        probability,
                        return_time,
                    })
                    .collect(),
            },
            prediction: AccuracySection {
                total: outcome.accuracy.total,
                correct: outcome.accuracy.correct,
                accuracy: outcome.accuracy.accuracy,
            },
            baseline: BaselineSection {
                most_frequent: outcome.baseline.most_frequent,
                total: outcome.baseline.total,
                correct: outcome.baseline.correct,
                accuracy: outcome.baseline.accuracy,
            },
        }
    }

    /// Write as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create summary '{}'", path.display()), e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        log::info!("wrote summary {}", path.display());
        Ok(())
    }
}
