//! One-step-lookahead prediction accuracy
//!
//! Replays the season: at each game, the predicted next state is the argmax
//! of the current state's transition row, scored against what actually
//! happened next.

use serde::{Deserialize, Serialize};

use crate::{markov::TransitionMatrix, sequence::StateSequence, state::GameState};

/// One scored prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Position of `current` in the sequence.
    pub index: usize,
    pub current: GameState,
    pub actual_next: GameState,
    pub predicted_next: GameState,
}

impl PredictionRecord {
    pub fn is_correct(&self) -> bool {
        self.predicted_next == self.actual_next
    }
}

/// Per-step predictions plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub records: Vec<PredictionRecord>,
    pub total: usize,
    pub correct: usize,
    /// `None` when the sequence had no transitions to score.
    pub accuracy: Option<f64>,
}

impl AccuracyReport {
    fn from_records(records: Vec<PredictionRecord>) -> Self {
        let total = records.len();
        let correct = records.iter().filter(|r| r.is_correct()).count();
        AccuracyReport {
            records,
            total,
            correct,
            accuracy: ratio(correct, total),
        }
    }

    /// Only the predictions made from `current`, with totals recomputed.
    pub fn restricted_to(&self, current: GameState) -> AccuracyReport {
        Self::from_records(
            self.records
                .iter()
                .filter(|r| r.current == current)
                .copied()
                .collect(),
        )
    }
}

/// Scores a transition matrix against the sequence it describes
#[derive(Debug, Clone, Copy)]
pub struct AccuracyEvaluator<'a> {
    matrix: &'a TransitionMatrix,
}

impl<'a> AccuracyEvaluator<'a> {
    pub fn new(matrix: &'a TransitionMatrix) -> Self {
        Self { matrix }
    }

    pub fn predict(&self, current: GameState) -> GameState {
        self.matrix.most_likely_next(current)
    }

    pub fn evaluate(&self, sequence: &StateSequence) -> AccuracyReport {
        let records: Vec<PredictionRecord> = sequence
            .transitions()
            .enumerate()
            .map(|(index, (current, actual_next))| PredictionRecord {
                index,
                current,
                actual_next,
                predicted_next: self.predict(current),
            })
            .collect();

        let report = AccuracyReport::from_records(records);
        match report.accuracy {
            Some(a) => log::info!(
                "prediction accuracy {:.2}% ({}/{})",
                a * 100.0,
                report.correct,
                report.total
            ),
            None => log::warn!("prediction accuracy undefined: sequence has fewer than 2 games"),
        }
        report
    }
}

pub(crate) fn ratio(correct: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(correct as f64 / total as f64)
    }
}
