//! Naive baseline: always predict the season's most frequent state

use serde::{Deserialize, Serialize};

use super::accuracy::ratio;
use crate::{sequence::StateSequence, state::GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineReport {
    /// `None` only for an empty sequence.
    pub most_frequent: Option<GameState>,
    pub total: usize,
    pub correct: usize,
    pub accuracy: Option<f64>,
}

pub struct BaselineEvaluator;

impl BaselineEvaluator {
    pub fn evaluate(sequence: &StateSequence) -> BaselineReport {
        let most_frequent = sequence.frequencies().most_frequent();

        let total = sequence.transition_count();
        let correct = sequence
            .transitions()
            .filter(|&(_, actual_next)| Some(actual_next) == most_frequent)
            .count();
        let accuracy = ratio(correct, total);

        if let (Some(state), Some(a)) = (most_frequent, accuracy) {
            log::info!(
                "baseline '{state}' accuracy {:.2}% ({correct}/{total})",
                a * 100.0
            );
        }

        BaselineReport {
            most_frequent,
            total,
            correct,
            accuracy,
        }
    }
}
