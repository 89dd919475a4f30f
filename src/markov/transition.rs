//! Transition matrix estimation
//!
//! Counts consecutive state pairs and normalises each row. Two variants are
//! supported: raw empirical frequencies, and Laplace (add-one) smoothing,
//! which seeds every cell with a pseudo-count of 1 before counting.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    sequence::StateSequence,
    state::{GameState, STATE_COUNT},
};

/// Dense row-major 6×6 grid indexed by canonical state order.
pub type Grid = [[f64; STATE_COUNT]; STATE_COUNT];

/// Count adjustment applied before row normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Smoothing {
    /// Empirical frequencies; unseen rows stay all zero.
    #[value(name = "raw", alias = "none")]
    #[serde(alias = "raw")]
    None,
    /// Add-one smoothing; every cell strictly positive.
    #[default]
    Laplace,
}

impl Smoothing {
    /// Initial value of every cell before counting.
    pub fn pseudo_count(self) -> f64 {
        match self {
            Smoothing::None => 0.0,
            Smoothing::Laplace => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Smoothing::None => "raw",
            Smoothing::Laplace => "Laplace-smoothed",
        }
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Smoothing {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "raw" => Ok(Smoothing::None),
            "laplace" | "smoothed" => Ok(Smoothing::Laplace),
            other => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown smoothing '{other}'. Use 'raw' or 'laplace'"),
            }),
        }
    }
}

/// Mutable accumulator of pair counts; consumed by [`TransitionCounts::normalize`]
#[derive(Debug, Clone)]
pub struct TransitionCounts {
    cells: Grid,
    smoothing: Smoothing,
    observed: usize,
}

impl TransitionCounts {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            cells: [[smoothing.pseudo_count(); STATE_COUNT]; STATE_COUNT],
            smoothing,
            observed: 0,
        }
    }

    pub fn record(&mut self, from: GameState, to: GameState) {
        self.cells[from.index()][to.index()] += 1.0;
        self.observed += 1;
    }

    /// Divide each row by its sum. Rows summing to zero are left at zero.
    pub fn normalize(self) -> TransitionMatrix {
        let mut cells = self.cells;
        for row in cells.iter_mut() {
            let total: f64 = row.iter().sum();
            if total == 0.0 {
                continue;
            }
            for cell in row.iter_mut() {
                *cell /= total;
            }
        }
        TransitionMatrix {
            cells,
            smoothing: self.smoothing,
            observed: self.observed,
        }
    }
}

/// Row-stochastic transition matrix over [`GameState::ALL`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionMatrix {
    cells: Grid,
    smoothing: Smoothing,
    observed: usize,
}

impl TransitionMatrix {
    /// Estimate the matrix from consecutive pairs of `sequence`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebound_markov::{
    ///     markov::{Smoothing, TransitionMatrix},
    ///     sequence::StateSequence,
    ///     state::GameState::*,
    /// };
    ///
    /// let seq = StateSequence::new(vec![HighWin, HighWin, HighLoss, HighWin]);
    /// let raw = TransitionMatrix::estimate(&seq, Smoothing::None);
    /// assert_eq!(raw.probability(HighWin, HighWin), 0.5);
    /// assert_eq!(raw.probability(HighWin, HighLoss), 0.5);
    /// ```
    pub fn estimate(sequence: &StateSequence, smoothing: Smoothing) -> Self {
        let mut counts = TransitionCounts::new(smoothing);
        for (from, to) in sequence.transitions() {
            counts.record(from, to);
        }
        let matrix = counts.normalize();
        log::debug!(
            "estimated {} matrix from {} transitions",
            smoothing,
            matrix.observed
        );
        matrix
    }

    /// Build directly from probabilities, e.g. for hand-constructed chains.
    pub fn from_grid(cells: Grid, smoothing: Smoothing) -> Self {
        Self {
            cells,
            smoothing,
            observed: 0,
        }
    }

    pub fn probability(&self, from: GameState, to: GameState) -> f64 {
        self.cells[from.index()][to.index()]
    }

    pub fn row(&self, from: GameState) -> &[f64; STATE_COUNT] {
        &self.cells[from.index()]
    }

    pub fn row_sum(&self, from: GameState) -> f64 {
        self.row(from).iter().sum()
    }

    /// True when `from` never appeared as the source of a transition in a
    /// raw matrix.
    pub fn is_row_empty(&self, from: GameState) -> bool {
        self.row(from).iter().all(|&p| p == 0.0)
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Number of consecutive pairs counted during estimation.
    pub fn transitions_observed(&self) -> usize {
        self.observed
    }

    /// Most likely successor of `from`. Ties resolve to the candidate that
    /// comes first in canonical order.
    pub fn most_likely_next(&self, from: GameState) -> GameState {
        let row = self.row(from);
        let mut best = GameState::ALL[0];
        let mut max_prob = -1.0;
        for candidate in GameState::ALL {
            let prob = row[candidate.index()];
            if prob > max_prob {
                max_prob = prob;
                best = candidate;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameState::*;

    const EPS: f64 = 1e-12;

    fn sample() -> StateSequence {
        StateSequence::new(vec![HighWin, HighWin, HighLoss, HighWin])
    }

    #[test]
    fn test_raw_counts_normalize_per_row() {
        let m = TransitionMatrix::estimate(&sample(), Smoothing::None);
        assert_eq!(m.probability(HighWin, HighWin), 0.5);
        assert_eq!(m.probability(HighWin, HighLoss), 0.5);
        for to in [MediumWin, MediumLoss, LowWin, LowLoss] {
            assert_eq!(m.probability(HighWin, to), 0.0);
        }
        assert_eq!(m.probability(HighLoss, HighWin), 1.0);
        assert_eq!(m.transitions_observed(), 3);
    }

    #[test]
    fn test_raw_unseen_rows_stay_zero() {
        let m = TransitionMatrix::estimate(&sample(), Smoothing::None);
        for from in [MediumWin, MediumLoss, LowWin, LowLoss] {
            assert!(m.is_row_empty(from));
            assert_eq!(m.row_sum(from), 0.0);
        }
        assert!((m.row_sum(HighWin) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_laplace_row_values() {
        let m = TransitionMatrix::estimate(&sample(), Smoothing::Laplace);
        assert!((m.probability(HighWin, HighWin) - 0.25).abs() < EPS);
        assert!((m.probability(HighWin, HighLoss) - 0.25).abs() < EPS);
        for to in [MediumWin, MediumLoss, LowWin, LowLoss] {
            assert!((m.probability(HighWin, to) - 0.125).abs() < EPS);
        }
        // Unseen rows become uniform
        for to in GameState::ALL {
            assert!((m.probability(LowLoss, to) - 1.0 / 6.0).abs() < EPS);
        }
    }

    #[test]
    fn test_laplace_rows_sum_to_one_and_positive() {
        let m = TransitionMatrix::estimate(&sample(), Smoothing::Laplace);
        for from in GameState::ALL {
            assert!((m.row_sum(from) - 1.0).abs() < EPS);
            assert!(m.row(from).iter().all(|&p| p > 0.0));
        }
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = TransitionMatrix::estimate(&sample(), Smoothing::Laplace);
        let b = TransitionMatrix::estimate(&sample(), Smoothing::Laplace);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_and_singleton_sequences() {
        let empty = TransitionMatrix::estimate(&StateSequence::default(), Smoothing::None);
        assert!(GameState::ALL.iter().all(|&s| empty.is_row_empty(s)));

        let single = StateSequence::new(vec![LowWin]);
        let smoothed = TransitionMatrix::estimate(&single, Smoothing::Laplace);
        assert_eq!(smoothed.transitions_observed(), 0);
        assert!((smoothed.row_sum(LowWin) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_most_likely_next_tie_break() {
        let mut grid = [[0.0; STATE_COUNT]; STATE_COUNT];
        grid[LowWin.index()][MediumLoss.index()] = 0.4;
        grid[LowWin.index()][HighLoss.index()] = 0.4;
        grid[LowWin.index()][LowLoss.index()] = 0.2;
        let m = TransitionMatrix::from_grid(grid, Smoothing::None);
        assert_eq!(m.most_likely_next(LowWin), HighLoss);
        // All-zero row falls back to the first state
        assert_eq!(m.most_likely_next(HighWin), HighWin);
    }

    #[test]
    fn test_smoothing_parse() {
        assert_eq!("raw".parse::<Smoothing>().unwrap(), Smoothing::None);
        assert_eq!("Laplace".parse::<Smoothing>().unwrap(), Smoothing::Laplace);
        assert!("kneser-ney".parse::<Smoothing>().is_err());
    }
}
