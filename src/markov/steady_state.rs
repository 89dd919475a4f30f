//! Stationary distribution by power iteration

use serde::{Deserialize, Serialize};

use super::transition::{Grid, TransitionMatrix};
use crate::{
    Error, Result,
    state::{GameState, STATE_COUNT},
};

/// Iteration cap and convergence tolerance for the power method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the tolerance is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "tolerance must be positive and finite, got {}",
                    self.tolerance
                ),
            });
        }
        Ok(())
    }
}

/// Expected number of steps between visits to a state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "steps")]
pub enum ReturnTime {
    Finite(f64),
    /// The state has zero long-run probability.
    Undefined,
}

impl ReturnTime {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.0 {
            ReturnTime::Finite(1.0 / probability)
        } else {
            ReturnTime::Undefined
        }
    }

    pub fn steps(self) -> Option<f64> {
        match self {
            ReturnTime::Finite(steps) => Some(steps),
            ReturnTime::Undefined => None,
        }
    }
}

/// Long-run occupation probabilities, in canonical state order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryDistribution {
    probabilities: [f64; STATE_COUNT],
    iterations: usize,
    converged: bool,
    final_delta: f64,
}

impl StationaryDistribution {
    pub fn probability(&self, state: GameState) -> f64 {
        self.probabilities[state.index()]
    }

    pub fn probabilities(&self) -> &[f64; STATE_COUNT] {
        &self.probabilities
    }

    pub fn return_time(&self, state: GameState) -> ReturnTime {
        ReturnTime::from_probability(self.probability(state))
    }

    /// `(state, probability, return time)` in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (GameState, f64, ReturnTime)> + '_ {
        GameState::ALL
            .into_iter()
            .map(|s| (s, self.probability(s), self.return_time(s)))
    }

    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Iterations actually run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// False when the iteration cap was hit before the tolerance was met.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Largest per-component change in the last iteration run.
    pub fn final_delta(&self) -> f64 {
        self.final_delta
    }
}

/// Power-iteration solver for `π = π · P`
#[derive(Debug, Clone, Copy, Default)]
pub struct SteadyStateSolver {
    config: SolverConfig,
}

impl SteadyStateSolver {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a bad tolerance.
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    pub fn solve(&self, matrix: &TransitionMatrix) -> StationaryDistribution {
        let result = power_iterate(matrix.grid(), self.config);
        if result.converged {
            log::info!(
                "steady state converged after {} iterations (delta {:.3e})",
                result.iterations,
                result.final_delta
            );
        } else {
            log::warn!(
                "steady state did not converge within {} iterations (delta {:.3e})",
                self.config.max_iterations,
                result.final_delta
            );
        }
        result
    }
}

/// Left-multiply a uniform start vector by `grid` until the largest
/// component change drops below the tolerance or the cap is reached.
fn power_iterate(grid: &Grid, config: SolverConfig) -> StationaryDistribution {
    let mut pi = [1.0 / STATE_COUNT as f64; STATE_COUNT];
    let mut iterations = 0;
    let mut final_delta = f64::INFINITY;

    while iterations < config.max_iterations {
        let mut next = [0.0; STATE_COUNT];
        for (j, slot) in next.iter_mut().enumerate() {
            *slot = (0..STATE_COUNT).map(|i| pi[i] * grid[i][j]).sum();
        }

        final_delta = pi
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        pi = next;
        iterations += 1;

        if final_delta < config.tolerance {
            return StationaryDistribution {
                probabilities: pi,
                iterations,
                converged: true,
                final_delta,
            };
        }
    }

    StationaryDistribution {
        probabilities: pi,
        iterations,
        converged: false,
        final_delta,
    }
}
