//! Markov chain estimation over the six composite game states

pub mod steady_state;
pub mod transition;

pub use steady_state::{ReturnTime, SolverConfig, StationaryDistribution, SteadyStateSolver};
pub use transition::{Smoothing, TransitionCounts, TransitionMatrix};
