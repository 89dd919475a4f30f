//! Common test utilities for the rebound Markov test suite.
//!
//! Builds season CSV files in the historical 26+ column layout.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rand::{Rng, rngs::StdRng};
use rebound_markov::GameState;

/// Number of columns in a generated box-score row.
pub const COLUMNS: usize = 28;

/// Header line matching the generated rows.
pub fn header() -> String {
    (0..COLUMNS)
        .map(|i| format!("col{i}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// One box-score row with the result marker in column 6 and total rebounds
/// in column 25. Other columns hold plausible filler.
pub fn box_score_row(game: usize, result: &str, rebounds: &str) -> String {
    let mut fields: Vec<String> = (0..COLUMNS).map(|i| (game * 3 + i).to_string()).collect();
    fields[1] = format!("2025-01-{:02}", game % 28 + 1);
    fields[6] = result.to_string();
    fields[25] = rebounds.to_string();
    fields.join(",")
}

/// Representative row for a state: rebounds chosen inside the state's tier.
pub fn row_for_state(game: usize, state: GameState) -> String {
    let rebounds = match state {
        GameState::HighWin | GameState::HighLoss => 44,
        GameState::MediumWin | GameState::MediumLoss => 36,
        GameState::LowWin | GameState::LowLoss => 29,
    };
    let result = if state.outcome().is_win() { "W" } else { "L" };
    box_score_row(game, result, &rebounds.to_string())
}

/// Write a CSV with a header and the given rows, returning its path.
pub fn write_season(dir: &Path, name: &str, rows: &[String]) -> PathBuf {
    let mut contents = header();
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Write a season whose classified sequence is exactly `states`.
pub fn write_states(dir: &Path, name: &str, states: &[GameState]) -> PathBuf {
    let rows: Vec<String> = states
        .iter()
        .enumerate()
        .map(|(i, &s)| row_for_state(i, s))
        .collect();
    write_season(dir, name, &rows)
}

/// Random state sequence of the given length.
pub fn random_states(len: usize, rng: &mut StdRng) -> Vec<GameState> {
    (0..len)
        .map(|_| GameState::ALL[rng.random_range(0..GameState::ALL.len())])
        .collect()
}
