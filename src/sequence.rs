//! Ordered state sequence built from the season's games

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    records::{GameRecord, IN_MEMORY_SOURCE, RecordReader, RowError, RowResult},
    state::{GameState, STATE_COUNT},
};

/// Occurrence count of each state, indexed in canonical order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFrequencies([usize; STATE_COUNT]);

impl StateFrequencies {
    pub fn from_states(states: &[GameState]) -> Self {
        let mut counts = [0usize; STATE_COUNT];
        for state in states {
            counts[state.index()] += 1;
        }
        Self(counts)
    }

    pub fn count(&self, state: GameState) -> usize {
        self.0[state.index()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// `(state, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (GameState, usize)> + '_ {
        GameState::ALL.into_iter().map(|s| (s, self.count(s)))
    }

    /// State with the highest count. Ties keep the state found first in
    /// canonical order; `None` when nothing was counted.
    pub fn most_frequent(&self) -> Option<GameState> {
        let mut best = None;
        let mut max_count = 0;
        for (state, count) in self.iter() {
            if count > max_count {
                max_count = count;
                best = Some(state);
            }
        }
        best
    }
}

/// Games in season order, one state per game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSequence {
    states: Vec<GameState>,
}

impl StateSequence {
    pub fn new(states: Vec<GameState>) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Consecutive `(from, to)` pairs, in order.
    pub fn transitions(&self) -> impl Iterator<Item = (GameState, GameState)> + '_ {
        self.states.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn transition_count(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    pub fn frequencies(&self) -> StateFrequencies {
        StateFrequencies::from_states(&self.states)
    }
}

impl FromIterator<GameState> for StateSequence {
    fn from_iter<I: IntoIterator<Item = GameState>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Result of classifying a full record stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSeason {
    pub sequence: StateSequence,
    pub frequencies: StateFrequencies,
}

/// Classifies records into a [`StateSequence`], collecting every malformed row
#[derive(Debug, Default)]
pub struct SequenceBuilder {
    states: Vec<GameState>,
    errors: Vec<RowError>,
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, record: GameRecord) {
        self.states.push(record.state());
    }

    pub fn push_row(&mut self, row: RowResult) {
        match row {
            Ok(record) => self.push_record(record),
            Err(error) => {
                log::warn!("malformed row: {error}");
                self.errors.push(error);
            }
        }
    }

    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    /// Finish the build.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRows`] listing every bad row if any were
    /// pushed; `source` names the input in that error.
    pub fn finish(self, source: &Path) -> Result<ClassifiedSeason> {
        if !self.errors.is_empty() {
            return Err(Error::MalformedRows {
                path: source.to_path_buf(),
                errors: self.errors,
            });
        }

        let sequence = StateSequence::new(self.states);
        let frequencies = sequence.frequencies();

        log::info!("classified {} games", sequence.len());
        for (state, count) in frequencies.iter() {
            log::info!("  {state}: {count}");
        }

        Ok(ClassifiedSeason {
            sequence,
            frequencies,
        })
    }

    /// Classify every row from an already-read stream.
    pub fn from_rows<I>(rows: I, source: &Path) -> Result<ClassifiedSeason>
    where
        I: IntoIterator<Item = RowResult>,
    {
        let mut builder = Self::new();
        for row in rows {
            builder.push_row(row);
        }
        builder.finish(source)
    }

    /// Read and classify the file at `path`.
    pub fn from_path(reader: &RecordReader, path: &Path) -> Result<ClassifiedSeason> {
        let rows = reader.read_path(path)?;
        Self::from_rows(rows, path)
    }
}

/// Convenience for callers that only have in-memory records.
pub fn classify_records<I>(records: I) -> StateSequence
where
    I: IntoIterator<Item = GameRecord>,
{
    records.into_iter().map(|r| r.state()).collect()
}

/// Placeholder path used when rows did not come from a file.
pub fn in_memory_source() -> PathBuf {
    PathBuf::from(IN_MEMORY_SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        records::RowErrorKind,
        state::{GameState::*, Outcome},
    };

    #[test]
    fn test_sequence_preserves_input_order() {
        let records = [
            GameRecord::new(45, Outcome::Win),
            GameRecord::new(20, Outcome::Loss),
            GameRecord::new(45, Outcome::Win),
            GameRecord::new(35, Outcome::Win),
        ];
        let seq = classify_records(records);
        assert_eq!(seq.states(), &[HighWin, LowLoss, HighWin, MediumWin]);
        assert_eq!(seq.transition_count(), 3);
    }

    #[test]
    fn test_frequencies() {
        let seq: StateSequence = [HighWin, HighWin, LowLoss].into_iter().collect();
        let freq = seq.frequencies();
        assert_eq!(freq.count(HighWin), 2);
        assert_eq!(freq.count(LowLoss), 1);
        assert_eq!(freq.count(MediumWin), 0);
        assert_eq!(freq.total(), 3);
    }

    #[test]
    fn test_most_frequent_tie_keeps_canonical_first() {
        let seq: StateSequence = [LowWin, MediumLoss, LowWin, MediumLoss].into_iter().collect();
        assert_eq!(seq.frequencies().most_frequent(), Some(MediumLoss));
        assert_eq!(StateFrequencies::default().most_frequent(), None);
    }

    #[test]
    fn test_builder_collects_all_row_errors() {
        let bad = |line: u64| -> RowResult {
            Err(RowError {
                line,
                kind: RowErrorKind::InvalidRebounds {
                    value: "?".to_string(),
                },
                raw: "?".to_string(),
            })
        };
        let rows = vec![
            Ok(GameRecord::new(40, Outcome::Win)),
            bad(3),
            Ok(GameRecord::new(10, Outcome::Loss)),
            bad(5),
        ];

        let err = SequenceBuilder::from_rows(rows, &in_memory_source()).unwrap_err();
        match err {
            Error::MalformedRows { errors, .. } => {
                let lines: Vec<u64> = errors.iter().map(|e| e.line).collect();
                assert_eq!(lines, vec![3, 5]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_ok_rows() {
        let rows = vec![
            Ok(GameRecord::new(41, Outcome::Loss)),
            Ok(GameRecord::new(33, Outcome::Win)),
        ];
        let season = SequenceBuilder::from_rows(rows, &in_memory_source()).unwrap();
        assert_eq!(season.sequence.states(), &[HighLoss, MediumWin]);
        assert_eq!(season.frequencies.total(), 2);
    }
}
