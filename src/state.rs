//! Composite game states: rebound tier × outcome
//!
//! Every game maps to exactly one of six states. The canonical order
//! (`HW, HL, MW, ML, LW, LL`) is used for matrix indexing, report layout and
//! every tie-break in the crate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Rebound totals at or above this count are a high-volume game.
pub const HIGH_REBOUND_THRESHOLD: u32 = 41;

/// Rebound totals at or above this count (and below the high threshold) are
/// a medium-volume game.
pub const MEDIUM_REBOUND_THRESHOLD: u32 = 33;

/// Number of composite states in the chain.
pub const STATE_COUNT: usize = 6;

/// Rebound-volume tier of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReboundTier {
    High,
    Medium,
    Low,
}

impl ReboundTier {
    /// Bucket a total-rebound count into a tier.
    pub fn from_rebounds(rebounds: u32) -> Self {
        if rebounds >= HIGH_REBOUND_THRESHOLD {
            ReboundTier::High
        } else if rebounds >= MEDIUM_REBOUND_THRESHOLD {
            ReboundTier::Medium
        } else {
            ReboundTier::Low
        }
    }
}

/// Result of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win)
    }
}

/// One of the six composite Markov states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameState {
    HighWin,
    HighLoss,
    MediumWin,
    MediumLoss,
    LowWin,
    LowLoss,
}

impl GameState {
    /// All states in canonical order.
    pub const ALL: [GameState; STATE_COUNT] = [
        GameState::HighWin,
        GameState::HighLoss,
        GameState::MediumWin,
        GameState::MediumLoss,
        GameState::LowWin,
        GameState::LowLoss,
    ];

    /// Classify a game by its total rebounds and result.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebound_markov::state::{GameState, Outcome};
    ///
    /// assert_eq!(GameState::classify(41, Outcome::Win), GameState::HighWin);
    /// assert_eq!(GameState::classify(40, Outcome::Loss), GameState::MediumLoss);
    /// assert_eq!(GameState::classify(12, Outcome::Win), GameState::LowWin);
    /// ```
    pub fn classify(rebounds: u32, outcome: Outcome) -> Self {
        Self::from_parts(ReboundTier::from_rebounds(rebounds), outcome)
    }

    pub fn from_parts(tier: ReboundTier, outcome: Outcome) -> Self {
        match (tier, outcome) {
            (ReboundTier::High, Outcome::Win) => GameState::HighWin,
            (ReboundTier::High, Outcome::Loss) => GameState::HighLoss,
            (ReboundTier::Medium, Outcome::Win) => GameState::MediumWin,
            (ReboundTier::Medium, Outcome::Loss) => GameState::MediumLoss,
            (ReboundTier::Low, Outcome::Win) => GameState::LowWin,
            (ReboundTier::Low, Outcome::Loss) => GameState::LowLoss,
        }
    }

    /// Position of this state in the canonical order.
    pub fn index(self) -> usize {
        match self {
            GameState::HighWin => 0,
            GameState::HighLoss => 1,
            GameState::MediumWin => 2,
            GameState::MediumLoss => 3,
            GameState::LowWin => 4,
            GameState::LowLoss => 5,
        }
    }

    /// Inverse of [`GameState::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn tier(self) -> ReboundTier {
        match self {
            GameState::HighWin | GameState::HighLoss => ReboundTier::High,
            GameState::MediumWin | GameState::MediumLoss => ReboundTier::Medium,
            GameState::LowWin | GameState::LowLoss => ReboundTier::Low,
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            GameState::HighWin | GameState::MediumWin | GameState::LowWin => Outcome::Win,
            GameState::HighLoss | GameState::MediumLoss | GameState::LowLoss => Outcome::Loss,
        }
    }

    /// Two-letter code used in the text reports.
    pub fn code(self) -> &'static str {
        match self {
            GameState::HighWin => "HW",
            GameState::HighLoss => "HL",
            GameState::MediumWin => "MW",
            GameState::MediumLoss => "ML",
            GameState::LowWin => "LW",
            GameState::LowLoss => "LL",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameState::HighWin => "HighWin",
            GameState::HighLoss => "HighLoss",
            GameState::MediumWin => "MediumWin",
            GameState::MediumLoss => "MediumLoss",
            GameState::LowWin => "LowWin",
            GameState::LowLoss => "LowLoss",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GameState {
    type Err = crate::Error;

    /// Accepts either the two-letter code or the long name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        GameState::ALL
            .into_iter()
            .find(|state| {
                state.code().eq_ignore_ascii_case(trimmed)
                    || state.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| crate::Error::InvalidStateCode {
                code: trimmed.to_string(),
            })
    }
}
