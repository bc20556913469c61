//! Session score tracking across rounds.

use super::{Mark, RoundOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Wins per mark and ties, accumulated over a session.
///
/// Lives independently of the board: starting a new round keeps the
/// scores, only [`ScoreBoard::reset`] clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    x: u32,
    o: u32,
    ties: u32,
}

impl ScoreBoard {
    /// Creates a zeroed scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins recorded for `mark`.
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    /// Ties recorded.
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// Total finished rounds.
    pub fn rounds(&self) -> u32 {
        self.x + self.o + self.ties
    }

    /// Counts a finished round. In-progress outcomes are ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(Mark::X) => self.x += 1,
            RoundOutcome::Win(Mark::O) => self.o += 1,
            RoundOutcome::Tie => self.ties += 1,
            RoundOutcome::InProgress => return,
        }
        debug!(x = self.x, o = self.o, ties = self.ties, "Score updated");
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
