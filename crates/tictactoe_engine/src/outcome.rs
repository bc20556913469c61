//! Round outcome and the typed move record.

use super::{Mark, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Outcome of the current round, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Moves can still be made.
    InProgress,
    /// A mark completed a line.
    Win(Mark),
    /// The board filled without a line.
    Tie,
}

impl RoundOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundOutcome::Win(mark) => Some(*mark),
            _ => None,
        }
    }

    /// True once the round is won or tied.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::InProgress => write!(f, "In progress"),
            RoundOutcome::Win(mark) => write!(f, "Player {} wins", mark),
            RoundOutcome::Tie => write!(f, "Tie"),
        }
    }
}

/// A placed mark: who played where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark that was placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Reasons a move cannot be applied.
///
/// [`GameEngine::apply_move`](crate::GameEngine::apply_move) ignores illegal
/// moves; this type is what [`GameEngine::check_move`](crate::GameEngine::check_move)
/// reports and what gets logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Index outside 0-8.
    #[display("Position {_0} is out of bounds (must be 0-8)")]
    OutOfBounds(#[error(not(source))] usize),

    /// The square at the position is already occupied.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(#[error(not(source))] Position),

    /// The round is already won or tied.
    #[display("Round is already over")]
    RoundOver,
}
