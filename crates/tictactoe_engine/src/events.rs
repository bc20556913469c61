//! Events emitted by the engine for a presentation layer to consume.
//!
//! The engine never touches widgets. Every command returns the events it
//! caused, in order, and a renderer decides what to draw.

use super::{Difficulty, GameMode, Mark, Position, RoundOutcome};
use serde::{Deserialize, Serialize};

/// Authorisation for one deferred computer move.
///
/// Handed out with [`GameEvent::ComputerTurnPending`] and redeemed with
/// [`GameEngine::play_computer_turn`](crate::GameEngine::play_computer_turn).
/// A ticket is only honoured while its round is still live and no move
/// has been made since it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnTicket {
    pub(crate) round: u64,
    pub(crate) move_number: usize,
}

impl TurnTicket {
    /// Round generation the ticket was issued in.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Number of marks on the board when the ticket was issued.
    pub fn move_number(&self) -> usize {
        self.move_number
    }
}

/// Something observable that happened inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mark was placed.
    MovePlaced {
        /// The mark placed.
        mark: Mark,
        /// Where it went.
        position: Position,
    },
    /// The round continues with this mark to move.
    TurnChanged(Mark),
    /// The round finished.
    RoundEnded(RoundOutcome),
    /// Cells to highlight for a win.
    WinningLine([Position; 3]),
    /// The computer is to move; schedule the ticket.
    ComputerTurnPending(TurnTicket),
    /// Board cleared, X to move.
    RoundReset,
    /// Scoreboard zeroed.
    ScoresReset,
    /// Mode changed (a [`GameEvent::RoundReset`] follows).
    ModeChanged(GameMode),
    /// Difficulty changed (a [`GameEvent::RoundReset`] follows).
    DifficultyChanged(Difficulty),
}
