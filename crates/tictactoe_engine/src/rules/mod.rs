//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board). The engine and the
//! opponent's lookahead share these, so a hypothetical placement is judged
//! by exactly the same eight lines as a real one.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_line};

use super::{Board, RoundOutcome};
use tracing::instrument;

/// Derives the round outcome from the board alone.
#[instrument(level = "trace")]
pub fn outcome(board: &Board) -> RoundOutcome {
    if let Some(winner) = check_winner(board) {
        RoundOutcome::Win(winner)
    } else if is_full(board) {
        RoundOutcome::Tie
    } else {
        RoundOutcome::InProgress
    }
}
