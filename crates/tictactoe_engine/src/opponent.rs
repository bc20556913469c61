//! Computer opponent move selection.
//!
//! Selection is a pure function of the board, the computer's mark, the
//! difficulty tier and a caller-supplied random source. Nothing here
//! mutates the board; lookahead works on copies from [`Board::with_mark`].

use super::rules;
use super::{Board, Difficulty, Mark, Position};
use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::{debug, instrument, trace};

/// Chance that a Medium opponent plays the Hard policy on a given move.
pub const MEDIUM_SMART_PROBABILITY: f64 = 0.5;

/// Error returned when no move can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum OpponentError {
    /// Every square is occupied.
    #[display("No legal move: the board is full")]
    NoLegalMove,
}

/// A source of computer moves.
///
/// The engine holds one behind a `Box` and consults it whenever the
/// computer is to move.
pub trait OpponentStrategy: std::fmt::Debug + Send {
    /// Picks an empty square for `mark` to play.
    ///
    /// # Errors
    ///
    /// Returns [`OpponentError::NoLegalMove`] if the board is full.
    fn select_move(
        &self,
        board: &Board,
        mark: Mark,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Position, OpponentError>;
}

/// The Easy / Medium / Hard opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredOpponent;

impl OpponentStrategy for TieredOpponent {
    fn select_move(
        &self,
        board: &Board,
        mark: Mark,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Position, OpponentError> {
        select_move(board, mark, difficulty, rng)
    }
}

/// Selects a move for `mark` according to `difficulty`.
///
/// # Errors
///
/// Returns [`OpponentError::NoLegalMove`] if the board is full.
#[instrument(skip(board, rng), fields(empty = board.empty_positions().len()))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Position, OpponentError> {
    let position = match difficulty {
        Difficulty::Easy => random_move(board, rng)?,
        Difficulty::Medium => {
            if rng.gen_bool(MEDIUM_SMART_PROBABILITY) {
                trace!("Medium tier playing smart");
                smart_move(board, mark, rng)?
            } else {
                trace!("Medium tier playing random");
                random_move(board, rng)?
            }
        }
        Difficulty::Hard => smart_move(board, mark, rng)?,
    };
    debug!(%position, "Opponent selected move");
    Ok(position)
}

/// Uniformly random empty square.
///
/// # Errors
///
/// Returns [`OpponentError::NoLegalMove`] if the board is full.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Position, OpponentError> {
    board
        .empty_positions()
        .choose(rng)
        .copied()
        .ok_or(OpponentError::NoLegalMove)
}

/// One-ply heuristic cascade.
///
/// First applicable rule wins: complete own line, block the opponent's
/// line, take the center, a random free corner, a random free edge, and
/// finally any random free square.
///
/// # Errors
///
/// Returns [`OpponentError::NoLegalMove`] if the board is full.
pub fn smart_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    rng: &mut R,
) -> Result<Position, OpponentError> {
    if let Some(position) = winning_move(board, mark) {
        trace!(%position, "Taking win");
        return Ok(position);
    }
    if let Some(position) = winning_move(board, mark.opponent()) {
        trace!(%position, "Blocking");
        return Ok(position);
    }
    if board.is_empty(Position::Center) {
        return Ok(Position::Center);
    }
    if let Some(position) = random_among(board, &Position::CORNERS, rng) {
        return Ok(position);
    }
    if let Some(position) = random_among(board, &Position::EDGES, rng) {
        return Ok(position);
    }
    random_move(board, rng)
}

/// Lowest-index empty square that would complete a line for `mark`.
pub fn winning_move(board: &Board, mark: Mark) -> Option<Position> {
    board
        .empty_positions()
        .into_iter()
        .find(|pos| rules::check_winner(&board.with_mark(*pos, mark)) == Some(mark))
}

fn random_among<R: Rng + ?Sized>(
    board: &Board,
    candidates: &[Position],
    rng: &mut R,
) -> Option<Position> {
    let free: Vec<Position> = candidates
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect();
    free.choose(rng).copied()
}
