//! Pure tic-tac-toe game logic.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Mark`], [`Position`] and the derived [`RoundOutcome`]
//! - **Rules**: win and draw detection over the eight fixed lines
//! - **Engine**: [`GameEngine`] owns a session (board, turn, mode, scores)
//!   and reports every change as a [`GameEvent`]
//! - **Opponent**: [`TieredOpponent`] picks computer moves for the
//!   Easy / Medium / Hard tiers from a seeded [`GameRng`]
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Difficulty, GameEngine, GameEvent, GameMode};
//!
//! let mut engine = GameEngine::with_seed(7);
//! engine.set_mode(GameMode::HumanVsComputer);
//! engine.set_difficulty(Difficulty::Hard);
//!
//! let events = engine.apply_move(0);
//! if let Some(GameEvent::ComputerTurnPending(ticket)) = events.last() {
//!     // A front end would wait a moment before redeeming the ticket.
//!     engine.play_computer_turn(*ticket);
//! }
//! assert_eq!(engine.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod events;
mod outcome;
mod position;
mod rng;
mod score;
mod settings;
mod types;

pub mod invariants;
pub mod opponent;
pub mod rules;

pub use engine::{COMPUTER_MARK, GameEngine};
pub use events::{GameEvent, TurnTicket};
pub use opponent::{MEDIUM_SMART_PROBABILITY, OpponentError, OpponentStrategy, TieredOpponent};
pub use outcome::{Move, MoveError, RoundOutcome};
pub use position::Position;
pub use rng::GameRng;
pub use score::ScoreBoard;
pub use settings::{Difficulty, GameMode, ParseSettingError};
pub use types::{Board, BoardError, Mark, Square};
