//! Line-oriented terminal front end.
//!
//! The engine reports [`GameEvent`](tictactoe_engine::GameEvent)s; this
//! module turns typed commands into engine calls, renders the result as
//! text, and paces the computer's replies through a cancellable timer.

mod app;
mod input;
mod render;
mod scheduler;

pub use app::{ConsoleApp, Flow, run};
pub use input::{Command, InputError, parse_command};
pub use render::{render_board, score_line, status_line};
pub use scheduler::ComputerMoveScheduler;
