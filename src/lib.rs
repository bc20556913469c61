//! Terminal tic-tac-toe.
//!
//! A thin front end over [`tictactoe_engine`]: command-line parsing,
//! TOML session config, and a line-oriented console that renders engine
//! events and paces the computer's replies.
//!
//! # Example
//!
//! ```no_run
//! use tictactoe::{SessionConfig, console};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = SessionConfig::default();
//! console::run(&config).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
pub mod console;

pub use cli::Cli;
pub use config::{ConfigError, DEFAULT_COMPUTER_DELAY_MS, SessionConfig};
