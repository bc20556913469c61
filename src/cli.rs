//! Command-line interface for tictactoe.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::{Difficulty, GameMode};

/// Tic-tac-toe in the terminal, against a friend or the computer.
///
/// Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Terminal tic-tac-toe with a tiered computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to session config (TOML). Missing file means defaults.
    #[arg(short, long, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Game mode: hvh or hvc
    #[arg(short, long)]
    pub mode: Option<GameMode>,

    /// Computer difficulty: easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Delay before the computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for reproducible computer moves
    #[arg(long)]
    pub seed: Option<u64>,
}
