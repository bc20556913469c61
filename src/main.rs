//! tictactoe - play in the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe::{Cli, SessionConfig, console};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = load_config(&cli)?;
    console::run(&config).await
}

/// Logs go to stderr so the board on stdout stays readable.
#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}

#[instrument(skip(cli), fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<SessionConfig> {
    let config = SessionConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?
        .with_overrides(cli);
    info!(
        mode = config.mode().label(),
        difficulty = config.difficulty().label(),
        delay_ms = config.computer_delay_ms(),
        "Session configured"
    );
    Ok(config)
}
