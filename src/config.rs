//! Session configuration loaded from TOML.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_engine::{Difficulty, GameEngine, GameMode, GameRng};
use tracing::{debug, info, instrument};

/// Pause before the computer's reply, in milliseconds.
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 500;

/// Settings for one play session.
///
/// Every field is optional in the file; missing ones take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial game mode.
    mode: GameMode,

    /// Initial difficulty tier.
    difficulty: Difficulty,

    /// Delay before the computer moves.
    computer_delay_ms: u64,

    /// Seed for the computer's random choices. Entropy when absent.
    seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = config.mode.label(), difficulty = config.difficulty.label(), "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of file values.
    #[instrument(skip(self, cli))]
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if let Some(difficulty) = cli.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(delay) = cli.delay_ms {
            self.computer_delay_ms = delay;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        debug!(?self, "Effective configuration");
        self
    }

    /// Delay before the computer moves.
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }

    /// Builds an engine with these settings.
    #[instrument(skip(self))]
    pub fn build_engine(&self) -> GameEngine {
        let rng = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        GameEngine::with_rng(rng).with_settings(self.mode, self.difficulty)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
