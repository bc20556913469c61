//! Session settings: who plays O and how well the computer plays.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::EnumIter;
use tracing::instrument;

/// Who controls the O side.
///
/// Defaults to [`GameMode::HumanVsHuman`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two people share the board.
    #[default]
    HumanVsHuman,
    /// The computer plays O.
    HumanVsComputer,
}

impl GameMode {
    /// Returns the display label for this mode.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::HumanVsHuman => "Human vs Human",
            Self::HumanVsComputer => "Human vs Computer",
        }
    }

    /// Toggles between the two modes.
    #[instrument]
    pub fn toggle(self) -> Self {
        match self {
            Self::HumanVsHuman => Self::HumanVsComputer,
            Self::HumanVsComputer => Self::HumanVsHuman,
        }
    }
}

/// Computer opponent tier. Only meaningful in [`GameMode::HumanVsComputer`].
///
/// Defaults to [`Difficulty::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Coin flip between Easy and Hard on every move.
    #[default]
    Medium,
    /// One-ply heuristic cascade.
    Hard,
}

impl Difficulty {
    /// Returns the display label for this tier.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Unrecognised mode or difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unknown {kind}: {value}")]
pub struct ParseSettingError {
    /// Which setting was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl FromStr for GameMode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "hvh" | "humanvshuman" | "human" => Ok(Self::HumanVsHuman),
            "hvc" | "humanvscomputer" | "computer" => Ok(Self::HumanVsComputer),
            _ => Err(ParseSettingError {
                kind: "game mode",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseSettingError {
                kind: "difficulty",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_session() {
        assert_eq!(GameMode::default(), GameMode::HumanVsHuman);
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_parse_mode_aliases() {
        assert_eq!("hvc".parse::<GameMode>(), Ok(GameMode::HumanVsComputer));
        assert_eq!("Human vs Human".parse::<GameMode>(), Ok(GameMode::HumanVsHuman));
        assert_eq!("human_vs_computer".parse::<GameMode>(), Ok(GameMode::HumanVsComputer));
        assert!("robot".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        let err = "nightmare".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown difficulty: nightmare");
    }

    #[test]
    fn test_toggle_mode() {
        assert_eq!(GameMode::HumanVsHuman.toggle(), GameMode::HumanVsComputer);
        assert_eq!(GameMode::HumanVsComputer.toggle(), GameMode::HumanVsHuman);
    }
}
