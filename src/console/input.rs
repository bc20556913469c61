//! Parsing of typed player commands.

use derive_more::{Display, Error};
use tictactoe_engine::{Difficulty, GameMode, ParseSettingError, Position};
use tracing::instrument;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the active mark.
    Move(Position),
    /// Start a new round.
    NewRound,
    /// Zero the scoreboard.
    ResetScores,
    /// Switch game mode.
    Mode(GameMode),
    /// Switch difficulty.
    Difficulty(Difficulty),
    /// Show the command list.
    Help,
    /// Leave the program.
    Quit,
}

/// Input that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// Nothing recognisable was typed.
    #[display("Unknown command: {_0} (type 'help')")]
    Unknown(#[error(not(source))] String),
    /// A command was missing its argument or had a bad one.
    #[display("{_0}")]
    BadArgument(#[error(not(source))] String),
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  1-9 or a label (e.g. 'top left')  place your mark
  new                               start a new round
  scores reset                      zero the scoreboard
  mode hvh|hvc                      human vs human / human vs computer
  difficulty easy|medium|hard       computer strength
  help                              show this list
  quit                              exit";

/// Parses one line of input.
///
/// Numbers are 1-based to match the rendered board.
#[instrument]
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match head.to_ascii_lowercase().as_str() {
        "new" | "n" | "restart" => Ok(Command::NewRound),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        "scores" if rest.eq_ignore_ascii_case("reset") => Ok(Command::ResetScores),
        "mode" => rest
            .parse()
            .map(Command::Mode)
            .map_err(|e: ParseSettingError| InputError::BadArgument(e.to_string())),
        "difficulty" | "diff" => rest
            .parse()
            .map(Command::Difficulty)
            .map_err(|e: ParseSettingError| InputError::BadArgument(e.to_string())),
        _ => parse_position(line)
            .map(Command::Move)
            .ok_or_else(|| InputError::Unknown(line.to_string())),
    }
}

fn parse_position(s: &str) -> Option<Position> {
    match s.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(Position::from_index),
        Err(_) => Position::from_label_or_number(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_one_based() {
        assert_eq!(parse_command("1"), Ok(Command::Move(Position::TopLeft)));
        assert_eq!(parse_command(" 9 "), Ok(Command::Move(Position::BottomRight)));
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
    }

    #[test]
    fn test_labels_move() {
        assert_eq!(parse_command("center"), Ok(Command::Move(Position::Center)));
        assert_eq!(parse_command("bottom left"), Ok(Command::Move(Position::BottomLeft)));
    }

    #[test]
    fn test_settings_commands() {
        assert_eq!(parse_command("mode hvc"), Ok(Command::Mode(GameMode::HumanVsComputer)));
        assert_eq!(
            parse_command("difficulty Hard"),
            Ok(Command::Difficulty(Difficulty::Hard))
        );
        assert_eq!(
            parse_command("mode robots"),
            Err(InputError::BadArgument("Unknown game mode: robots".to_string()))
        );
    }

    #[test]
    fn test_session_commands() {
        assert_eq!(parse_command("new"), Ok(Command::NewRound));
        assert_eq!(parse_command("scores reset"), Ok(Command::ResetScores));
        assert_eq!(parse_command("Q"), Ok(Command::Quit));
        assert!(matches!(parse_command("dance"), Err(InputError::Unknown(_))));
    }
}
