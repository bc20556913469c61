//! Console application state and the main input loop.

use super::input::{Command, HELP, parse_command};
use super::render::{render_board, score_line, status_line};
use super::scheduler::ComputerMoveScheduler;
use crate::config::SessionConfig;
use anyhow::{Context, Result};
use std::io::{self, Write};
use tictactoe_engine::{GameEngine, GameEvent, GameMode, Mark, TurnTicket};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Leave the loop.
    Quit,
}

/// Connects typed commands, the engine and the text renderer.
pub struct ConsoleApp<W: Write> {
    engine: GameEngine,
    scheduler: ComputerMoveScheduler,
    out: W,
}

impl<W: Write> ConsoleApp<W> {
    /// Creates an application writing to `out`.
    pub fn new(engine: GameEngine, scheduler: ComputerMoveScheduler, out: W) -> Self {
        Self {
            engine,
            scheduler,
            out,
        }
    }

    /// The engine being played.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// True while a computer reply is waiting on its timer.
    pub fn computer_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Prints the opening screen.
    pub fn start(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "Tic Tac Toe: {} (difficulty {}). Type 'help' for commands.",
            self.engine.mode().label(),
            self.engine.difficulty().label()
        )?;
        self.draw(true)
    }

    /// Parses and executes one line of input.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        if line.trim().is_empty() {
            self.prompt()?;
            return Ok(Flow::Continue);
        }
        match parse_command(line) {
            Ok(command) => self.handle_command(command),
            Err(e) => {
                writeln!(self.out, "{e}")?;
                self.prompt()?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Executes a parsed command.
    #[instrument(skip(self))]
    pub fn handle_command(&mut self, command: Command) -> io::Result<Flow> {
        let events = match command {
            Command::Quit => {
                self.scheduler.cancel();
                writeln!(self.out, "Final score: {}", score_line(&self.engine.scores()))?;
                return Ok(Flow::Quit);
            }
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                self.prompt()?;
                return Ok(Flow::Continue);
            }
            Command::Move(position) => {
                if self.engine.is_computer_turn() {
                    writeln!(self.out, "The computer is thinking...")?;
                    self.prompt()?;
                    return Ok(Flow::Continue);
                }
                if let Err(e) = self.engine.check_move(position.to_index()) {
                    writeln!(self.out, "{e}")?;
                    self.prompt()?;
                    return Ok(Flow::Continue);
                }
                self.engine.apply_move(position.to_index())
            }
            Command::NewRound => self.engine.reset_round(),
            Command::ResetScores => self.engine.reset_scores(),
            Command::Mode(mode) => self.engine.set_mode(mode),
            Command::Difficulty(difficulty) => {
                if self.engine.mode() == GameMode::HumanVsHuman {
                    writeln!(self.out, "Difficulty only applies in Human vs Computer mode")?;
                    self.prompt()?;
                    return Ok(Flow::Continue);
                }
                self.engine.set_difficulty(difficulty)
            }
        };
        self.show(events)?;
        Ok(Flow::Continue)
    }

    /// Plays a computer turn delivered by the scheduler.
    #[instrument(skip(self))]
    pub fn handle_ticket(&mut self, ticket: TurnTicket) -> io::Result<()> {
        self.scheduler.delivered(ticket);
        let events = self.engine.play_computer_turn(ticket);
        if events.is_empty() {
            debug!("Ticket was stale");
            return Ok(());
        }
        self.show(events)
    }

    fn show(&mut self, events: Vec<GameEvent>) -> io::Result<()> {
        let mut scores_changed = false;
        for event in &events {
            debug!(event = %serde_json::to_string(event).unwrap_or_default(), "Engine event");
            match event {
                GameEvent::MovePlaced { mark, position } => {
                    let computer = self.engine.mode() == GameMode::HumanVsComputer;
                    let who = if computer && *mark == Mark::O {
                        "Computer".to_string()
                    } else {
                        format!("Player {mark}")
                    };
                    writeln!(self.out, "{who} plays {position}")?;
                }
                GameEvent::RoundEnded(_) => scores_changed = true,
                GameEvent::ComputerTurnPending(ticket) => self.scheduler.schedule(*ticket),
                GameEvent::RoundReset => self.scheduler.cancel(),
                GameEvent::ScoresReset => {
                    writeln!(self.out, "All scores have been reset to zero.")?;
                    scores_changed = true;
                }
                GameEvent::ModeChanged(mode) => {
                    writeln!(self.out, "Mode: {}", mode.label())?;
                }
                GameEvent::DifficultyChanged(difficulty) => {
                    writeln!(self.out, "Difficulty: {}", difficulty.label())?;
                }
                GameEvent::TurnChanged(_) | GameEvent::WinningLine(_) => {}
            }
        }
        self.draw(scores_changed)
    }

    fn draw(&mut self, with_scores: bool) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{}\n",
            render_board(self.engine.board(), self.engine.winning_line())
        )?;
        writeln!(self.out, "{}", status_line(&self.engine))?;
        if with_scores {
            writeln!(self.out, "{}", score_line(&self.engine.scores()))?;
        }
        self.prompt()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

/// Runs an interactive session on stdin/stdout until `quit` or EOF.
#[instrument(skip(config))]
pub async fn run(config: &SessionConfig) -> Result<()> {
    let (scheduler, mut tickets) = ComputerMoveScheduler::new(config.computer_delay());
    let engine = config.build_engine();
    info!(seed = engine.seed(), "Starting console session");

    let mut app = ConsoleApp::new(engine, scheduler, io::stdout());
    app.start().context("Failed to write to stdout")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    debug!("stdin closed");
                    break;
                };
                if app.handle_line(&line).context("Failed to write to stdout")? == Flow::Quit {
                    break;
                }
            }
            Some(ticket) = tickets.recv() => {
                app.handle_ticket(ticket).context("Failed to write to stdout")?;
            }
        }
    }

    let scores = app.engine().scores();
    info!(
        x = scores.wins(Mark::X),
        o = scores.wins(Mark::O),
        ties = scores.ties(),
        "Session finished"
    );
    Ok(())
}
