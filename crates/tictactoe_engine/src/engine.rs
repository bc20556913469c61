//! The game engine: board, turns, outcome and session scores.
//!
//! All commands are synchronous and return the [`GameEvent`]s they caused.
//! Illegal moves are ignored and produce no events.

use super::invariants::assert_invariants;
use super::opponent::{OpponentStrategy, TieredOpponent};
use super::rng::GameRng;
use super::rules;
use super::{
    Board, BoardError, Difficulty, GameEvent, GameMode, Mark, Move, MoveError, Position,
    RoundOutcome, ScoreBoard, Square, TurnTicket,
};
use tracing::{debug, info, instrument, warn};

/// The mark the computer plays in [`GameMode::HumanVsComputer`].
pub const COMPUTER_MARK: Mark = Mark::O;

/// Owns one session: the current round's board plus the running score.
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    to_move: Mark,
    active: bool,
    winning_line: Option<[Position; 3]>,
    history: Vec<Move>,
    round: u64,
    mode: GameMode,
    difficulty: Difficulty,
    scores: ScoreBoard,
    opponent: Box<dyn OpponentStrategy>,
    rng: GameRng,
}

impl GameEngine {
    /// Creates an engine with default settings and an entropy-seeded RNG.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }

    /// Creates an engine whose computer moves replay for a given seed.
    #[instrument]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    /// Creates an engine drawing randomness from `rng`.
    pub fn with_rng(rng: GameRng) -> Self {
        info!(seed = rng.seed(), "Creating game engine");
        Self {
            board: Board::new(),
            to_move: Mark::X,
            active: true,
            winning_line: None,
            history: Vec::new(),
            round: 0,
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            scores: ScoreBoard::new(),
            opponent: Box::new(TieredOpponent),
            rng,
        }
    }

    /// Replaces the computer opponent.
    pub fn with_opponent(mut self, opponent: Box<dyn OpponentStrategy>) -> Self {
        self.opponent = opponent;
        self
    }

    /// Sets mode and difficulty at construction without emitting events.
    pub fn with_settings(mut self, mode: GameMode, difficulty: Difficulty) -> Self {
        self.mode = mode;
        self.difficulty = difficulty;
        self
    }

    /// Starts a live round from an existing position.
    ///
    /// # Errors
    ///
    /// Fails if the mark counts are unbalanced, `to_move` does not follow
    /// from them, or the position is already won or full.
    #[instrument(skip(rng))]
    pub fn from_position(board: Board, to_move: Mark, rng: GameRng) -> Result<Self, BoardError> {
        if !board.is_balanced() {
            return Err(BoardError::Unbalanced {
                x: board.count(Mark::X),
                o: board.count(Mark::O),
            });
        }
        if board.mark_to_move() != to_move {
            return Err(BoardError::WrongTurn(to_move));
        }
        if rules::outcome(&board).is_terminal() {
            return Err(BoardError::Finished);
        }
        let mut engine = Self::with_rng(rng);
        engine.board = board;
        engine.to_move = to_move;
        Ok(engine)
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The mark whose turn it is (the last mover once the round ends).
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Outcome derived from the board.
    pub fn outcome(&self) -> RoundOutcome {
        rules::outcome(&self.board)
    }

    /// True while the round accepts moves.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cells of the winning line once the round is won.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        self.winning_line
    }

    /// Moves played this round, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Generation counter, bumped by every round reset.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Current difficulty tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Snapshot of the session scores.
    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    /// Seed of the opponent's random source.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// True when the live round is waiting on the computer.
    pub fn is_computer_turn(&self) -> bool {
        self.active && self.mode == GameMode::HumanVsComputer && self.to_move == COMPUTER_MARK
    }

    /// A fresh ticket if the computer is to move right now.
    ///
    /// Front ends use this after loading a position, where no
    /// [`GameEvent::ComputerTurnPending`] was ever emitted.
    pub fn pending_computer_turn(&self) -> Option<TurnTicket> {
        self.is_computer_turn().then(|| self.ticket())
    }

    /// Validates a move without applying it.
    ///
    /// # Errors
    ///
    /// Returns the reason [`GameEngine::apply_move`] would ignore `index`.
    pub fn check_move(&self, index: usize) -> Result<Position, MoveError> {
        if !self.active {
            return Err(MoveError::RoundOver);
        }
        let position = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied(position));
        }
        Ok(position)
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Places the active mark at `index`.
    ///
    /// Illegal moves (occupied square, finished round, index past 8) leave
    /// the engine untouched and return no events. If the move hands the
    /// turn to the computer, the returned events end with
    /// [`GameEvent::ComputerTurnPending`]; the caller decides when to
    /// redeem it.
    #[instrument(skip(self), fields(to_move = %self.to_move, round = self.round))]
    pub fn apply_move(&mut self, index: usize) -> Vec<GameEvent> {
        match self.check_move(index) {
            Ok(position) => self.place(position),
            Err(e) => {
                debug!(error = %e, "Ignoring move");
                Vec::new()
            }
        }
    }

    /// Applies a human move and, if the computer is to reply, its move too.
    ///
    /// This is [`GameEngine::apply_move`] without the deferred hand-off.
    #[instrument(skip(self))]
    pub fn apply_move_and_respond(&mut self, index: usize) -> Vec<GameEvent> {
        let mut events = self.apply_move(index);
        let mut pending = pending_ticket(&events);
        while let Some(ticket) = pending {
            let reply = self.play_computer_turn(ticket);
            pending = pending_ticket(&reply);
            events.extend(reply);
        }
        events
    }

    /// Redeems a ticket from [`GameEvent::ComputerTurnPending`].
    ///
    /// Stale tickets (round reset, settings changed, or a move made since
    /// issue) are ignored and return no events.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn play_computer_turn(&mut self, ticket: TurnTicket) -> Vec<GameEvent> {
        if !self.is_computer_turn()
            || ticket.round != self.round
            || ticket.move_number != self.history.len()
        {
            debug!(?ticket, "Discarding stale computer turn");
            return Vec::new();
        }

        match self
            .opponent
            .select_move(&self.board, self.to_move, self.difficulty, &mut self.rng)
        {
            Ok(pick) => match self.check_move(pick.to_index()) {
                Ok(position) => {
                    info!(%position, difficulty = ?self.difficulty, "Computer moves");
                    self.place(position)
                }
                Err(e) => {
                    warn!(%pick, error = %e, "Opponent picked an illegal square");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "Opponent could not move");
                Vec::new()
            }
        }
    }

    /// Clears the board and gives X the first move. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) -> Vec<GameEvent> {
        self.board = Board::new();
        self.to_move = Mark::X;
        self.active = true;
        self.winning_line = None;
        self.history.clear();
        self.round += 1;
        debug!(round = self.round, "Round reset");
        self.check_invariants();
        vec![GameEvent::RoundReset]
    }

    /// Zeroes the scoreboard. The round is untouched.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) -> Vec<GameEvent> {
        self.scores.reset();
        info!("Scores reset");
        vec![GameEvent::ScoresReset]
    }

    /// Switches mode and starts a fresh round.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) -> Vec<GameEvent> {
        self.mode = mode;
        info!(mode = mode.label(), "Mode changed");
        let mut events = vec![GameEvent::ModeChanged(mode)];
        events.extend(self.reset_round());
        events
    }

    /// Switches difficulty and starts a fresh round.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        self.difficulty = difficulty;
        info!(difficulty = difficulty.label(), "Difficulty changed");
        let mut events = vec![GameEvent::DifficultyChanged(difficulty)];
        events.extend(self.reset_round());
        events
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn place(&mut self, position: Position) -> Vec<GameEvent> {
        let mark = self.to_move;
        self.board.set(position, Square::Occupied(mark));
        self.history.push(Move::new(mark, position));
        let mut events = vec![GameEvent::MovePlaced { mark, position }];

        if let Some((winner, line)) = rules::winning_line(&self.board) {
            self.finish(RoundOutcome::Win(winner));
            self.winning_line = Some(line);
            events.push(GameEvent::RoundEnded(RoundOutcome::Win(winner)));
            events.push(GameEvent::WinningLine(line));
        } else if rules::is_full(&self.board) {
            self.finish(RoundOutcome::Tie);
            events.push(GameEvent::RoundEnded(RoundOutcome::Tie));
        } else {
            self.to_move = mark.opponent();
            events.push(GameEvent::TurnChanged(self.to_move));
            if self.is_computer_turn() {
                events.push(GameEvent::ComputerTurnPending(self.ticket()));
            }
        }

        self.check_invariants();
        events
    }

    fn ticket(&self) -> TurnTicket {
        TurnTicket {
            round: self.round,
            move_number: self.history.len(),
        }
    }

    fn finish(&mut self, outcome: RoundOutcome) {
        self.active = false;
        self.scores.record(outcome);
        info!(%outcome, "Round ended");
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            assert_invariants(self);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn pending_ticket(events: &[GameEvent]) -> Option<TurnTicket> {
    events.iter().find_map(|event| match event {
        GameEvent::ComputerTurnPending(ticket) => Some(*ticket),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_alternates_turn() {
        let mut engine = GameEngine::with_seed(0);
        let events = engine.apply_move(4);
        assert_eq!(
            events,
            vec![
                GameEvent::MovePlaced {
                    mark: Mark::X,
                    position: Position::Center
                },
                GameEvent::TurnChanged(Mark::O),
            ]
        );
        assert_eq!(engine.to_move(), Mark::O);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut engine = GameEngine::with_seed(0);
        assert!(engine.apply_move(9).is_empty());
        assert_eq!(engine.check_move(42), Err(MoveError::OutOfBounds(42)));
        assert_eq!(engine.board(), &Board::new());
    }

    #[test]
    fn test_computer_turn_is_deferred() {
        let mut engine =
            GameEngine::with_seed(0).with_settings(GameMode::HumanVsComputer, Difficulty::Hard);
        let events = engine.apply_move(0);
        let ticket = pending_ticket(&events).expect("computer should be pending");
        assert_eq!(engine.to_move(), Mark::O);
        assert_eq!(engine.history().len(), 1);

        let reply = engine.play_computer_turn(ticket);
        assert_eq!(
            reply.first(),
            Some(&GameEvent::MovePlaced {
                mark: Mark::O,
                position: Position::Center
            })
        );
        assert_eq!(engine.to_move(), Mark::X);
    }

    #[test]
    fn test_ticket_cannot_be_redeemed_twice() {
        let mut engine =
            GameEngine::with_seed(0).with_settings(GameMode::HumanVsComputer, Difficulty::Easy);
        let ticket = pending_ticket(&engine.apply_move(0)).unwrap();
        assert!(!engine.play_computer_turn(ticket).is_empty());
        assert!(engine.play_computer_turn(ticket).is_empty());
        assert_eq!(engine.history().len(), 2);
    }

    #[derive(Debug)]
    struct AlwaysTopLeft;

    impl OpponentStrategy for AlwaysTopLeft {
        fn select_move(
            &self,
            _board: &Board,
            _mark: Mark,
            _difficulty: Difficulty,
            _rng: &mut dyn rand::RngCore,
        ) -> Result<Position, crate::opponent::OpponentError> {
            Ok(Position::TopLeft)
        }
    }

    #[test]
    fn test_occupied_opponent_pick_is_ignored() {
        let mut engine = GameEngine::with_seed(0)
            .with_settings(GameMode::HumanVsComputer, Difficulty::Hard)
            .with_opponent(Box::new(AlwaysTopLeft));
        let ticket = pending_ticket(&engine.apply_move(0)).unwrap();
        let before = *engine.board();

        assert!(engine.play_computer_turn(ticket).is_empty());
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.board().get(Position::TopLeft), Square::Occupied(Mark::X));
        assert_eq!(engine.to_move(), Mark::O);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_from_position_validates() {
        let x = Some(Mark::X);
        let unbalanced = Board::from_marks([x, x, None, None, None, None, None, None, None]);
        assert_eq!(
            GameEngine::from_position(unbalanced, Mark::O, GameRng::new(0)).unwrap_err(),
            BoardError::Unbalanced { x: 2, o: 0 }
        );

        let one = Board::new().with_mark(Position::Center, Mark::X);
        assert_eq!(
            GameEngine::from_position(one, Mark::X, GameRng::new(0)).unwrap_err(),
            BoardError::WrongTurn(Mark::X)
        );
        let engine = GameEngine::from_position(one, Mark::O, GameRng::new(0)).unwrap();
        assert_eq!(engine.to_move(), Mark::O);
        assert!(engine.is_active());
    }
}
