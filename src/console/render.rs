//! Plain-text rendering of engine state.

use tictactoe_engine::{
    Board, GameEngine, GameMode, Mark, Position, RoundOutcome, ScoreBoard, Square,
};

/// Draws the board; cells on `highlight` are bracketed.
///
/// Empty cells show their 1-based number so they can be typed.
pub fn render_board(board: &Board, highlight: Option<[Position; 3]>) -> String {
    let rows: Vec<String> = Position::ALL
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|&pos| {
                    let symbol = match board.get(pos) {
                        Square::Empty => (pos.to_index() + 1).to_string(),
                        Square::Occupied(mark) => mark.to_string(),
                    };
                    if highlight.is_some_and(|line| line.contains(&pos)) {
                        format!("[{symbol}]")
                    } else {
                        format!(" {symbol} ")
                    }
                })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rows.join("\n---+---+---\n")
}

/// Status text for the current round.
pub fn status_line(engine: &GameEngine) -> String {
    match engine.outcome() {
        RoundOutcome::Win(mark) => format!("Player {mark} wins!"),
        RoundOutcome::Tie => "Game ended in a tie!".to_string(),
        RoundOutcome::InProgress => {
            if engine.mode() == GameMode::HumanVsComputer && engine.to_move() == Mark::O {
                "Computer's turn (O)".to_string()
            } else {
                format!("Player {}'s turn", engine.to_move())
            }
        }
    }
}

/// Score counters in display order.
pub fn score_line(scores: &ScoreBoard) -> String {
    format!(
        "X: {}  Ties: {}  O: {}",
        scores.wins(Mark::X),
        scores.ties(),
        scores.wins(Mark::O)
    )
}
