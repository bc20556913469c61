//! History consistency invariant: every recorded move is on the board.

use super::super::{GameEngine, Square};
use super::Invariant;

/// Invariant: the round history matches the board.
///
/// Each recorded move's square holds that move's mark, positions are
/// unique, and consecutive moves alternate marks.
pub struct HistoryConsistentInvariant;

impl Invariant<GameEngine> for HistoryConsistentInvariant {
    fn holds(engine: &GameEngine) -> bool {
        let history = engine.history();
        let on_board = history
            .iter()
            .all(|mv| engine.board().get(mv.position) == Square::Occupied(mv.mark));
        let alternating = history.windows(2).all(|w| w[0].mark != w[1].mark);
        let mut positions: Vec<_> = history.iter().map(|mv| mv.position).collect();
        positions.sort();
        positions.dedup();
        on_board && alternating && positions.len() == history.len()
    }

    fn description() -> &'static str {
        "Move history agrees with the board"
    }
}
