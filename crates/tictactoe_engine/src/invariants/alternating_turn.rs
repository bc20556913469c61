//! Alternating turn invariant: X, O, X, O, ...

use super::super::{GameEngine, Mark};
use super::Invariant;

/// Invariant: the side to move follows from the board.
///
/// While a round is live the mark to move is X after an even number of
/// placements and O after an odd number. The round flag agrees with the
/// derived outcome.
pub struct AlternatingTurnInvariant;

impl Invariant<GameEngine> for AlternatingTurnInvariant {
    fn holds(engine: &GameEngine) -> bool {
        if engine.is_active() == engine.outcome().is_terminal() {
            return false;
        }
        if !engine.is_active() {
            return true;
        }
        let placed = 9 - engine.board().empty_positions().len();
        let expected = if placed % 2 == 0 { Mark::X } else { Mark::O };
        engine.to_move() == expected
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...) and the round flag matches the outcome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_engine_holds() {
        let engine = GameEngine::with_seed(1);
        assert!(AlternatingTurnInvariant::holds(&engine));
    }

    #[test]
    fn test_holds_through_a_round() {
        let mut engine = GameEngine::with_seed(1);
        for index in [4, 0, 8, 2, 1, 7] {
            engine.apply_move(index);
            assert!(AlternatingTurnInvariant::holds(&engine));
        }
    }
}
