//! Balanced marks invariant: X leads O by zero or one.

use super::super::GameEngine;
use super::Invariant;

/// Invariant: X count is O count or O count + 1.
pub struct BalancedMarksInvariant;

impl Invariant<GameEngine> for BalancedMarksInvariant {
    fn holds(engine: &GameEngine) -> bool {
        engine.board().is_balanced()
    }

    fn description() -> &'static str {
        "X has as many marks as O, or exactly one more"
    }
}
