//! First-class invariants for the memory game.
//!
//! Invariants are properties that must hold after every accepted flip.
//! Each is testable on its own and they compose into a single check.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked as one unit, reporting every failure at once.
///
/// Implemented for the three-invariant tuple the game uses.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let results = [
            (A::holds(state), A::description()),
            (B::holds(state), B::description()),
            (C::holds(state), C::description()),
        ];
        let violations: Vec<_> = results
            .into_iter()
            .filter(|(holds, _)| !holds)
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod match_count;
pub mod paired_deck;
pub mod pending_bound;

pub use match_count::MatchCountInvariant;
pub use paired_deck::PairedDeckInvariant;
pub use pending_bound::PendingBoundInvariant;

/// All memory-game invariants as a composable set.
pub type MemoryInvariants = (
    PairedDeckInvariant,
    PendingBoundInvariant,
    MatchCountInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flip, heart_star_layout};
    use crate::{CardId, MatchInProgress};

    #[test]
    fn test_invariant_set_holds_for_fresh_deal() {
        let game = MatchInProgress::from_layout(&heart_star_layout()).expect("valid layout");
        assert!(MemoryInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_flips() {
        let mut game = MatchInProgress::from_layout(&heart_star_layout()).expect("valid layout");
        flip(&mut game, 0);
        flip(&mut game, 1);
        flip(&mut game, 2);
        assert!(MemoryInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = MatchInProgress::from_layout(&heart_star_layout()).expect("valid layout");
        // Reveal three cards behind the engine's back.
        for index in 0..3 {
            if let Some(card) = game.deck.get_mut(CardId::new(index)) {
                card.reveal();
            }
        }

        let violations = MemoryInvariants::check_all(&game).unwrap_err();
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_invariant_set_reports_each_failure_in_order() {
        let mut game = MatchInProgress::from_layout(&heart_star_layout()).expect("valid layout");
        for index in 0..3 {
            if let Some(card) = game.deck.get_mut(CardId::new(index)) {
                card.reveal();
            }
        }
        game.matched_pairs = 5;

        let violations = MemoryInvariants::check_all(&game).unwrap_err();
        let descriptions: Vec<_> = violations.iter().map(|v| v.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                PendingBoundInvariant::description(),
                MatchCountInvariant::description(),
            ]
        );
    }
}
