//! Paired deck invariant: every kind is dealt exactly twice.

use super::super::{MatchInProgress, types::pair_counts};
use super::Invariant;

/// Invariant: the deck holds exactly two cards of each kind and its size
/// is twice the number of kinds.
pub struct PairedDeckInvariant;

impl Invariant<MatchInProgress> for PairedDeckInvariant {
    fn holds(game: &MatchInProgress) -> bool {
        let counts = pair_counts(&game.deck().layout());
        counts.values().all(|&count| count == 2)
            && counts.len() == game.kind_count()
            && game.deck().len() == 2 * game.kind_count()
    }

    fn description() -> &'static str {
        "Each symbol kind appears exactly twice"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::heart_star_layout;

    #[test]
    fn test_layout_deal_holds() {
        let game = MatchInProgress::from_layout(&heart_star_layout()).expect("valid layout");
        assert!(PairedDeckInvariant::holds(&game));
    }

    #[test]
    fn test_random_deal_holds() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(99);
        let game = crate::MatchSetup::standard().start(&mut rng);
        assert!(PairedDeckInvariant::holds(&game));
    }
}
