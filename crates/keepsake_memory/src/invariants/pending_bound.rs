//! Pending bound invariant: at most two unresolved cards face up.

use super::super::MatchInProgress;
use super::Invariant;

/// Invariant: the cards that are revealed but unmatched are exactly the
/// pending set, and there are never more than two of them.
pub struct PendingBoundInvariant;

impl Invariant<MatchInProgress> for PendingBoundInvariant {
    fn holds(game: &MatchInProgress) -> bool {
        let open: Vec<_> = game
            .deck()
            .cards()
            .iter()
            .filter(|c| c.is_revealed() && !c.is_matched())
            .map(|c| c.id())
            .collect();

        open.len() <= 2
            && game.pending().len() <= 2
            && open.len() == game.pending().len()
            && open.iter().all(|id| game.pending().contains(id))
    }

    fn description() -> &'static str {
        "At most two unmatched cards are revealed, and they are the pending cards"
    }
}
