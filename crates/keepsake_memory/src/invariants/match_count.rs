//! Match count invariant: the pair counter agrees with the table.

use super::super::MatchInProgress;
use super::Invariant;

/// Invariant: `matched_pairs` equals half the matched cards and never
/// exceeds the number of kinds.
pub struct MatchCountInvariant;

impl Invariant<MatchInProgress> for MatchCountInvariant {
    fn holds(game: &MatchInProgress) -> bool {
        game.matched_pairs() * 2 == game.deck().matched_cards()
            && game.matched_pairs() <= game.kind_count()
    }

    fn description() -> &'static str {
        "Matched pair count agrees with matched cards"
    }
}
