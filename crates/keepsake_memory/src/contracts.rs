//! Contract-based validation for flips.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} action {Q(before, after)}.

use super::action::{Flip, FlipRejected};
use super::invariants::{InvariantSet, MemoryInvariants};
use super::typestate::MatchInProgress;
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), FlipRejected>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), FlipRejected>;
}

// ─────────────────────────────────────────────────────────────
//  Flip Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the card exists in the deck.
pub struct CardExists;

impl CardExists {
    /// Checks the card id against the deck.
    #[instrument(skip(game))]
    pub fn check(flip: &Flip, game: &MatchInProgress) -> Result<(), FlipRejected> {
        match game.deck().get(flip.card) {
            Some(_) => Ok(()),
            None => Err(FlipRejected::UnknownCard(flip.card)),
        }
    }
}

/// Precondition: fewer than two cards are awaiting comparison.
pub struct TurnOpen;

impl TurnOpen {
    /// Checks the pending set.
    #[instrument(skip(game))]
    pub fn check(_flip: &Flip, game: &MatchInProgress) -> Result<(), FlipRejected> {
        if game.pending().len() >= 2 {
            Err(FlipRejected::ResolutionPending)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the card is neither matched nor already face up.
pub struct CardHidden;

impl CardHidden {
    /// Checks the card's face state.
    #[instrument(skip(game))]
    pub fn check(flip: &Flip, game: &MatchInProgress) -> Result<(), FlipRejected> {
        match game.deck().get(flip.card) {
            Some(card) if card.is_matched() => Err(FlipRejected::AlreadyMatched(flip.card)),
            Some(card) if card.is_revealed() => Err(FlipRejected::AlreadyRevealed(flip.card)),
            Some(_) => Ok(()),
            None => Err(FlipRejected::UnknownCard(flip.card)),
        }
    }
}

/// Composite precondition for a legal flip.
pub struct LegalFlip;

impl LegalFlip {
    /// Validates all preconditions for a flip.
    #[instrument(skip(game))]
    pub fn check(flip: &Flip, game: &MatchInProgress) -> Result<(), FlipRejected> {
        CardExists::check(flip, game)?;
        TurnOpen::check(flip, game)?;
        CardHidden::check(flip, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Flip Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for flip actions.
///
/// Preconditions:
/// - Card exists
/// - Fewer than two cards pending
/// - Card is hidden and unmatched
///
/// Postconditions:
/// - Deck stays paired
/// - Pending set bounded and consistent with the faces
/// - Match counter agrees with the table
/// - Counters never decrease
pub struct FlipContract;

impl Contract<MatchInProgress, Flip> for FlipContract {
    fn pre(game: &MatchInProgress, action: &Flip) -> Result<(), FlipRejected> {
        LegalFlip::check(action, game)
    }

    fn post(before: &MatchInProgress, after: &MatchInProgress) -> Result<(), FlipRejected> {
        if after.moves() < before.moves() || after.matched_pairs() < before.matched_pairs() {
            return Err(FlipRejected::InvariantViolation(
                "Postcondition failed: counters decreased".to_string(),
            ));
        }
        MemoryInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            FlipRejected::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
