//! First-class action types for the memory game.
//!
//! A flip is the player's intent to turn one card. It can be checked
//! against the table before anything changes.

use super::CardId;
use serde::{Deserialize, Serialize};

/// Request to turn a card face up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flip {
    /// The card to turn.
    pub card: CardId,
}

impl Flip {
    /// Creates a flip of the given card.
    pub fn new(card: CardId) -> Self {
        Self { card }
    }
}

impl std::fmt::Display for Flip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "flip {}", self.card)
    }
}

/// Reason a flip had no effect.
///
/// Rejections are never surfaced to the player; callers log them and
/// carry on.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum FlipRejected {
    /// No card with this id exists in the deck.
    #[display("Card {} is not on the table", _0)]
    UnknownCard(CardId),

    /// Two cards are already waiting to be compared.
    #[display("Two cards are already pending")]
    ResolutionPending,

    /// The card has already been matched.
    #[display("Card {} is already matched", _0)]
    AlreadyMatched(CardId),

    /// The card is already face up.
    #[display("Card {} is already revealed", _0)]
    AlreadyRevealed(CardId),

    /// There is no game in progress.
    #[display("No game in progress")]
    SessionOver,

    /// A postcondition failed after the flip was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for FlipRejected {}
