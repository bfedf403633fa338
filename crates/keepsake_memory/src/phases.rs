//! Phase and transition vocabulary for the memory game.

use super::{CardId, SymbolKind};
use serde::{Deserialize, Serialize};

/// Coarse session phase, `idle → in-progress → won`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MatchPhase {
    /// No cards dealt yet.
    Idle,
    /// Cards dealt, pairs remain.
    InProgress,
    /// Every pair matched.
    Won,
}

/// What an accepted flip did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reveal {
    /// First card of a turn is face up; waiting for a second.
    First(CardId),
    /// The second card completed a pair.
    Matched {
        /// The shared symbol.
        kind: SymbolKind,
        /// The two cards, in flip order.
        pair: [CardId; 2],
    },
    /// The second card did not match; both stay up until concealed.
    Mismatched {
        /// The two cards, in flip order.
        pair: [CardId; 2],
    },
}

impl Reveal {
    /// True if this flip completed a comparison.
    pub fn is_resolution(&self) -> bool {
        !matches!(self, Reveal::First(_))
    }
}
