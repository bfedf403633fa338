//! Serializable snapshot of a game in any phase.

use super::phases::MatchPhase;
use super::typestate::{MatchInProgress, MatchSetup, MatchWon};
use super::{Card, CardId, SymbolKind};
use serde::{Deserialize, Serialize};

/// Snapshot of a game in any phase.
///
/// Typestate phases are separate types, so front-ends read this enum
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AnyMatch {
    /// Waiting to be dealt.
    Idle {
        /// Kinds that will be dealt.
        kinds: Vec<SymbolKind>,
    },
    /// Dealt, pairs remain.
    InProgress {
        /// Cards in deal order.
        cards: Vec<Card>,
        /// Cards turned this turn.
        pending: Vec<CardId>,
        /// Completed comparisons.
        moves: u32,
        /// Pairs matched.
        matched_pairs: usize,
        /// Pairs in play.
        kind_count: usize,
    },
    /// Every pair matched.
    Won {
        /// Cards in deal order.
        cards: Vec<Card>,
        /// Final move count.
        moves: u32,
    },
}

impl From<&MatchSetup> for AnyMatch {
    fn from(game: &MatchSetup) -> Self {
        AnyMatch::Idle {
            kinds: game.kinds().kinds().to_vec(),
        }
    }
}

impl From<&MatchInProgress> for AnyMatch {
    fn from(game: &MatchInProgress) -> Self {
        AnyMatch::InProgress {
            cards: game.deck().cards().to_vec(),
            pending: game.pending().to_vec(),
            moves: game.moves(),
            matched_pairs: game.matched_pairs(),
            kind_count: game.kind_count(),
        }
    }
}

impl From<&MatchWon> for AnyMatch {
    fn from(game: &MatchWon) -> Self {
        AnyMatch::Won {
            cards: game.deck().cards().to_vec(),
            moves: game.moves(),
        }
    }
}

impl AnyMatch {
    /// Returns the phase.
    pub fn phase(&self) -> MatchPhase {
        match self {
            AnyMatch::Idle { .. } => MatchPhase::Idle,
            AnyMatch::InProgress { .. } => MatchPhase::InProgress,
            AnyMatch::Won { .. } => MatchPhase::Won,
        }
    }

    /// Cards on the table (empty before the deal).
    pub fn cards(&self) -> &[Card] {
        match self {
            AnyMatch::Idle { .. } => &[],
            AnyMatch::InProgress { cards, .. } => cards,
            AnyMatch::Won { cards, .. } => cards,
        }
    }

    /// Completed comparisons.
    pub fn moves(&self) -> u32 {
        match self {
            AnyMatch::Idle { .. } => 0,
            AnyMatch::InProgress { moves, .. } => *moves,
            AnyMatch::Won { moves, .. } => *moves,
        }
    }

    /// Pairs matched.
    pub fn matched_pairs(&self) -> usize {
        match self {
            AnyMatch::Idle { .. } => 0,
            AnyMatch::InProgress { matched_pairs, .. } => *matched_pairs,
            AnyMatch::Won { cards, .. } => cards.len() / 2,
        }
    }

    /// Pairs in play.
    pub fn kind_count(&self) -> usize {
        match self {
            AnyMatch::Idle { kinds } => kinds.len(),
            AnyMatch::InProgress { kind_count, .. } => *kind_count,
            AnyMatch::Won { cards, .. } => cards.len() / 2,
        }
    }

    /// True once every pair is matched.
    pub fn is_won(&self) -> bool {
        matches!(self, AnyMatch::Won { .. })
    }

    /// Returns a status line for display.
    pub fn status_string(&self) -> String {
        match self {
            AnyMatch::Idle { .. } => "Press start to deal".to_string(),
            AnyMatch::InProgress {
                moves,
                matched_pairs,
                kind_count,
                ..
            } => format!("Moves: {}  Matches: {}/{}", moves, matched_pairs, kind_count),
            AnyMatch::Won { moves, .. } => {
                format!("Congratulations! You won in {} moves!", moves)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flip, heart_star_layout};

    #[test]
    fn test_snapshot_tracks_progress() {
        let mut game = MatchInProgress::from_layout(&heart_star_layout()).expect("valid layout");
        flip(&mut game, 0);
        flip(&mut game, 1);
        flip(&mut game, 2);

        let snapshot = AnyMatch::from(&game);
        assert_eq!(snapshot.phase(), MatchPhase::InProgress);
        assert_eq!(snapshot.moves(), 1);
        assert_eq!(snapshot.matched_pairs(), 1);
        assert_eq!(snapshot.kind_count(), 8);
        assert_eq!(snapshot.status_string(), "Moves: 1  Matches: 1/8");
    }

    #[test]
    fn test_snapshot_serializes_with_phase_tag() {
        let snapshot = AnyMatch::from(&MatchSetup::standard());
        let json = serde_json::to_value(&snapshot).expect("serializable");
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["kinds"][0], "heart");
    }
}
