//! Pair and win detection.

use super::super::{Card, Deck};
use tracing::instrument;

/// Two distinct cards form a pair when they carry the same symbol.
pub fn is_pair(first: &Card, second: &Card) -> bool {
    first.id() != second.id() && first.kind() == second.kind()
}

/// True when every card on the table has been matched.
#[instrument(skip(deck))]
pub fn all_pairs_matched(deck: &Deck) -> bool {
    !deck.is_empty() && deck.cards().iter().all(Card::is_matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardId, SymbolKind};

    #[test]
    fn test_same_kind_is_pair() {
        let a = Card::new(CardId::new(0), SymbolKind::Heart);
        let b = Card::new(CardId::new(5), SymbolKind::Heart);
        assert!(is_pair(&a, &b));
    }

    #[test]
    fn test_card_is_not_its_own_pair() {
        let a = Card::new(CardId::new(3), SymbolKind::Heart);
        assert!(!is_pair(&a, &a.clone()));
    }

    #[test]
    fn test_fresh_deck_not_won() {
        let deck = Deck::from_layout(&[SymbolKind::Star, SymbolKind::Star]).expect("valid layout");
        assert!(!all_pairs_matched(&deck));
    }
}
