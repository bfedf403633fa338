//! Core domain types for the memory-matching game.

use derive_more::{Display, From};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::instrument;

/// A matchable symbol printed on the face of a card.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SymbolKind {
    /// Heart.
    Heart,
    /// Star.
    Star,
    /// Musical note.
    Music,
    /// Camera.
    Camera,
    /// Wrapped gift.
    Gift,
    /// Birthday cake.
    Cake,
    /// Coffee cup.
    Coffee,
    /// Crescent moon.
    Moon,
}

impl SymbolKind {
    /// Returns every kind in declaration order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Single-glyph rendering used by terminal front-ends.
    pub fn glyph(self) -> &'static str {
        match self {
            SymbolKind::Heart => "♥",
            SymbolKind::Star => "★",
            SymbolKind::Music => "♪",
            SymbolKind::Camera => "◉",
            SymbolKind::Gift => "✚",
            SymbolKind::Cake => "▲",
            SymbolKind::Coffee => "☕",
            SymbolKind::Moon => "☾",
        }
    }
}

/// Position of a card within a dealt deck.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("#{_0}")]
pub struct CardId(usize);

impl CardId {
    /// Creates a card id from a deck position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the deck position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Counter that distinguishes one dealt session from the next.
///
/// Every restart produces a new generation, so delayed work tagged with
/// an older generation can be recognised and dropped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, Display,
)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A single card on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    kind: SymbolKind,
    revealed: bool,
    matched: bool,
}

impl Card {
    /// Creates a face-down, unmatched card.
    pub fn new(id: CardId, kind: SymbolKind) -> Self {
        Self {
            id,
            kind,
            revealed: false,
            matched: false,
        }
    }

    /// Returns the card id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the symbol on the card face.
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// True while the card is turned face up.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// True once the card's pair has been confirmed.
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// True if the face should be shown.
    pub fn is_face_up(&self) -> bool {
        self.revealed || self.matched
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn conceal(&mut self) {
        self.revealed = false;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }
}

/// Error building a deck or kind set.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DeckError {
    /// No symbol kinds were supplied.
    #[display("A deck needs at least one symbol kind")]
    Empty,

    /// A kind was listed more than once in a kind set.
    #[display("Symbol kind {} is listed more than once", _0)]
    DuplicateKind(SymbolKind),

    /// A layout holds a kind some number of times other than two.
    #[display("Symbol kind {} appears {} times, expected 2", kind, count)]
    Unpaired {
        /// The offending kind.
        kind: SymbolKind,
        /// How often it appeared.
        count: usize,
    },
}

impl std::error::Error for DeckError {}

/// Validated, duplicate-free set of symbol kinds to deal from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSet {
    kinds: Vec<SymbolKind>,
}

impl KindSet {
    /// Validates a list of kinds.
    #[instrument]
    pub fn new(kinds: Vec<SymbolKind>) -> Result<Self, DeckError> {
        if kinds.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut seen = Vec::with_capacity(kinds.len());
        for kind in &kinds {
            if seen.contains(kind) {
                return Err(DeckError::DuplicateKind(*kind));
            }
            seen.push(*kind);
        }
        Ok(Self { kinds })
    }

    /// All eight reference kinds.
    pub fn standard() -> Self {
        Self {
            kinds: SymbolKind::all(),
        }
    }

    /// Returns the kinds in order.
    pub fn kinds(&self) -> &[SymbolKind] {
        &self.kinds
    }

    /// Number of kinds (and therefore pairs).
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false for a validated set.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for KindSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ordered cards of one session, fixed at deal time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deals every kind twice in a uniformly random order.
    #[instrument(skip(rng))]
    pub fn shuffled<R: Rng + ?Sized>(kinds: &KindSet, rng: &mut R) -> Self {
        let layout = super::rules::deal(kinds, rng);
        Self::numbered(&layout)
    }

    /// Builds a deck from a fixed layout.
    ///
    /// Every kind present must occur exactly twice.
    #[instrument]
    pub fn from_layout(layout: &[SymbolKind]) -> Result<Self, DeckError> {
        if layout.is_empty() {
            return Err(DeckError::Empty);
        }
        if let Some((kind, count)) = pair_counts(layout)
            .into_iter()
            .find(|(_, count)| *count != 2)
        {
            return Err(DeckError::Unpaired { kind, count });
        }
        Ok(Self::numbered(layout))
    }

    fn numbered(layout: &[SymbolKind]) -> Self {
        Self {
            cards: layout
                .iter()
                .enumerate()
                .map(|(index, kind)| Card::new(CardId::new(index), *kind))
                .collect(),
        }
    }

    /// Returns the cards in deal order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Looks up a card.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True for a deck with no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of distinct kinds (half the deck).
    pub fn kind_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Number of cards already matched.
    pub fn matched_cards(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched()).count()
    }

    /// Kinds in order of first appearance.
    pub fn kinds(&self) -> Vec<SymbolKind> {
        let mut kinds = Vec::new();
        for card in &self.cards {
            if !kinds.contains(&card.kind()) {
                kinds.push(card.kind());
            }
        }
        kinds
    }

    /// Layout of kinds in deal order.
    pub fn layout(&self) -> Vec<SymbolKind> {
        self.cards.iter().map(Card::kind).collect()
    }
}

/// Counts how often each kind occurs in a layout.
pub fn pair_counts(layout: &[SymbolKind]) -> BTreeMap<SymbolKind, usize> {
    let mut counts = BTreeMap::new();
    for kind in layout {
        *counts.entry(*kind).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_standard_kind_set_has_eight_kinds() {
        assert_eq!(KindSet::standard().len(), 8);
    }

    #[test]
    fn test_kind_set_rejects_duplicates() {
        let result = KindSet::new(vec![SymbolKind::Heart, SymbolKind::Heart]);
        assert_eq!(result, Err(DeckError::DuplicateKind(SymbolKind::Heart)));
    }

    #[test]
    fn test_kind_set_rejects_empty() {
        assert_eq!(KindSet::new(vec![]), Err(DeckError::Empty));
    }

    #[test]
    fn test_shuffled_deck_pairs_every_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::shuffled(&KindSet::standard(), &mut rng);

        assert_eq!(deck.len(), 16);
        assert!(pair_counts(&deck.layout()).values().all(|&c| c == 2));
        for (index, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.id().index(), index);
            assert!(!card.is_revealed());
            assert!(!card.is_matched());
        }
    }

    #[test]
    fn test_layout_with_single_card_rejected() {
        let layout = [SymbolKind::Heart, SymbolKind::Heart, SymbolKind::Star];
        assert_eq!(
            Deck::from_layout(&layout),
            Err(DeckError::Unpaired {
                kind: SymbolKind::Star,
                count: 1
            })
        );
    }

    #[test]
    fn test_kind_names_are_lowercase() {
        assert_eq!(SymbolKind::Coffee.to_string(), "coffee");
        assert_eq!("moon".parse::<SymbolKind>(), Ok(SymbolKind::Moon));
    }
}
