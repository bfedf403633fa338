//! Phase-specific typestate structs for the memory game.
//!
//! Each phase is its own type with only the fields that phase needs.
//! A `MatchWon` always carries its final move count; a `MatchSetup`
//! never has cards.

use super::action::{Flip, FlipRejected};
use super::contracts::{Contract, FlipContract};
use super::phases::Reveal;
use super::{CardId, Deck, DeckError, KindSet, SymbolKind};
use rand::Rng;
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game waiting to be dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    kinds: KindSet,
}

impl MatchSetup {
    /// Creates a setup for the given kinds.
    #[instrument]
    pub fn new(kinds: KindSet) -> Self {
        Self { kinds }
    }

    /// Setup with the eight reference kinds.
    pub fn standard() -> Self {
        Self::new(KindSet::standard())
    }

    /// Returns the kinds that will be dealt.
    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    /// Shuffles and deals (consumes setup, returns in-progress).
    #[instrument(skip(self, rng), fields(kinds = self.kinds.len()))]
    pub fn start<R: Rng + ?Sized>(self, rng: &mut R) -> MatchInProgress {
        let deck = Deck::shuffled(&self.kinds, rng);
        MatchInProgress::dealt(self.kinds, deck)
    }

    /// Deals a fixed layout (consumes setup, returns in-progress).
    ///
    /// The layout's kinds replace the configured ones.
    #[instrument(skip(self, layout))]
    pub fn with_layout(self, layout: &[SymbolKind]) -> Result<MatchInProgress, DeckError> {
        MatchInProgress::from_layout(layout)
    }
}

impl Default for MatchSetup {
    fn default() -> Self {
        Self::standard()
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - accepts flips.
///
/// `pending` holds the cards turned this turn, at most two. A
/// mismatched pair stays pending until [`MatchInProgress::conceal_mismatch`]
/// turns it back over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInProgress {
    pub(crate) kinds: KindSet,
    pub(crate) deck: Deck,
    pub(crate) pending: Vec<CardId>,
    pub(crate) moves: u32,
    pub(crate) matched_pairs: usize,
}

impl MatchInProgress {
    fn dealt(kinds: KindSet, deck: Deck) -> Self {
        Self {
            kinds,
            deck,
            pending: Vec::with_capacity(2),
            moves: 0,
            matched_pairs: 0,
        }
    }

    /// Deals a fixed layout instead of shuffling.
    #[instrument]
    pub fn from_layout(layout: &[SymbolKind]) -> Result<Self, DeckError> {
        let deck = Deck::from_layout(layout)?;
        let kinds = KindSet::new(deck.kinds())?;
        Ok(Self::dealt(kinds, deck))
    }

    /// Turns a card face up.
    ///
    /// When this is the second card of the turn the pair is compared and
    /// `moves` increases by one. A match is recorded immediately; a
    /// mismatch leaves both cards up and pending.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (LegalFlip)
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self), fields(pending = self.pending.len(), moves = self.moves))]
    pub fn flip(&mut self, card: CardId) -> Result<Reveal, FlipRejected> {
        let action = Flip::new(card);
        FlipContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        if let Some(target) = self.deck.get_mut(card) {
            target.reveal();
        }
        self.pending.push(card);

        let reveal = match self.pending.as_slice() {
            [first, second] => self.resolve(*first, *second),
            _ => Reveal::First(card),
        };

        #[cfg(debug_assertions)]
        FlipContract::post(&before, self)?;

        Ok(reveal)
    }

    fn resolve(&mut self, first: CardId, second: CardId) -> Reveal {
        self.moves += 1;

        let matched = match (self.deck.get(first), self.deck.get(second)) {
            (Some(a), Some(b)) if super::rules::is_pair(a, b) => Some(a.kind()),
            _ => None,
        };

        match matched {
            Some(kind) => {
                for id in [first, second] {
                    if let Some(card) = self.deck.get_mut(id) {
                        card.mark_matched();
                    }
                }
                self.matched_pairs += 1;
                self.pending.clear();
                debug!(%kind, moves = self.moves, matched_pairs = self.matched_pairs, "Pair matched");
                Reveal::Matched {
                    kind,
                    pair: [first, second],
                }
            }
            None => {
                debug!(%first, %second, moves = self.moves, "Pair mismatched");
                Reveal::Mismatched {
                    pair: [first, second],
                }
            }
        }
    }

    /// Turns a pending mismatched pair back face down.
    ///
    /// Returns the concealed pair, or `None` if nothing was awaiting it.
    #[instrument(skip(self))]
    pub fn conceal_mismatch(&mut self) -> Option<[CardId; 2]> {
        let [first, second] = match self.pending.as_slice() {
            [first, second] => [*first, *second],
            _ => return None,
        };
        for id in [first, second] {
            if let Some(card) = self.deck.get_mut(id) {
                card.conceal();
            }
        }
        self.pending.clear();
        Some([first, second])
    }

    /// Returns the deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the kinds dealt.
    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    /// Cards turned this turn, in flip order.
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    /// Completed comparisons so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs matched so far.
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Number of pairs in play.
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// True once every pair is matched.
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.kind_count()
    }

    /// Moves to the won phase if every pair is matched.
    ///
    /// Returns `self` unchanged otherwise.
    #[instrument(skip(self), fields(matched_pairs = self.matched_pairs))]
    pub fn finish(self) -> Result<MatchWon, Self> {
        if self.is_complete() && super::rules::all_pairs_matched(&self.deck) {
            Ok(MatchWon {
                kinds: self.kinds,
                deck: self.deck,
                moves: self.moves,
            })
        } else {
            Err(self)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Won Phase
// ─────────────────────────────────────────────────────────────

/// Game won - every pair matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchWon {
    kinds: KindSet,
    deck: Deck,
    moves: u32,
}

impl MatchWon {
    /// Final move count.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Returns the fully matched deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the kinds that were dealt.
    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    /// Goes back to setup for another round (consumes won).
    #[instrument(skip(self))]
    pub fn restart(self) -> MatchSetup {
        MatchSetup::new(self.kinds)
    }
}
