//! Pure memory-matching game logic.
//!
//! Cards are dealt in pairs and turned two at a time. A matching pair
//! stays face up for good; a mismatch is shown until the caller redeems
//! the [`ConcealTicket`] it produced. The game is won when every pair
//! is matched.
//!
//! # Architecture
//!
//! - **Types**: symbols, cards, decks
//! - **Typestate**: `MatchSetup → MatchInProgress → MatchWon`
//! - **Contracts**: flip preconditions, invariant-backed postconditions
//! - **Engine**: restartable session with generation-checked tickets
//!
//! # Example
//!
//! ```
//! use keepsake_memory::{CardId, MatchEngine, MatchEvent};
//!
//! let mut engine = MatchEngine::default();
//! engine.start();
//! let report = engine.flip(CardId::new(0));
//! assert!(matches!(report.events[0], MatchEvent::CardRevealed { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod engine;
mod invariants;
mod phases;
mod rules;
mod types;
mod typestate;
mod wrapper;

pub use action::{Flip, FlipRejected};
pub use contracts::{CardExists, CardHidden, Contract, FlipContract, LegalFlip, TurnOpen};
pub use engine::{ConcealTicket, FlipReport, MatchEngine, MatchEvent};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MatchCountInvariant, MemoryInvariants,
    PairedDeckInvariant, PendingBoundInvariant,
};
pub use phases::{MatchPhase, Reveal};
pub use rules::{all_pairs_matched, deal, is_pair};
pub use types::{Card, CardId, Deck, DeckError, Generation, KindSet, SymbolKind, pair_counts};
pub use typestate::{MatchInProgress, MatchSetup, MatchWon};
pub use wrapper::AnyMatch;
