//! Session engine: owns the live phase and its generation.
//!
//! The engine is synchronous. A mismatch produces a [`ConcealTicket`]
//! that the caller redeems after the display delay; tickets from an
//! earlier generation are ignored, so a restart can never be disturbed
//! by a late timer.

use super::action::FlipRejected;
use super::phases::{MatchPhase, Reveal};
use super::typestate::{MatchInProgress, MatchSetup, MatchWon};
use super::wrapper::AnyMatch;
use super::{CardId, DeckError, Generation, KindSet, SymbolKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Notification emitted to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A card was turned face up.
    CardRevealed {
        /// The card.
        card: CardId,
        /// Its symbol.
        kind: SymbolKind,
    },
    /// Two revealed cards matched.
    MatchFound {
        /// The shared symbol.
        kind: SymbolKind,
        /// The matched cards.
        pair: [CardId; 2],
        /// Move count after this comparison.
        moves: u32,
    },
    /// Two revealed cards did not match.
    NoMatch {
        /// The mismatched cards.
        pair: [CardId; 2],
        /// Move count after this comparison.
        moves: u32,
    },
    /// A mismatched pair was turned back down.
    CardsConcealed {
        /// The concealed cards.
        pair: [CardId; 2],
    },
    /// Every pair has been matched.
    SessionWon {
        /// Final move count.
        moves: u32,
    },
}

/// Claim on a delayed flip-back, tied to the generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConcealTicket {
    generation: Generation,
    pair: [CardId; 2],
}

impl ConcealTicket {
    /// Generation that issued the ticket.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The mismatched pair to conceal.
    pub fn pair(&self) -> [CardId; 2] {
        self.pair
    }
}

/// Result of a flip request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlipReport {
    /// Notifications, in order.
    pub events: Vec<MatchEvent>,
    /// Present when a mismatch must be concealed after the delay.
    pub conceal: Option<ConcealTicket>,
    /// Present when the flip was ignored.
    pub rejected: Option<FlipRejected>,
}

impl FlipReport {
    fn ignored(reason: FlipRejected) -> Self {
        Self {
            rejected: Some(reason),
            ..Self::default()
        }
    }

    /// True if the flip changed nothing.
    pub fn is_ignored(&self) -> bool {
        self.rejected.is_some()
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle(MatchSetup),
    InProgress(MatchInProgress),
    Won(MatchWon),
}

/// Memory game session with restart support.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    kinds: KindSet,
    phase: Phase,
    generation: Generation,
}

impl MatchEngine {
    /// Creates an idle engine for the given kinds.
    #[instrument]
    pub fn new(kinds: KindSet) -> Self {
        Self {
            phase: Phase::Idle(MatchSetup::new(kinds.clone())),
            kinds,
            generation: Generation::default(),
        }
    }

    /// Deals a fresh shuffled deck using the thread-local generator.
    pub fn start(&mut self) -> Generation {
        let mut rng = rand::rng();
        self.start_with(&mut rng)
    }

    /// Deals a fresh shuffled deck, resetting every counter.
    #[instrument(skip(self, rng), fields(previous = %self.generation))]
    pub fn start_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Generation {
        let game = MatchSetup::new(self.kinds.clone()).start(rng);
        self.install(game)
    }

    /// Deals a fixed layout, resetting every counter.
    ///
    /// The layout applies to this deal only; the next shuffled start
    /// deals the configured kinds again.
    #[instrument(skip(self, layout), fields(previous = %self.generation))]
    pub fn start_with_layout(&mut self, layout: &[SymbolKind]) -> Result<Generation, DeckError> {
        let game = MatchSetup::new(self.kinds.clone()).with_layout(layout)?;
        Ok(self.install(game))
    }

    fn install(&mut self, game: MatchInProgress) -> Generation {
        self.generation = self.generation.next();
        info!(
            generation = %self.generation,
            cards = game.deck().len(),
            "Dealt new memory game"
        );
        self.phase = Phase::InProgress(game);
        self.generation
    }

    /// Turns a card face up.
    ///
    /// Illegal flips are ignored: the report carries the reason and no
    /// events.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn flip(&mut self, card: CardId) -> FlipReport {
        let Phase::InProgress(game) = &mut self.phase else {
            debug!(%card, "Flip ignored outside a running game");
            return FlipReport::ignored(FlipRejected::SessionOver);
        };

        let reveal = match game.flip(card) {
            Ok(reveal) => reveal,
            Err(reason @ FlipRejected::InvariantViolation(_)) => {
                warn!(%card, error = %reason, "Flip broke a game invariant");
                return FlipReport::ignored(reason);
            }
            Err(reason) => {
                debug!(%card, reason = %reason, "Flip ignored");
                return FlipReport::ignored(reason);
            }
        };

        let mut report = FlipReport::default();
        if let Some(face) = game.deck().get(card) {
            report.events.push(MatchEvent::CardRevealed {
                card,
                kind: face.kind(),
            });
        }

        let moves = game.moves();
        match reveal {
            Reveal::First(_) => {}
            Reveal::Matched { kind, pair } => {
                report.events.push(MatchEvent::MatchFound { kind, pair, moves });
                if let Some(moves) = self.settle() {
                    report.events.push(MatchEvent::SessionWon { moves });
                }
            }
            Reveal::Mismatched { pair } => {
                report.events.push(MatchEvent::NoMatch { pair, moves });
                report.conceal = Some(ConcealTicket {
                    generation: self.generation,
                    pair,
                });
            }
        }
        report
    }

    /// Moves a completed game to the won phase; returns the final moves.
    fn settle(&mut self) -> Option<u32> {
        let placeholder = Phase::Idle(MatchSetup::new(self.kinds.clone()));
        match std::mem::replace(&mut self.phase, placeholder) {
            Phase::InProgress(game) => match game.finish() {
                Ok(won) => {
                    let moves = won.moves();
                    info!(moves, generation = %self.generation, "Memory game won");
                    self.phase = Phase::Won(won);
                    Some(moves)
                }
                Err(game) => {
                    self.phase = Phase::InProgress(game);
                    None
                }
            },
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Redeems a conceal ticket after the display delay.
    ///
    /// Does nothing if the session was restarted since the ticket was
    /// issued or the pair is no longer pending.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn conceal(&mut self, ticket: ConcealTicket) -> Vec<MatchEvent> {
        if ticket.generation != self.generation {
            debug!(ticket = %ticket.generation, "Dropping conceal from an earlier game");
            return Vec::new();
        }
        let Phase::InProgress(game) = &mut self.phase else {
            debug!("Dropping conceal outside a running game");
            return Vec::new();
        };
        if game.pending() != ticket.pair.as_slice() {
            debug!(pending = ?game.pending(), "Dropping conceal for a pair no longer pending");
            return Vec::new();
        }
        match game.conceal_mismatch() {
            Some(pair) => vec![MatchEvent::CardsConcealed { pair }],
            None => Vec::new(),
        }
    }

    /// Returns a snapshot of the current phase.
    pub fn snapshot(&self) -> AnyMatch {
        match &self.phase {
            Phase::Idle(game) => game.into(),
            Phase::InProgress(game) => game.into(),
            Phase::Won(game) => game.into(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        match &self.phase {
            Phase::Idle(_) => MatchPhase::Idle,
            Phase::InProgress(_) => MatchPhase::InProgress,
            Phase::Won(_) => MatchPhase::Won,
        }
    }

    /// Generation of the current deal (zero before the first deal).
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Kinds dealt by the next shuffled start.
    pub fn kinds(&self) -> &KindSet {
        &self.kinds
    }

    /// True while a mismatched pair waits to be concealed.
    pub fn is_resolving(&self) -> bool {
        matches!(&self.phase, Phase::InProgress(game) if game.pending().len() == 2)
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(KindSet::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::heart_star_layout;

    fn dealt() -> MatchEngine {
        let mut engine = MatchEngine::default();
        engine
            .start_with_layout(&heart_star_layout())
            .expect("valid layout");
        engine
    }

    #[test]
    fn test_flip_before_start_ignored() {
        let mut engine = MatchEngine::default();
        let report = engine.flip(CardId::new(0));
        assert_eq!(report.rejected, Some(FlipRejected::SessionOver));
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_match_emits_match_found() {
        let mut engine = dealt();
        engine.flip(CardId::new(0));
        let report = engine.flip(CardId::new(1));

        assert!(report.events.contains(&MatchEvent::MatchFound {
            kind: SymbolKind::Heart,
            pair: [CardId::new(0), CardId::new(1)],
            moves: 1,
        }));
        assert!(report.conceal.is_none());
    }

    #[test]
    fn test_mismatch_issues_ticket() {
        let mut engine = dealt();
        engine.flip(CardId::new(0));
        let report = engine.flip(CardId::new(2));

        let ticket = report.conceal.expect("mismatch issues a ticket");
        assert_eq!(ticket.generation(), engine.generation());
        assert!(engine.is_resolving());

        let events = engine.conceal(ticket);
        assert_eq!(
            events,
            vec![MatchEvent::CardsConcealed {
                pair: [CardId::new(0), CardId::new(2)]
            }]
        );
        assert!(!engine.is_resolving());
    }

    #[test]
    fn test_third_flip_while_resolving_ignored() {
        let mut engine = dealt();
        engine.flip(CardId::new(0));
        engine.flip(CardId::new(2));

        let report = engine.flip(CardId::new(4));
        assert_eq!(report.rejected, Some(FlipRejected::ResolutionPending));
        assert_eq!(engine.snapshot().moves(), 1);
    }

    #[test]
    fn test_stale_ticket_after_restart_ignored() {
        let mut engine = dealt();
        engine.flip(CardId::new(0));
        let ticket = engine.flip(CardId::new(2)).conceal.expect("ticket");

        engine
            .start_with_layout(&heart_star_layout())
            .expect("valid layout");
        engine.flip(CardId::new(0));
        engine.flip(CardId::new(2));

        // The old ticket names the same pair but an earlier generation.
        assert!(engine.conceal(ticket).is_empty());
        assert!(engine.is_resolving());
    }

    #[test]
    fn test_win_emits_session_won_once() {
        let mut engine = dealt();
        let mut won = Vec::new();
        for pair in 0..8 {
            engine.flip(CardId::new(pair * 2));
            let report = engine.flip(CardId::new(pair * 2 + 1));
            won.extend(
                report
                    .events
                    .into_iter()
                    .filter(|e| matches!(e, MatchEvent::SessionWon { .. })),
            );
        }
        assert_eq!(won, vec![MatchEvent::SessionWon { moves: 8 }]);
        assert_eq!(engine.phase(), MatchPhase::Won);

        let report = engine.flip(CardId::new(0));
        assert_eq!(report.rejected, Some(FlipRejected::SessionOver));
    }

    #[test]
    fn test_restart_bumps_generation() {
        let mut engine = MatchEngine::default();
        let first = engine.start();
        let second = engine.start();
        assert_ne!(first, second);
        assert_eq!(engine.snapshot().moves(), 0);
        assert_eq!(engine.snapshot().cards().len(), 16);
    }

    #[test]
    fn test_layout_deal_keeps_configured_kinds() {
        let kinds = KindSet::new(vec![SymbolKind::Cake, SymbolKind::Moon, SymbolKind::Gift])
            .expect("distinct kinds");
        let mut engine = MatchEngine::new(kinds.clone());
        engine
            .start_with_layout(&heart_star_layout())
            .expect("valid layout");
        assert_eq!(engine.snapshot().kind_count(), 2);
        assert_eq!(engine.kinds(), &kinds);

        engine.start();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.cards().len(), 6);
        assert!(
            snapshot
                .cards()
                .iter()
                .all(|card| kinds.kinds().contains(&card.kind()))
        );
    }
}
