//! Async match table: runs the memory engine on the tokio clock.
//!
//! The engine itself is synchronous. The table adds the mismatch delay
//! as a spawned task, forwards notifications over a channel, and cancels
//! the pending task whenever a new game is dealt.

use keepsake_memory::{
    AnyMatch, CardId, ConcealTicket, DeckError, FlipReport, Generation, MatchEngine, MatchEvent,
    SymbolKind,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Receiver half for match notifications.
pub type MatchEvents = mpsc::UnboundedReceiver<MatchEvent>;

/// A memory game with its flip-back timer.
#[derive(Debug)]
pub struct MatchTable {
    engine: Arc<Mutex<MatchEngine>>,
    events: mpsc::UnboundedSender<MatchEvent>,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

fn lock(engine: &Mutex<MatchEngine>) -> MutexGuard<'_, MatchEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify(tx: &mpsc::UnboundedSender<MatchEvent>, events: Vec<MatchEvent>) {
    for event in events {
        if tx.send(event).is_err() {
            debug!(?event, "No listener for match event");
        }
    }
}

impl MatchTable {
    /// Creates a table and the receiver for its notifications.
    #[instrument(skip(engine))]
    pub fn new(engine: MatchEngine, delay: Duration) -> (Self, MatchEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        info!(delay_ms = delay.as_millis() as u64, "Creating match table");
        let table = Self {
            engine: Arc::new(Mutex::new(engine)),
            events: tx,
            delay,
            pending: None,
        };
        (table, rx)
    }

    /// Deals a new shuffled game, cancelling any pending flip-back.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Generation {
        self.cancel_pending();
        lock(&self.engine).start()
    }

    /// Deals a fixed layout, cancelling any pending flip-back.
    #[instrument(skip(self, layout))]
    pub fn start_with_layout(&mut self, layout: &[SymbolKind]) -> Result<Generation, DeckError> {
        self.cancel_pending();
        lock(&self.engine).start_with_layout(layout)
    }

    /// Flips a card and schedules the flip-back after a mismatch.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn flip(&mut self, card: CardId) -> FlipReport {
        let report = lock(&self.engine).flip(card);
        notify(&self.events, report.events.clone());
        if let Some(ticket) = report.conceal {
            self.schedule(ticket);
        }
        report
    }

    fn schedule(&mut self, ticket: ConcealTicket) {
        self.cancel_pending();
        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();
        let delay = self.delay;
        debug!(
            generation = %ticket.generation(),
            delay_ms = delay.as_millis() as u64,
            "Scheduling flip-back"
        );
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let concealed = lock(&engine).conceal(ticket);
            notify(&events, concealed);
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending flip-back");
            }
            handle.abort();
        }
    }

    /// Snapshot of the current game.
    pub fn snapshot(&self) -> AnyMatch {
        lock(&self.engine).snapshot()
    }

    /// Generation of the current deal.
    pub fn generation(&self) -> Generation {
        lock(&self.engine).generation()
    }

    /// True while a mismatched pair waits to be turned back.
    pub fn is_resolving(&self) -> bool {
        lock(&self.engine).is_resolving()
    }

    /// Mismatch display delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for MatchTable {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
