//! Keepsake - a birthday memory game with background music and video
//!
//! The game logic lives in `keepsake_memory` and playback coordination in
//! `keepsake_playback`. This crate wires them to a TOML configuration, the
//! tokio clock, and a terminal front end.
//!
//! # Architecture
//!
//! - **Config**: site settings and static media catalogs
//! - **Table**: the memory engine with its mismatch flip-back timer
//! - **TUI**: card grid, status line, music bar, and video bar
//!
//! # Example
//!
//! ```no_run
//! use keepsake::{MatchTable, SiteConfig};
//! use keepsake_memory::{CardId, MatchEngine};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = SiteConfig::load_or_default("keepsake.toml")?;
//! let engine = MatchEngine::new(config.kind_set()?);
//! let (mut table, mut events) = MatchTable::new(engine, config.mismatch_delay());
//! table.start();
//! table.flip(CardId::new(0));
//! let first = events.recv().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod table;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, MemoryConfig, MusicConfig, SiteConfig, TimelineEntry, VideoConfig};

// Crate-level exports - Async game driver
pub use table::{MatchEvents, MatchTable};

// Crate-level exports - Terminal UI
pub use tui::{App, COLUMNS, Flow, MusicSession, VideoSession, move_cursor, run_memory};
