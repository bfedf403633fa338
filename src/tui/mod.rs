//! Terminal UI for the keepsake memory game

#![warn(missing_docs)]

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use keepsake_memory::MatchEngine;
use keepsake_playback::{PlaybackSession, SimulatedDevice};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

use crate::config::SiteConfig;
use crate::table::MatchTable;
pub use app::{App, COLUMNS, Flow, MusicSession, VideoSession};
pub use input::move_cursor;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the memory game with the background music and video bars.
///
/// Must be called from within a tokio runtime.
pub async fn run_memory(config: SiteConfig) -> Result<()> {
    // Log to a file so the terminal stays clean
    let log_file = std::fs::File::create("keepsake_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!("Starting keepsake memory game");

    let engine = MatchEngine::new(config.kind_set()?);
    let (table, match_events) = MatchTable::new(engine, config.mismatch_delay());
    let music = PlaybackSession::new(
        config.music_catalog()?,
        SimulatedDevice::default(),
        config.music_volume(),
    );
    let video = PlaybackSession::new(
        config.video_catalog()?,
        SimulatedDevice::default(),
        config.video_volume(),
    );
    let mut app = App::new(table, match_events, music, video);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Memory game closed");
    res
}

#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        // Let the flip-back task run between frames
        tokio::task::yield_now().await;

        let now = Instant::now();
        app.tick(now.duration_since(last_tick));
        last_tick = now;
    }
}
