//! Application state and logic.

use super::input::move_cursor;
use crate::table::{MatchEvents, MatchTable};
use crossterm::event::KeyCode;
use keepsake_memory::{AnyMatch, CardId, MatchEvent, MatchPhase};
use keepsake_playback::{
    MediaDevice, PlaybackEvent, PlaybackSession, Playable, SeekTarget, SimulatedDevice, Track,
    Video,
};
use std::time::Duration;
use tracing::{debug, info};

/// Cards per row on screen.
pub const COLUMNS: usize = 4;

const VOLUME_STEP: f32 = 0.1;
const SEEK_STEP: f64 = 10.0;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the terminal UI.
    Quit,
}

/// Background music session.
pub type MusicSession = PlaybackSession<Track, SimulatedDevice>;

/// Video player session, owned apart from the music.
pub type VideoSession = PlaybackSession<Video, SimulatedDevice>;

/// Main application state.
pub struct App {
    table: MatchTable,
    match_events: MatchEvents,
    music: MusicSession,
    video: VideoSession,
    cursor: usize,
    status_message: String,
    music_message: Option<String>,
    video_message: Option<String>,
}

impl App {
    /// Creates the application around a table and the two media sessions.
    pub fn new(
        table: MatchTable,
        match_events: MatchEvents,
        music: MusicSession,
        video: VideoSession,
    ) -> Self {
        Self {
            table,
            match_events,
            music,
            video,
            cursor: 0,
            status_message: "Press Enter to start the game".to_string(),
            music_message: None,
            video_message: None,
        }
    }

    /// Snapshot of the memory game.
    pub fn game(&self) -> AnyMatch {
        self.table.snapshot()
    }

    /// Music session.
    pub fn music(&self) -> &MusicSession {
        &self.music
    }

    /// Video session.
    pub fn video(&self) -> &VideoSession {
        &self.video
    }

    /// Highlighted card.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Status line for the game.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Last music notification, if any.
    pub fn music_message(&self) -> Option<&str> {
        self.music_message.as_deref()
    }

    /// Last video notification, if any.
    pub fn video_message(&self) -> Option<&str> {
        self.video_message.as_deref()
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) -> Flow {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Flow::Quit;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter => self.select(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                let len = self.game().cards().len();
                self.cursor = move_cursor(self.cursor, key, COLUMNS, len);
            }
            KeyCode::Char(' ') => {
                let events = self.music.toggle_play();
                self.note_music(events);
            }
            KeyCode::Char('n') => {
                let events = self.music.next();
                self.note_music(events);
            }
            KeyCode::Char('p') => {
                let events = self.music.previous();
                self.note_music(events);
            }
            KeyCode::Char('m') => self.music.toggle_mute(),
            KeyCode::Char('+') | KeyCode::Char('=') => step_volume(&mut self.music, VOLUME_STEP),
            KeyCode::Char('-') => step_volume(&mut self.music, -VOLUME_STEP),
            KeyCode::Char(']') => step_seek(&mut self.music, SEEK_STEP),
            KeyCode::Char('[') => step_seek(&mut self.music, -SEEK_STEP),
            KeyCode::Char('v') => {
                let events = self.video.toggle_play();
                self.note_video(events);
            }
            KeyCode::Char('.') => {
                let events = self.video.next();
                self.note_video(events);
            }
            KeyCode::Char(',') => {
                let events = self.video.previous();
                self.note_video(events);
            }
            KeyCode::Char('M') => self.video.toggle_mute(),
            KeyCode::Char('>') => step_seek(&mut self.video, SEEK_STEP),
            KeyCode::Char('<') => step_seek(&mut self.video, -SEEK_STEP),
            _ => {}
        }
        Flow::Continue
    }

    fn select(&mut self) {
        match self.game().phase() {
            MatchPhase::Idle | MatchPhase::Won => self.restart(),
            MatchPhase::InProgress => {
                let report = self.table.flip(CardId::new(self.cursor));
                if let Some(reason) = report.rejected {
                    debug!(%reason, "Flip ignored");
                }
            }
        }
    }

    /// Deals a new game.
    pub fn restart(&mut self) {
        let generation = self.table.start();
        debug!(%generation, "Restarting game");
        self.cursor = 0;
        self.status_message = "Find all the pairs!".to_string();
    }

    /// Advances clocks and drains notifications.
    pub fn tick(&mut self, elapsed: Duration) {
        let events = advance(&mut self.music, elapsed);
        self.note_music(events);
        let events = advance(&mut self.video, elapsed);
        self.note_video(events);

        while let Ok(event) = self.match_events.try_recv() {
            self.apply_match(event);
        }
    }

    fn note_music(&mut self, events: Vec<PlaybackEvent>) {
        if let Some(message) = describe(&self.music, events, "Now playing") {
            self.music_message = Some(message);
        }
    }

    fn note_video(&mut self, events: Vec<PlaybackEvent>) {
        if let Some(message) = describe(&self.video, events, "Now showing") {
            self.video_message = Some(message);
        }
    }

    fn apply_match(&mut self, event: MatchEvent) {
        debug!(?event, "Handling match event");
        match event {
            MatchEvent::MatchFound { .. } => {
                self.status_message = "Match found!".to_string();
            }
            MatchEvent::NoMatch { .. } => {
                self.status_message = "Not a pair, try again".to_string();
            }
            MatchEvent::SessionWon { moves } => {
                self.status_message = format!(
                    "Congratulations! You won in {} moves! Press 'r' to play again.",
                    moves
                );
            }
            MatchEvent::CardRevealed { .. } | MatchEvent::CardsConcealed { .. } => {}
        }
    }
}

/// Runs a session's simulated device forward and applies what it reports.
fn advance<T: Playable>(
    session: &mut PlaybackSession<T, SimulatedDevice>,
    elapsed: Duration,
) -> Vec<PlaybackEvent> {
    let device_events = session.device_mut().advance(elapsed);
    device_events
        .into_iter()
        .flat_map(|event| session.handle(event))
        .collect()
}

/// Summarises session notifications as a status line, latest first.
fn describe<T: Playable, D: MediaDevice>(
    session: &PlaybackSession<T, D>,
    events: Vec<PlaybackEvent>,
    verb: &str,
) -> Option<String> {
    events.into_iter().rev().find_map(|event| match event {
        PlaybackEvent::ItemChanged { index } => {
            let label = session
                .catalog()
                .get(index)
                .map(Playable::label)
                .unwrap_or_default();
            Some(format!("{}: {}", verb, label))
        }
        PlaybackEvent::PlaybackError { message, .. } => {
            Some(format!("Playback error: {}", message))
        }
        PlaybackEvent::Ended { .. } => None,
    })
}

fn step_volume<T: Playable, D: MediaDevice>(session: &mut PlaybackSession<T, D>, delta: f32) {
    let base = if session.is_muted() && delta < 0.0 {
        0.0
    } else if session.is_muted() {
        session.volume()
    } else {
        session.effective_volume()
    };
    session.set_volume(base + delta);
}

fn step_seek<T: Playable, D: MediaDevice>(session: &mut PlaybackSession<T, D>, delta: f64) {
    let target = session.position() + delta;
    session.seek(SeekTarget::Seconds(target));
}
