//! Stateless UI rendering for the memory game and the media bars.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::app::{App, COLUMNS};
use keepsake_memory::{AnyMatch, Card};
use keepsake_playback::{MediaDevice, PlaybackSession, Playable, format_clock};

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let game = app.game();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Counters
            Constraint::Min(12),   // Cards
            Constraint::Length(3), // Status
            Constraint::Length(3), // Music
            Constraint::Length(3), // Video
        ])
        .split(frame.area());

    let title = Paragraph::new("Happy Birthday - Memory Game")
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let counters = Paragraph::new(format!(
        "Moves: {}   Matches: {}/{}",
        game.moves(),
        game.matched_pairs(),
        game.kind_count()
    ))
    .style(Style::default().fg(Color::LightMagenta))
    .alignment(Alignment::Center);
    frame.render_widget(counters, chunks[1]);

    draw_cards(frame, chunks[2], &game, app.cursor());

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    draw_player(
        frame,
        chunks[4],
        app.music(),
        app.music_message()
            .unwrap_or("space play/pause  n/p skip  m mute  +/- volume  [/] seek"),
    );
    draw_player(
        frame,
        chunks[5],
        app.video(),
        app.video_message()
            .unwrap_or("v play/pause  ,/. skip  M mute  </> seek"),
    );
}

fn draw_cards(frame: &mut Frame, area: Rect, game: &AnyMatch, cursor: usize) {
    let cards = game.cards();
    if cards.is_empty() {
        let hint = Paragraph::new("Press Enter to start")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hint, center_rect(area, 30, 1));
        return;
    }

    let rows = cards.len().div_ceil(COLUMNS) as u16;
    let board = center_rect(
        area,
        CELL_WIDTH * COLUMNS as u16,
        CELL_HEIGHT * rows,
    );

    for (index, card) in cards.iter().enumerate() {
        let row = (index / COLUMNS) as u16;
        let col = (index % COLUMNS) as u16;
        let cell = Rect {
            x: board.x + col * CELL_WIDTH,
            y: board.y + row * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        }
        .intersection(area);
        draw_card(frame, cell, card, index == cursor);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, card: &Card, highlighted: bool) {
    let (symbol, base_style) = if card.is_matched() {
        (
            card.kind().glyph(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else if card.is_revealed() {
        (
            card.kind().glyph(),
            Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD),
        )
    } else {
        ("?", Style::default().fg(Color::DarkGray))
    };

    let border = if highlighted {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Magenta)
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, base_style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(paragraph, area);
}

fn draw_player<T: Playable, D: MediaDevice>(
    frame: &mut Frame,
    area: Rect,
    session: &PlaybackSession<T, D>,
    label: &str,
) {
    let state = if session.is_playing() { "▶" } else { "⏸" };
    let volume = if session.is_muted() {
        "muted".to_string()
    } else {
        format!("vol {:.0}%", session.volume() * 100.0)
    };
    let title = format!(
        " {} {}  {} / {}  {} ",
        state,
        session.current().label(),
        format_clock(session.position()),
        format_clock(session.duration()),
        volume
    );

    let gauge = Gauge::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(session.progress())
        .label(label);
    frame.render_widget(gauge, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
