//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the library and player screens
//! using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, LibraryView, Screen};
use crate::audio::{Backend, PlaybackState, Player};
use crate::config::{ControlsSettings, UiSettings};
use crate::permission::Access;

const LIBRARY_CONTROLS: &str = "[j/k] up/down | [gg/G] top/bottom | [enter] play | [q] quit";

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn player_controls(scrub_seconds: u64) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] drag -/+{scrub_seconds}s"),
        "[enter] seek".to_string(),
        "[esc] cancel/back".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn state_icon(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "▶",
        PlaybackState::Paused => "⏸",
        PlaybackState::Stopped => "■",
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Screen regions, shared with the event loop for mouse hit-testing.
pub struct Areas {
    pub header: Rect,
    pub status: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(area);
    Areas {
        header: chunks[0],
        status: chunks[1],
        body: chunks[2],
        footer: chunks[3],
    }
}

/// Split the player body into the title box and the progress gauge.
pub fn player_areas(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Map a column inside the gauge to a track position.
pub fn gauge_position(gauge: Rect, column: u16, max: Duration) -> Duration {
    let inner_x = gauge.x.saturating_add(1);
    let inner_w = gauge.width.saturating_sub(2).max(1);
    let offset = column.saturating_sub(inner_x).min(inner_w);
    max.mul_f64(f64::from(offset) / f64::from(inner_w))
}

/// Render the current screen into the provided `frame`.
pub fn draw<B: Backend>(
    frame: &mut Frame,
    app: &App<B>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let a = areas(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, a.header);

    let mut status_parts: Vec<String> = Vec::new();
    status_parts.push(format!("Dir: {}", app.library.root));
    status_parts.push(format!("Tracks: {}", app.library.tracks.len()));
    if let Some(msg) = &app.status {
        status_parts.push(format!("Error: {msg}"));
    }
    let status = Paragraph::new(status_parts.join(" • "))
        .block(padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, a.status);

    let footer_text = match &app.screen {
        Screen::Library => {
            draw_library(frame, &app.library, a.body);
            LIBRARY_CONTROLS.to_string()
        }
        Screen::Player(player) => {
            draw_player(frame, player, a.body);
            player_controls(controls_settings.scrub_seconds)
        }
    };

    let footer = Paragraph::new(footer_text)
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, a.footer);
}

fn draw_library(frame: &mut Frame, library: &LibraryView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" tracks ");

    let empty_text = match library.access {
        Access::Denied => Some("Storage access denied. Nothing can be listed."),
        Access::Granted if library.tracks.is_empty() => Some("No tracks found."),
        Access::Granted => None,
    };
    if let Some(text) = empty_text {
        let p = Paragraph::new(text)
            .alignment(Alignment::Center)
            .italic()
            .block(block);
        frame.render_widget(p, area);
        return;
    }

    // Only build items for the visible window, keeping the cursor centered.
    let total = library.tracks.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = if total <= height || height == 0 {
        (0, total)
    } else {
        let half = height / 2;
        let start = library.selected.saturating_sub(half).min(total - height);
        (start, start + height)
    };

    let items: Vec<ListItem> = library.tracks[start..end]
        .iter()
        .map(|t| ListItem::new(t.display.as_str()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(library.selected - start));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_player<B: Backend>(frame: &mut Frame, player: &Player<B>, area: Rect) {
    let (title_area, gauge_area) = player_areas(area);

    let mut title = format!("{}  {}", state_icon(player.state()), player.title());
    if let Some(err) = player.last_error() {
        title.push_str(&format!("  ({err})"));
    }
    let heading = format!(" {} / {} ", player.index() + 1, player.catalog().len());
    let title_par = Paragraph::new(title).bold().block(padded(&heading));
    frame.render_widget(title_par, title_area);

    let progress = player.progress();
    let label = format!(
        "{}{} / {}",
        if progress.dragging { "seek to " } else { "" },
        format_mmss(progress.value),
        format_mmss(progress.max)
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(progress.ratio())
        .label(label);
    frame.render_widget(gauge, gauge_area);
}
