//! UI rendering helpers for the terminal user interface.
//!
//! This module only reads the playlist: it walks from the head node, marks
//! the node under the cursor and prints the track count.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use tracklist::{Playlist, Track, TrackId};

use crate::app::App;
use crate::audio::TransportState;
use crate::config::{TrackField, UiSettings};

const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "next/prev"),
    ("g/G", "first/last"),
    ("enter", "play selected"),
    ("space", "pause/resume"),
    ("s", "stop"),
    ("d", "remove"),
    ("/", "find title"),
    ("i", "info"),
    ("q", "quit"),
];

/// Snapshot of the player handed to [`draw`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackView {
    pub state: TransportState,
    pub elapsed: Duration,
    pub track: Option<TrackId>,
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compose a row label for `track` from the configured `fields`.
///
/// Empty fields (no artist, unknown duration) are skipped; the title is used
/// when nothing else is left.
pub fn track_label(track: &Track, fields: &[TrackField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.trim().to_string());
                }
            }
            TrackField::Artist => {
                if !track.artist.trim().is_empty() {
                    parts.push(track.artist.trim().to_string());
                }
            }
            TrackField::Duration => {
                if let Some(d) = track.known_duration() {
                    parts.push(format_mmss(d));
                }
            }
            TrackField::Filename => {
                if let Some(stem) = track.path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.trim().is_empty() {
                        parts.push(stem.to_string());
                    }
                }
            }
            TrackField::Path => {
                parts.push(track.path.display().to_string());
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

/// Elapsed/total text for the status line, e.g. `01:05 / 03:20`.
fn time_text(elapsed: Duration, total: Option<Duration>) -> String {
    match total {
        Some(t) => format!("{} / {}", format_mmss(elapsed), format_mmss(t)),
        None => format_mmss(elapsed),
    }
}

/// First visible row so that `selected` (0-based) stays roughly centered.
fn window_start(selected: usize, total: usize, height: usize) -> usize {
    if total <= height || height == 0 {
        return 0;
    }
    let half = height / 2;
    let start = selected.saturating_sub(half);
    start.min(total - height)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn status_text(app: &App, playback: &PlaybackView, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    let playlist = &app.playlist;
    let now_playing = playback
        .track
        .and_then(|id| playlist.find_by_id(id))
        .and_then(|h| playlist.track(h));
    match now_playing {
        Some(track) => {
            parts.push(playback.state.label().to_string());
            parts.push(format!(
                "Song: {} [{}]",
                track_label(track, &ui.track_fields, &ui.track_separator),
                time_text(playback.elapsed, track.known_duration())
            ));
        }
        None => parts.push(TransportState::Stopped.label().to_string()),
    }

    let position = playlist
        .position_of_current()
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    parts.push(format!("Track {position} of {}", playlist.len()));

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {dir}"));
    }

    if app.search_mode {
        parts.push(format!("FIND: {}_", app.search_query));
    } else if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Walk the playlist from the head and build the rows in `start..start + height`.
///
/// Returns the rows and the index of the cursor row within them.
fn visible_rows(
    playlist: &Playlist,
    start: usize,
    height: usize,
    ui: &UiSettings,
    playing: Option<TrackId>,
) -> (Vec<ListItem<'static>>, Option<usize>) {
    let current = playlist.current_node();
    let mut rows = Vec::new();
    let mut selected = None;

    let mut node = playlist.head_node();
    let mut index = 0usize;
    while let Some(handle) = node {
        if index >= start + height {
            break;
        }
        if index >= start {
            if let Some(track) = playlist.track(handle) {
                if Some(handle) == current {
                    selected = Some(rows.len());
                }
                let marker = if Some(track.id) == playing { "♪ " } else { "  " };
                let label = track_label(track, &ui.track_fields, &ui.track_separator);
                rows.push(ListItem::new(format!("{marker}{label}")));
            }
        }
        node = playlist.next_node(handle);
        index += 1;
    }

    (rows, selected)
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, playback: &PlaybackView, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tracklist ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, playback, ui_settings))
        .block(
            Block::bordered()
                .padding(Padding::left(1))
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Main list
    {
        let list_area = chunks[2];
        // Borders take two rows.
        let height = list_area.height.saturating_sub(2) as usize;
        let total = app.playlist.len();
        let selected = app.playlist.position_of_current().map_or(0, |p| p - 1);
        let start = window_start(selected, total, height);

        let (rows, selected_in_view) =
            visible_rows(&app.playlist, start, height, ui_settings, playback.track);

        let list = List::new(rows)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(selected_in_view);
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let meta = match app.playlist.current_track() {
            Some(track) => format!(
                "Id: {}\nTitle: {}\nArtist: {}\nDuration: {}\nPath: {}",
                track.id,
                track.title,
                if track.artist.is_empty() { "-" } else { track.artist.as_str() },
                track.known_duration().map_or_else(|| "-".to_string(), format_mmss),
                track.path.display()
            ),
            None => "No track selected".to_string(),
        };
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding::left(1))
                    .borders(Borders::ALL)
                    .title(" track info (i closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::left(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
