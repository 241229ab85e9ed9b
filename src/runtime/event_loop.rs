use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, TransportState};
use crate::config;
use crate::ui::{self, PlaybackView};

/// Main terminal event loop: draws, polls input and keeps playback in step
/// with the playlist cursor. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    mut player: Option<&mut AudioPlayer>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if let Some(player) = player.as_deref_mut() {
            if player.finished() {
                if advance_after_finish(app, settings.playback.auto_advance) {
                    play_current(app, player);
                } else {
                    player.stop();
                }
            }
        }

        let view = playback_view(player.as_deref());
        terminal.draw(|f| ui::draw(f, app, &view, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, player.as_deref_mut()) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn playback_view(player: Option<&AudioPlayer>) -> PlaybackView {
    match player {
        Some(p) => PlaybackView {
            state: p.state(),
            elapsed: p.elapsed(),
            track: p.loaded(),
        },
        None => PlaybackView::default(),
    }
}

/// Decide what happens when the loaded track runs out: with auto-advance the
/// cursor moves on (wrapping at the end) and the new current track should be
/// played. Returns true if there is something to play.
pub(super) fn advance_after_finish(app: &mut App, auto_advance: bool) -> bool {
    if !auto_advance {
        return false;
    }
    app.next();
    app.playlist.current_track().is_some()
}

/// Load and play the track under the cursor, reporting failures in the
/// status line.
pub(super) fn play_current(app: &mut App, player: &mut AudioPlayer) {
    let Some(track) = app.playlist.current_track().cloned() else {
        player.stop();
        return;
    };
    match player.play(&track) {
        Ok(()) => app.clear_status(),
        Err(e) => {
            error!("{e}");
            app.set_status(e.to_string());
            player.stop();
        }
    }
}

/// Restart playback on the new cursor track after navigation, unless the
/// player is stopped.
fn follow_cursor(app: &mut App, player: Option<&mut AudioPlayer>) {
    if let Some(player) = player {
        if player.state() != TransportState::Stopped {
            play_current(app, player);
        }
    }
}

/// Handle one key press. Returns true when the user asked to quit.
fn handle_key_event(key: KeyEvent, app: &mut App, player: Option<&mut AudioPlayer>) -> bool {
    if app.search_mode {
        match key.code {
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Enter => {
                if app.submit_search() {
                    follow_cursor(app, player);
                }
            }
            KeyCode::Char(c) if !c.is_control() => app.push_search_char(c),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Char('n') | KeyCode::Down => {
            if app.next() {
                follow_cursor(app, player);
            }
        }
        KeyCode::Char('k') | KeyCode::Char('p') | KeyCode::Up => {
            if app.prev() {
                follow_cursor(app, player);
            }
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.first();
            follow_cursor(app, player);
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.last();
            follow_cursor(app, player);
        }
        KeyCode::Enter => match player {
            Some(player) => play_current(app, player),
            None => app.set_status("No audio output available"),
        },
        KeyCode::Char(' ') => match player {
            Some(player) => {
                if !player.toggle_pause() {
                    play_current(app, player);
                }
            }
            None => app.set_status("No audio output available"),
        },
        KeyCode::Char('s') => {
            if let Some(player) = player {
                player.stop();
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(removed) = app.remove_current() {
                debug!("removed track {} from the UI", removed.id);
                // The player must not keep playing a track that left the list.
                if let Some(player) = player {
                    if player.loaded() == Some(removed.id) {
                        player.stop();
                    }
                }
            }
        }
        KeyCode::Char('/') => app.enter_search(),
        KeyCode::Char('i') => app.toggle_metadata_window(),
        _ => {}
    }

    false
}
