use std::env;
use std::path::Path;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracklist::Playlist;

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::library::scan;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    settings::init_logging(&settings.logging)?;
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let dir = env::args().nth(1).unwrap_or_else(|| {
        env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| ".".to_string())
    });

    let mut app = App::new(Playlist::new());
    app.load_entries(scan(Path::new(&dir), &settings.library));
    app.set_current_dir(dir.clone());
    info!("starting with {} tracks from {dir}", app.playlist.len());

    // Without an output device the playlist is still browsable.
    let mut player = match AudioPlayer::new() {
        Ok(p) => Some(p),
        Err(e) => {
            warn!("{e}");
            app.set_status(e.to_string());
            None
        }
    };

    if settings.playback.autoplay {
        if let Some(player) = player.as_mut() {
            event_loop::play_current(&mut app, player);
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, player.as_mut());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(player) = player.as_mut() {
        player.stop();
    }

    run_result
}
