use std::time::Duration;

use log::{debug, info};
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracklist::Track;
use tracklist::TrackId;

use super::sink::create_sink;
use super::types::{AudioError, TransportState};

/// Plays one track at a time on the default output device.
///
/// The player never looks at the playlist itself: the caller hands it the
/// current track and polls [`finished`](Self::finished) to decide what to
/// play next.
pub struct AudioPlayer {
    stream: OutputStream,
    sink: Option<Sink>,
    loaded: Option<TrackId>,
    state: TransportState,
}

impl AudioPlayer {
    pub fn new() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::NoDevice(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            loaded: None,
            state: TransportState::Stopped,
        })
    }

    /// Replace whatever is loaded with `track` and start playing it.
    pub fn play(&mut self, track: &Track) -> Result<(), AudioError> {
        self.stop();

        let sink = create_sink(&self.stream, &track.path)?;
        sink.play();
        self.sink = Some(sink);
        self.loaded = Some(track.id);
        self.state = TransportState::Playing;
        info!("playing track {}: {}", track.id, track.path.display());
        Ok(())
    }

    /// Pause or resume the loaded track. Returns false when nothing is loaded.
    pub fn toggle_pause(&mut self) -> bool {
        let Some(sink) = self.sink.as_ref() else {
            return false;
        };
        self.state = self.state.toggled();
        match self.state {
            TransportState::Playing => sink.play(),
            TransportState::Paused => sink.pause(),
            TransportState::Stopped => return false,
        }
        debug!("transport {}", self.state.label());
        true
    }

    /// Stop playback and unload the current track.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.loaded = None;
        self.state = TransportState::Stopped;
    }

    /// True once a playing track has run out of samples.
    pub fn finished(&self) -> bool {
        self.state == TransportState::Playing && self.sink.as_ref().is_some_and(Sink::empty)
    }

    pub fn elapsed(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Id of the track currently loaded, if any.
    pub fn loaded(&self) -> Option<TrackId> {
        self.loaded
    }
}
