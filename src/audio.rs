//! Playback: owns the audio output and the transport state.
//!
//! `AudioPlayer` plays whichever track the caller hands it; deciding what
//! comes next (auto-advance) is the event loop's job.

mod player;
mod sink;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioError, TransportState};

#[cfg(test)]
mod tests;
