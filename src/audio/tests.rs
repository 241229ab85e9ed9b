use super::types::{AudioError, TransportState};
use std::path::PathBuf;

#[test]
fn toggle_flips_between_playing_and_paused() {
    assert_eq!(TransportState::Playing.toggled(), TransportState::Paused);
    assert_eq!(TransportState::Paused.toggled(), TransportState::Playing);
}

#[test]
fn toggle_keeps_stopped_player_stopped() {
    assert_eq!(TransportState::Stopped.toggled(), TransportState::Stopped);
    assert_eq!(TransportState::default(), TransportState::Stopped);
}

#[test]
fn open_error_names_the_file() {
    let err = AudioError::Open {
        path: PathBuf::from("/music/missing.mp3"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    let msg = err.to_string();
    assert!(msg.contains("/music/missing.mp3"));
    assert!(msg.contains("gone"));
}
