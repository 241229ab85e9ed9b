use std::path::PathBuf;
use std::time::Duration;

/// An audio file found on disk, ready to be added to a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub path: PathBuf,
    pub title: String,
    /// Empty when the file carries no artist tag.
    pub artist: String,
    /// `Duration::ZERO` when the file could not be probed.
    pub duration: Duration,
}

impl LibraryEntry {
    /// Case-insensitive "artist - title" key used to order scan results.
    pub fn sort_key(&self) -> String {
        if self.artist.is_empty() {
            self.title.to_lowercase()
        } else {
            format!("{} - {}", self.artist, self.title).to_lowercase()
        }
    }
}
