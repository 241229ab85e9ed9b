//! Application model: the `App` struct.
//!
//! `App` owns the playlist plus the UI-only state (search prompt, status
//! line, popups). All playlist changes made by the binary go through here.

use log::info;
use tracklist::{Playlist, Track};

use crate::library::LibraryEntry;

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub playlist: Playlist,

    pub search_mode: bool,
    pub search_query: String,

    /// Last message shown in the status box (errors, search misses, ...).
    pub status: Option<String>,

    pub current_dir: Option<String>,
    pub metadata_window: bool,
}

impl App {
    /// Create a new `App` around `playlist`.
    pub fn new(playlist: Playlist) -> Self {
        Self {
            playlist,
            ..Self::default()
        }
    }

    /// Append scanned entries to the playlist. Returns how many were added.
    pub fn load_entries(&mut self, entries: Vec<LibraryEntry>) -> usize {
        let count = entries.len();
        for entry in entries {
            self.playlist
                .add_at_end(entry.title, entry.artist, entry.duration, entry.path);
        }
        info!("loaded {count} tracks, playlist now has {}", self.playlist.len());
        count
    }

    /// Record the current directory in the app state.
    pub fn set_current_dir(&mut self, dir: String) {
        self.current_dir = Some(dir);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Move the cursor to the next track (wrapping). Returns true if it moved.
    pub fn next(&mut self) -> bool {
        self.playlist.move_next()
    }

    /// Move the cursor to the previous track. Returns true if it moved.
    pub fn prev(&mut self) -> bool {
        let moved = self.playlist.move_prev();
        if !moved && !self.playlist.is_empty() {
            self.set_status("Already at the first track");
        }
        moved
    }

    /// Put the cursor on the first track.
    pub fn first(&mut self) {
        if let Some(head) = self.playlist.head_node() {
            let _ = self.playlist.select(head);
        }
    }

    /// Put the cursor on the last track.
    pub fn last(&mut self) {
        if let Some((tail, _)) = self.playlist.iter().last() {
            let _ = self.playlist.select(tail);
        }
    }

    /// Remove the track under the cursor; the cursor moves to a neighbour.
    pub fn remove_current(&mut self) -> Option<Track> {
        let id = self.playlist.current_track()?.id;
        match self.playlist.remove_by_id(id) {
            Ok(track) => {
                self.set_status(format!("Removed \"{}\"", track.title));
                Some(track)
            }
            Err(e) => {
                self.set_status(e.to_string());
                None
            }
        }
    }

    /// Enter the title search prompt with an empty query.
    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search_query.clear();
    }

    /// Leave the search prompt, discarding the query.
    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.search_query.clear();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
    }

    /// Jump the cursor to the first track whose title equals the query.
    ///
    /// Leaves search mode either way; returns true when a track was found.
    pub fn submit_search(&mut self) -> bool {
        self.search_mode = false;
        let query = self.search_query.trim().to_string();
        self.search_query.clear();
        if query.is_empty() {
            return false;
        }

        match self.playlist.search_by_title(&query) {
            Some(node) if self.playlist.select(node).is_ok() => {
                self.clear_status();
                true
            }
            _ => {
                self.set_status(format!("No track titled \"{query}\""));
                false
            }
        }
    }
}
