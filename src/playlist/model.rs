//! The `Playlist` type: track identity and the now-playing cursor on top of
//! a [`NodeList`].

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, warn};

use crate::error::{ListError, PlaylistError};
use crate::list::{Iter, NodeHandle, NodeList};

use super::track::{Track, TrackId};

/// An ordered list of tracks with a cursor on the current one.
///
/// The cursor is either empty or a handle to a node in `tracks`; every
/// mutating method re-derives it before it could dangle.
#[derive(Debug)]
pub struct Playlist {
    tracks: NodeList<Track>,
    current: Option<NodeHandle>,
    next_id: u64,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new()
    }
}

impl Playlist {
    pub fn new() -> Self {
        Self {
            tracks: NodeList::new(),
            current: None,
            next_id: 1,
        }
    }

    /// Add a track before the first one.
    pub fn add_at_beginning(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        path: impl Into<PathBuf>,
    ) -> TrackId {
        let track = self.make_track(title, artist, duration, path);
        let id = track.id;
        let handle = self.tracks.push_front(track);
        self.after_insert(handle, id);
        id
    }

    /// Add a track after the last one.
    pub fn add_at_end(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        path: impl Into<PathBuf>,
    ) -> TrackId {
        let track = self.make_track(title, artist, duration, path);
        let id = track.id;
        let handle = self.tracks.push_back(track);
        self.after_insert(handle, id);
        id
    }

    /// Add a track at 1-based `position` (`1..=len + 1`).
    ///
    /// A rejected position leaves the playlist untouched and does not use up
    /// an id.
    pub fn add_at_position(
        &mut self,
        position: usize,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        path: impl Into<PathBuf>,
    ) -> Result<TrackId, PlaylistError> {
        if !self.tracks.is_valid_insert_position(position) {
            warn!(
                "cannot add track at position {position}: playlist has {} tracks",
                self.tracks.len()
            );
            return Err(ListError::InvalidPosition {
                position,
                len: self.tracks.len(),
            }
            .into());
        }
        let track = self.make_track(title, artist, duration, path);
        let id = track.id;
        let handle = self.tracks.insert_at(position, track)?;
        self.after_insert(handle, id);
        Ok(id)
    }

    /// Remove the first track with `id` and return it.
    ///
    /// When it is the current track the cursor moves to the following track,
    /// or to the preceding one at the end of the list, or becomes empty.
    pub fn remove_by_id(&mut self, id: TrackId) -> Result<Track, PlaylistError> {
        let Some(handle) = self.find_by_id(id) else {
            warn!("cannot remove track {id}: not in playlist");
            return Err(PlaylistError::TrackNotFound(id));
        };

        if self.current == Some(handle) {
            self.current = self
                .tracks
                .next(handle)
                .or_else(|| self.tracks.prev(handle));
        }

        let track = self.tracks.remove(handle)?;
        debug!(
            "removed track {id} ({:?}), {} left",
            track.title,
            self.tracks.len()
        );
        Ok(track)
    }

    /// First node, in playlist order, whose title equals `title`.
    pub fn search_by_title(&self, title: &str) -> Option<NodeHandle> {
        self.tracks
            .iter()
            .find(|(_, t)| t.title == title)
            .map(|(h, _)| h)
    }

    /// Node holding the track with `id`.
    pub fn find_by_id(&self, id: TrackId) -> Option<NodeHandle> {
        self.tracks.iter().find(|(_, t)| t.id == id).map(|(h, _)| h)
    }

    /// Advance the cursor, wrapping from the last track to the first.
    ///
    /// Returns true if the cursor changed.
    pub fn move_next(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let target = self.tracks.next(current).or_else(|| self.tracks.head());
        self.move_to(current, target)
    }

    /// Step the cursor back. Stops at the first track (no wraparound).
    ///
    /// Returns true if the cursor changed.
    pub fn move_prev(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let target = self.tracks.prev(current);
        self.move_to(current, target)
    }

    /// Put the cursor on `handle`.
    pub fn select(&mut self, handle: NodeHandle) -> Result<(), PlaylistError> {
        if !self.tracks.contains(handle) {
            return Err(ListError::StaleHandle.into());
        }
        self.current = Some(handle);
        Ok(())
    }

    /// Drop every track and empty the cursor. Ids keep counting up.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.current = None;
        debug!("playlist cleared");
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|h| self.tracks.get(h))
    }

    pub fn current_node(&self) -> Option<NodeHandle> {
        self.current
    }

    pub fn head_node(&self) -> Option<NodeHandle> {
        self.tracks.head()
    }

    pub fn next_node(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.tracks.next(handle)
    }

    pub fn track(&self, handle: NodeHandle) -> Option<&Track> {
        self.tracks.get(handle)
    }

    /// 1-based position of the cursor.
    pub fn position_of_current(&self) -> Option<usize> {
        self.current.and_then(|h| self.tracks.position_of(h))
    }

    pub fn iter(&self) -> Iter<'_, Track> {
        self.tracks.iter()
    }

    fn make_track(
        &mut self,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        path: impl Into<PathBuf>,
    ) -> Track {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        Track {
            id,
            title: title.into(),
            artist: artist.into(),
            duration,
            path: path.into(),
        }
    }

    fn after_insert(&mut self, handle: NodeHandle, id: TrackId) {
        if self.current.is_none() {
            self.current = Some(handle);
        }
        debug!("added track {id}, {} in playlist", self.tracks.len());
    }

    fn move_to(&mut self, from: NodeHandle, target: Option<NodeHandle>) -> bool {
        match target {
            Some(target) if target != from => {
                self.current = Some(target);
                debug!("cursor moved to {:?}", self.current_track().map(|t| t.id));
                true
            }
            _ => false,
        }
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = (NodeHandle, &'a Track);
    type IntoIter = Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
