//! Error kinds returned by the list container and the playlist.

use crate::playlist::TrackId;

/// Failures reported by [`NodeList`](crate::list::NodeList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// A 1-based position outside the range accepted by the operation.
    #[error("invalid position {position} (list has {len} nodes)")]
    InvalidPosition { position: usize, len: usize },
    /// The handle refers to a node that has already been removed.
    #[error("node handle is no longer valid")]
    StaleHandle,
    #[error("list is empty")]
    Empty,
}

/// Failures reported by [`Playlist`](crate::playlist::Playlist).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaylistError {
    #[error(transparent)]
    List(#[from] ListError),
    #[error("no track with id {0}")]
    TrackNotFound(TrackId),
}
