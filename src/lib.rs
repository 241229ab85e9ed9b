//! Playlist engine: an ordered track list with a now-playing cursor that
//! stays valid across insertions and removals.
//!
//! [`list::NodeList`] is the generic arena-backed doubly-linked container;
//! [`playlist::Playlist`] wraps it with track ids, the cursor and navigation.

pub mod error;
pub mod list;
pub mod playlist;

pub use error::{ListError, PlaylistError};
pub use list::{NodeHandle, NodeList};
pub use playlist::{Playlist, Track, TrackId};
