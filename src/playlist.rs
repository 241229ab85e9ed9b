//! Playlist module: tracks with stable ids and a now-playing cursor.
//!
//! `Playlist` lives in `playlist::model`, the `Track` record and its
//! `TrackId` in `playlist::track`.

mod model;
mod track;

pub use model::*;
pub use track::*;
