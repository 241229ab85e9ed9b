//! Library scanning: find audio files on disk and read their basic tags.
//!
//! The scan only produces `LibraryEntry` values; adding them to a playlist
//! is left to the caller.

mod model;
mod scan;

pub use model::*;
pub use scan::scan;
