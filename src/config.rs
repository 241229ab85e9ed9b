//! Settings for the player: library scanning, playback, UI and logging.
//!
//! Values come from an optional TOML file and `TRACKLIST__*` environment
//! variables, layered over the defaults in `schema`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
