//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playlist, the search
//! prompt and the status line.

mod model;

pub use model::*;
