//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the playback widget,
//! the file chooser and the mirrored playback state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
