//! The file chooser: lists local audio files and yields selection events.
//!
//! `scan` walks the chooser root; `FileChooser` holds the overlay state.
//! A confirmed choice is read into memory as a `SelectedFile`.

mod model;
mod scan;

pub use model::{Candidate, FileChooser, fuzzy_match_positions};
pub use scan::scan;

#[cfg(test)]
mod tests;
