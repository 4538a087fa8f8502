//! Audio backend: a dedicated thread that plays the bytes behind a reference.
//!
//! The UI thread talks to it through `AudioCmd` messages and observes it
//! through the shared `PlaybackInfo`.

mod player;
mod probe;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{AudioCmd, PlaybackHandle, PlaybackInfo};
