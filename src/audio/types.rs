//! Audio commands and the playback state shared with the UI.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::handle::ObjectRef;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace whatever is loaded with the bytes behind `reference`.
    Load { reference: ObjectRef, autoplay: bool },
    /// Resume, or restart from the beginning once the file has ended.
    Play,
    Pause,
    TogglePause,
    /// Rewind to the start and pause.
    Stop,
    /// Seek by the specified number of seconds (positive or negative).
    SeekBy(i32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// The reference currently loaded (if any).
    pub reference: Option<ObjectRef>,
    /// Elapsed playback time.
    pub elapsed: Duration,
    /// Total length, when the container reports one.
    pub total: Option<Duration>,
    /// Whether playback is currently active.
    pub playing: bool,
    /// Why the last load or seek could not produce sound.
    pub error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
