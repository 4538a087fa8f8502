//! Error types for the host surfaces around the widget.
//!
//! The widget core itself cannot fail; these cover the chooser, the audio
//! backend and the save-to-disk trigger.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O error (reading a chosen file, writing a download).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reference was revoked or never created by this store.
    #[error("unknown or revoked reference: {0}")]
    UnknownReference(String),

    /// A save name with no usable file component.
    #[error("not a valid file name: {0:?}")]
    InvalidName(String),

    /// No usable audio output device.
    #[error("audio output unavailable: {0}")]
    OutputDevice(String),

    /// The bytes behind a reference could not be decoded for playback.
    #[error("cannot decode audio: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, Error>;
