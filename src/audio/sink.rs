//! Utilities for creating `rodio` sinks from in-memory bytes.
//!
//! The helpers here decode the bytes and prepare a paused `Sink` at the
//! requested start position.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{Error, Result};
use crate::handle::Bytes;

pub(super) fn decode(bytes: Bytes) -> Result<Decoder<Cursor<Bytes>>> {
    Decoder::new(Cursor::new(bytes)).map_err(|e| Error::Decode(e.to_string()))
}

/// Create a paused `Sink` for `bytes` that starts playback at `start_at`.
///
/// Also returns the decoder's own idea of the total duration.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    bytes: Bytes,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>)> {
    let source = decode(bytes)?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}
