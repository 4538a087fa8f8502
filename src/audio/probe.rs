use std::io::Cursor;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;

/// Read the container's reported duration, if it has a non-zero one.
pub(super) fn probe_duration(bytes: &[u8]) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    Some(tagged.properties().duration()).filter(|d| !d.is_zero())
}

/// Where a relative seek lands: never before the start, never past `total`.
pub(super) fn seek_target(elapsed: Duration, secs: i32, total: Option<Duration>) -> Duration {
    let target = if secs >= 0 {
        elapsed.saturating_add(Duration::from_secs(u64::from(secs.unsigned_abs())))
    } else {
        elapsed.saturating_sub(Duration::from_secs(u64::from(secs.unsigned_abs())))
    };
    match total {
        Some(t) => target.min(t),
        None => target,
    }
}
