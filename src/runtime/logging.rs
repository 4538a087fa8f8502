//! File-backed `tracing` subscriber; the terminal belongs to the UI.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;

use crate::config::{LogSettings, default_log_path};

/// Install the global subscriber. Returns the log file in use, or `None`
/// when logging is off or the file cannot be opened.
pub fn init(settings: &LogSettings) -> Option<PathBuf> {
    let level = parse_level(&settings.level);
    if level == LevelFilter::OFF {
        return None;
    }

    let path = settings.file.clone().or_else(default_log_path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}

/// Unknown level names fall back to `info`.
fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::INFO)
}
