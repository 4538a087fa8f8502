use std::ffi::OsString;
use std::path::PathBuf;

use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer};
use crate::handle::{ObjectStore, SelectedFile};

/// Treat command-line paths as the first file-selection event.
pub fn select_initial_files<S, I>(app: &mut App<S>, audio_player: &AudioPlayer, paths: I)
where
    S: ObjectStore,
    I: IntoIterator<Item = OsString>,
{
    if let Some(cmd) = initial_selection(app, paths) {
        let _ = audio_player.send(cmd);
    }
}

/// Files are read lazily, so only the one the widget takes is loaded into
/// memory; unreadable paths before it are reported and skipped.
fn initial_selection<S, I>(app: &mut App<S>, paths: I) -> Option<AudioCmd>
where
    S: ObjectStore,
    I: IntoIterator<Item = OsString>,
{
    let mut problems: Vec<String> = Vec::new();
    let files = paths.into_iter().map(PathBuf::from).filter_map(|path| {
        match SelectedFile::from_path(&path) {
            Ok(f) => Some(f),
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "cannot read file");
                problems.push(format!("Could not open {}: {e}", path.display()));
                None
            }
        }
    });

    let cmd = app.select_files(files);
    if let Some(msg) = problems.pop() {
        app.set_status(msg);
    }
    cmd
}
