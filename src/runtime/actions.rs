use std::env;
use std::path::PathBuf;

use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer};
use crate::chooser;
use crate::config::{self, DownloadSettings};
use crate::handle::ObjectStore;
use crate::widget::ButtonAction;

/// Press the widget's single action button.
pub fn press_action<S: ObjectStore>(app: &mut App<S>, settings: &config::Settings) {
    match app.widget.press_action() {
        ButtonAction::OpenChooser => open_chooser(app, settings),
        ButtonAction::Download { href, file_name } => {
            let dir = download_dir(&settings.download);
            // Failures are already reported in the status line.
            let _ = app.download(href, &file_name, &dir);
        }
    }
}

/// Rescan the chooser root and show the chooser.
pub fn open_chooser<S: ObjectStore>(app: &mut App<S>, settings: &config::Settings) {
    let candidates = chooser::scan(app.chooser.root(), &settings.chooser);
    app.clear_status();
    app.chooser.open_with(candidates);
}

/// Close the chooser with the highlighted file and hand it to the widget.
pub fn confirm_chooser<S: ObjectStore>(app: &mut App<S>, audio_player: &AudioPlayer) {
    if let Some(cmd) = choose(app) {
        let _ = audio_player.send(cmd);
    }
}

/// A failed read is reported and treated as an empty selection.
fn choose<S: ObjectStore>(app: &mut App<S>) -> Option<AudioCmd> {
    match app.chooser.confirm() {
        Ok(files) => app.select_files(files),
        Err(e) => {
            tracing::warn!(%e, "cannot read chosen file");
            app.set_status(format!("Could not open file: {e}"));
            None
        }
    }
}

/// Close the chooser without a choice: an empty selection event.
pub fn cancel_chooser<S: ObjectStore>(app: &mut App<S>) {
    let files = app.chooser.cancel();
    // An empty selection leaves the widget as it was.
    let _ = app.select_files(files);
}

/// Where saved copies go: configured dir, XDG/home downloads, then cwd.
pub fn download_dir(settings: &DownloadSettings) -> PathBuf {
    settings
        .dir
        .clone()
        .or_else(config::default_download_dir)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
