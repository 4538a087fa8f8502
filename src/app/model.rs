//! Application model types: `App` and `PlaybackState`.
//!
//! `App` owns the playback widget and the file chooser, and mirrors the
//! audio thread's state for drawing. The runtime turns key presses into
//! calls on it.

use std::path::{Path, PathBuf};

use crate::audio::{AudioCmd, PlaybackHandle, PlaybackInfo};
use crate::chooser::FileChooser;
use crate::download::DownloadLink;
use crate::error::Result;
use crate::handle::{MemoryStore, ObjectRef, ObjectStore, SelectedFile};
use crate::widget::PlaybackWidget;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn from_info(info: &PlaybackInfo) -> Self {
        if info.reference.is_none() || info.error.is_some() {
            Self::Stopped
        } else if info.playing {
            Self::Playing
        } else {
            Self::Paused
        }
    }
}

/// The main application model.
pub struct App<S: ObjectStore = MemoryStore> {
    pub widget: PlaybackWidget<S>,
    pub chooser: FileChooser,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,
    /// One-line feedback for saves and unreadable files.
    pub status: Option<String>,
    autoplay: bool,
}

impl<S: ObjectStore> App<S> {
    pub fn new(widget: PlaybackWidget<S>, chooser: FileChooser, autoplay: bool) -> Self {
        Self {
            widget,
            chooser,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            status: None,
            autoplay,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Snapshot of the audio thread's state for the loaded reference.
    ///
    /// Returns `None` while the audio thread still reports an older reference.
    pub fn playback_info(&self) -> Option<PlaybackInfo> {
        let handle = self.playback_handle.as_ref()?;
        let info = handle.lock().ok()?.clone();
        let active = self.widget.reference()?;
        (info.reference.as_ref() == Some(active)).then_some(info)
    }

    /// Refresh `playback` from the audio thread.
    pub fn sync_playback(&mut self) {
        self.playback = self
            .playback_info()
            .map(|info| PlaybackState::from_info(&info))
            .unwrap_or_default();
    }

    /// Feed a file-selection event to the widget.
    ///
    /// Returns the command that starts playback of the new reference.
    pub fn select_files<I>(&mut self, files: I) -> Option<AudioCmd>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let reference = self.widget.handle_file_change(files)?;
        self.status = None;
        Some(AudioCmd::Load {
            reference,
            autoplay: self.autoplay,
        })
    }

    /// Save the bytes behind `href` into `dir` and report the outcome.
    pub fn download(&mut self, href: ObjectRef, file_name: &str, dir: &Path) -> Result<PathBuf> {
        let link = DownloadLink::new(href, file_name);
        match link.activate(&**self.widget.store(), dir) {
            Ok(path) => {
                self.set_status(format!("Saved to {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                tracing::warn!(%e, "save failed");
                self.set_status(format!("Could not save: {e}"));
                Err(e)
            }
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
