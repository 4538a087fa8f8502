//! The playback widget: file selection, handle lifecycle and the derived view.
//!
//! `PlaybackWidget` wires the input-to-state bridge (`handle_file_change`)
//! to the `HandleManager` and exposes a pure `Surface` for drawing. It is
//! the only place where widget state changes.

mod date;
mod view;

use std::sync::Arc;

pub use date::DisplayDate;
pub use view::{ButtonKind, NOW_PLAYING, Panel, Surface, UPLOAD_HINT, UPLOAD_PROMPT, render};

use crate::download::safe_file_name;
use crate::handle::{HandleManager, ObjectRef, ObjectStore, SelectedFile};

/// The effect of pressing the action button, executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Open the file chooser.
    OpenChooser,
    /// Save the bytes behind `href` as `file_name`.
    Download { href: ObjectRef, file_name: String },
}

pub struct PlaybackWidget<S: ObjectStore> {
    handles: HandleManager<S>,
    date: DisplayDate,
    fallback_name: String,
}

impl<S: ObjectStore> PlaybackWidget<S> {
    pub fn new(store: Arc<S>, date: DisplayDate, fallback_name: impl Into<String>) -> Self {
        Self {
            handles: HandleManager::new(store),
            date,
            fallback_name: fallback_name.into(),
        }
    }

    /// Handle a file-selection event.
    ///
    /// Only the first file is used; an empty selection changes nothing.
    /// Returns the newly active reference.
    pub fn handle_file_change<I>(&mut self, files: I) -> Option<ObjectRef>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        let file = files.into_iter().next()?;
        tracing::info!(name = %file.name, bytes = file.bytes.len(), "file selected");
        Some(self.handles.select(&file, &file.name).clone())
    }

    /// What the action button does right now.
    ///
    /// The download name is the recorded name reduced to a plain file name,
    /// or the fallback when nothing usable was recorded.
    pub fn press_action(&self) -> ButtonAction {
        match self.handles.reference() {
            Some(href) => {
                let file_name = safe_file_name(self.handles.file_name())
                    .unwrap_or_else(|| self.fallback_name.clone());
                ButtonAction::Download {
                    href: href.clone(),
                    file_name,
                }
            }
            None => ButtonAction::OpenChooser,
        }
    }

    pub fn view(&self) -> Surface<'_> {
        render(
            self.handles.reference(),
            self.handles.file_name(),
            self.date.as_str(),
        )
    }

    pub fn reference(&self) -> Option<&ObjectRef> {
        self.handles.reference()
    }

    pub fn file_name(&self) -> &str {
        self.handles.file_name()
    }

    pub fn store(&self) -> &Arc<S> {
        self.handles.store()
    }
}
