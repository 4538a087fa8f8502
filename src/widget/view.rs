//! The render surface: a pure description of what the widget shows.
//!
//! `render` never touches state; `ui::draw` turns a `Surface` into terminal
//! widgets.

use crate::handle::ObjectRef;

pub const UPLOAD_PROMPT: &str = "음성 파일을 업로드해주세요";
pub const UPLOAD_HINT: &str = "MP3, WAV, OGG 등 지원";
pub const NOW_PLAYING: &str = "Now Playing";

/// The body of the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel<'a> {
    /// No file loaded: show the upload affordance.
    Empty,
    /// A file is loaded: show its name and a playback control bound to `source`.
    Loaded {
        file_name: &'a str,
        source: &'a ObjectRef,
    },
}

/// What the single action button does in the current state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonKind {
    Upload,
    Download,
}

impl ButtonKind {
    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Upload => "오디오 파일 업로드",
            ButtonKind::Download => "파일 다운로드",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface<'a> {
    pub date: &'a str,
    pub panel: Panel<'a>,
    pub button: ButtonKind,
}

impl Surface<'_> {
    pub fn is_loaded(&self) -> bool {
        matches!(self.panel, Panel::Loaded { .. })
    }
}

/// Derive the surface from (active reference, recorded name, date).
pub fn render<'a>(source: Option<&'a ObjectRef>, file_name: &'a str, date: &'a str) -> Surface<'a> {
    match source {
        Some(source) => Surface {
            date,
            panel: Panel::Loaded { file_name, source },
            button: ButtonKind::Download,
        },
        None => Surface {
            date,
            panel: Panel::Empty,
            button: ButtonKind::Upload,
        },
    }
}
