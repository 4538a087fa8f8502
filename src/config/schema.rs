use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/briefing/config.toml` or `~/.config/briefing/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BRIEFING__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ui: UiSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub chooser: ChooserSettings,
    pub download: DownloadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The title rendered in the header box.
    pub header_text: String,
    /// How the date under the title is written.
    pub date_style: DateStyle,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "오후 1시 창업이야기 뉴스 브리핑".to_string(),
            date_style: DateStyle::Korean,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateStyle {
    /// `2026년 10월 14일 수요일`
    #[serde(alias = "ko", alias = "ko-kr")]
    Korean,
    /// `2026-10-14`
    Iso,
    /// `Wednesday, October 14, 2026`
    #[serde(alias = "en", alias = "en-us")]
    English,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Start playing as soon as a file is loaded.
    pub autoplay: bool,
    /// Output volume, 0.0 to 1.0.
    pub volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            volume: 1.0,
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChooserSettings {
    /// Directory the file chooser lists. Defaults to the working directory.
    pub dir: Option<PathBuf>,
    /// File extensions to offer (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for ChooserSettings {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "m4a".into(),
            ],
            include_hidden: false,
            recursive: true,
            max_depth: None,
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Where saved copies go. Defaults to `$XDG_DOWNLOAD_DIR` or `~/Downloads`.
    pub dir: Option<PathBuf>,
    /// File name used when the loaded file had no name.
    pub fallback_name: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            dir: None,
            fallback_name: "audio-file".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of `error`, `warn`, `info`, `debug`, `trace`, or `off`.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/briefing/briefing.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
