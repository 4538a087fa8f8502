use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "briefing";

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then lets environment
/// variables (prefix `BRIEFING__`) override it, and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("BRIEFING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.scrub_seconds == 0 {
            return Err("controls.scrub_seconds must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err("audio.volume must be between 0.0 and 1.0".to_string());
        }
        let fallback = &self.download.fallback_name;
        if crate::download::safe_file_name(fallback).as_ref() != Some(fallback) {
            return Err("download.fallback_name must be a plain, non-empty file name".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `BRIEFING_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("BRIEFING_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/briefing/config.toml`
/// or `~/.config/briefing/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default log file under `$XDG_STATE_HOME/briefing/` or `~/.local/state/briefing/`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join(APP_DIR).join("briefing.log"))
}

/// Default download directory: `$XDG_DOWNLOAD_DIR`, then `~/Downloads`.
pub fn default_download_dir() -> Option<PathBuf> {
    if let Some(p) = env::var_os("XDG_DOWNLOAD_DIR") {
        return Some(PathBuf::from(p));
    }
    env::var_os("HOME").map(|home| PathBuf::from(home).join("Downloads"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
