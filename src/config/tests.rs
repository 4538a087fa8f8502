use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use super::testing::{EnvGuard, env_lock};
use super::{default_download_dir, default_log_path};
use std::path::PathBuf;

#[test]
fn resolve_config_path_prefers_briefing_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("BRIEFING_CONFIG_PATH", "/tmp/briefing-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/briefing-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("briefing")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/briefing/config.toml")
    );
}

#[test]
fn default_log_and_download_paths_follow_xdg_then_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::remove("XDG_DOWNLOAD_DIR");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/state/briefing/briefing.log")
    );
    assert_eq!(
        default_download_dir().unwrap(),
        PathBuf::from("/tmp/home-dir/Downloads")
    );

    let _g4 = EnvGuard::set("XDG_DOWNLOAD_DIR", "/tmp/dl");
    assert_eq!(default_download_dir().unwrap(), PathBuf::from("/tmp/dl"));
}

#[test]
fn settings_load_from_config_file_and_parse_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
header_text = "hello"
date_style = "en-us"

[audio]
autoplay = false
volume = 0.5
quit_fade_out_ms = 0

[controls]
scrub_seconds = 9

[chooser]
dir = "/srv/briefings"
extensions = ["mp3"]
recursive = false
include_hidden = true

[download]
dir = "/tmp/out"
fallback_name = "briefing"

[log]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BRIEFING_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("BRIEFING__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.date_style, DateStyle::English);
    assert!(!s.audio.autoplay);
    assert_eq!(s.audio.volume, 0.5);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.chooser.dir, Some(PathBuf::from("/srv/briefings")));
    assert_eq!(s.chooser.extensions, vec!["mp3".to_string()]);
    assert!(!s.chooser.recursive);
    assert!(s.chooser.include_hidden);
    assert_eq!(s.download.dir, Some(PathBuf::from("/tmp/out")));
    assert_eq!(s.download.fallback_name, "briefing");
    assert_eq!(s.log.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[controls]\nscrub_seconds = 5\n").unwrap();

    let _g1 = EnvGuard::set("BRIEFING_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("BRIEFING__CONTROLS__SCRUB_SECONDS", "12");

    let s = Settings::load().unwrap();
    assert_eq!(s.controls.scrub_seconds, 12);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let _g1 = EnvGuard::set("BRIEFING_CONFIG_PATH", missing.to_str().unwrap());

    let s = Settings::load().unwrap();
    assert!(s.audio.autoplay);
    assert_eq!(s.ui.date_style, DateStyle::Korean);
    assert_eq!(s.download.fallback_name, "audio-file");
    assert!(s.validate().is_ok());
}

#[test]
fn partial_tables_keep_field_defaults() {
    let s: Settings = toml::from_str("[audio]\nvolume = 0.25\n").unwrap();
    assert_eq!(s.audio.volume, 0.25);
    assert!(s.audio.autoplay);
    assert_eq!(s.audio.quit_fade_out_ms, 300);
    assert_eq!(s.chooser.extensions.len(), 5);
}

#[test]
fn date_style_accepts_locale_aliases() {
    let s: Settings = toml::from_str("[ui]\ndate_style = \"ko-kr\"\n").unwrap();
    assert_eq!(s.ui.date_style, DateStyle::Korean);
    let s: Settings = toml::from_str("[ui]\ndate_style = \"iso\"\n").unwrap();
    assert_eq!(s.ui.date_style, DateStyle::Iso);
    assert!(toml::from_str::<Settings>("[ui]\ndate_style = \"klingon\"\n").is_err());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.controls.scrub_seconds = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.download.fallback_name = "  ".to_string();
    assert!(s.validate().is_err());

    for bad in ["..", "saves/brief.mp3"] {
        let mut s = Settings::default();
        s.download.fallback_name = bad.to_string();
        assert!(s.validate().is_err(), "{bad} should be rejected");
    }

    assert!(Settings::default().validate().is_ok());
}
