use super::*;
use crate::audio::{AudioCmd, PlaybackInfo};
use crate::chooser::FileChooser;
use crate::config::DateStyle;
use crate::handle::testing::{RecordingStore, file};
use crate::widget::{ButtonAction, DisplayDate, PlaybackWidget};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

fn app(autoplay: bool) -> (Arc<RecordingStore>, App<RecordingStore>) {
    let store = Arc::new(RecordingStore::default());
    let widget = PlaybackWidget::new(store.clone(), DisplayDate::today(DateStyle::Iso), "audio-file");
    let chooser = FileChooser::new(PathBuf::from("/music"));
    (store, App::new(widget, chooser, autoplay))
}

#[test]
fn select_files_emits_load_for_new_reference() {
    let (_store, mut app) = app(true);
    app.set_status("old message");

    let cmd = app.select_files(vec![file("brief.mp3")]).unwrap();
    let active = app.widget.reference().cloned().unwrap();
    match cmd {
        AudioCmd::Load {
            reference,
            autoplay,
        } => {
            assert_eq!(reference, active);
            assert!(autoplay);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(app.status.is_none());
}

#[test]
fn select_files_respects_autoplay_setting() {
    let (_store, mut app) = app(false);
    let cmd = app.select_files(vec![file("a.mp3")]).unwrap();
    assert!(matches!(cmd, AudioCmd::Load { autoplay: false, .. }));
}

#[test]
fn empty_selection_emits_nothing() {
    let (store, mut app) = app(true);
    assert!(app.select_files(Vec::new()).is_none());
    assert!(store.events().is_empty());
}

#[test]
fn download_saves_active_file_and_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let (_store, mut app) = app(true);
    app.select_files(vec![file("brief.mp3")]);

    let ButtonAction::Download { href, file_name } = app.widget.press_action() else {
        panic!("expected a download action");
    };
    let saved = app.download(href, &file_name, dir.path()).unwrap();

    assert_eq!(saved, dir.path().join("brief.mp3"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"bytes of brief.mp3");
    assert!(app.status.as_deref().unwrap().starts_with("Saved to "));
}

#[test]
fn download_of_superseded_reference_fails_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let (_store, mut app) = app(true);
    app.select_files(vec![file("a.mp3")]);
    let ButtonAction::Download { href: stale, .. } = app.widget.press_action() else {
        panic!("expected a download action");
    };
    app.select_files(vec![file("b.wav")]);

    assert!(app.download(stale, "a.mp3", dir.path()).is_err());
    assert!(app.status.as_deref().unwrap().starts_with("Could not save"));
}

#[test]
fn playback_state_follows_audio_thread_for_active_reference_only() {
    let (_store, mut app) = app(true);
    let handle = Arc::new(Mutex::new(PlaybackInfo::default()));
    app.set_playback_handle(handle.clone());

    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Stopped);

    app.select_files(vec![file("a.mp3")]);
    let a = app.widget.reference().cloned().unwrap();
    *handle.lock().unwrap() = PlaybackInfo {
        reference: Some(a.clone()),
        playing: true,
        ..PlaybackInfo::default()
    };
    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Playing);

    handle.lock().unwrap().playing = false;
    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Paused);

    // Until the audio thread catches up, a stale report is ignored.
    app.select_files(vec![file("b.wav")]);
    assert!(app.playback_info().is_none());
    app.sync_playback();
    assert_eq!(app.playback, PlaybackState::Stopped);
}

#[test]
fn playback_error_reads_as_stopped() {
    let info = PlaybackInfo {
        reference: None,
        error: Some("cannot decode audio".into()),
        ..PlaybackInfo::default()
    };
    assert_eq!(PlaybackState::from_info(&info), PlaybackState::Stopped);
}
