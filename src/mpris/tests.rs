use super::*;
use crate::handle::{MemoryStore, ObjectStore, SelectedFile};
use std::sync::mpsc;

fn reference() -> ObjectRef {
    MemoryStore::new().create_ref(&SelectedFile::new("brief.mp3", b"x".to_vec()))
}

fn iface() -> (Arc<Mutex<SharedState>>, mpsc::Receiver<ControlCmd>, PlayerIface) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    (state, rx, iface)
}

#[test]
fn set_now_playing_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };
    let r = reference();

    handle.set_now_playing(Some((&r, "brief.mp3", Some(Duration::from_micros(1_234_567)))));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("brief.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/blob_briefing_1")
        );
    }

    handle.set_now_playing(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let (state, _rx, iface) = iface();

    for (playback, expected) in [
        (PlaybackState::Stopped, "Stopped"),
        (PlaybackState::Playing, "Playing"),
        (PlaybackState::Paused, "Paused"),
    ] {
        state.lock().unwrap().playback = playback;
        assert_eq!(iface.playback_status(), expected);
    }
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (state, _rx, iface) = iface();
    assert!(iface.metadata().is_empty());
    assert!(!iface.can_play());

    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.set_now_playing(Some((&reference(), "brief.mp3", Some(Duration::from_secs(2)))));

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "mpris:length"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
    assert!(iface.can_play());
    assert!(!iface.can_go_next());
}

#[test]
fn player_methods_forward_control_commands() {
    let (_state, rx, iface) = iface();

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();
    iface.next();
    iface.previous();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
        ]
    );
}
