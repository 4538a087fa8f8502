//! MPRIS service so desktop media keys and `playerctl` can drive playback.
//!
//! The D-Bus side runs on its own thread; commands come back to the runtime
//! as `ControlCmd` values and the runtime pushes state in through
//! `MprisHandle`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::app::PlaybackState;
use crate::handle::ObjectRef;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.briefing";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    title: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
    }

    /// Describe the loaded file, or clear the metadata with `None`.
    pub fn set_now_playing(&self, now: Option<(&ObjectRef, &str, Option<Duration>)>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        match now {
            Some((reference, title, length)) => {
                s.title = Some(title.to_string());
                s.length_micros = length.map(|d| d.as_micros().min(i64::MAX as u128) as i64);
                s.track_id = track_id(reference);
            }
            None => {
                s.title = None;
                s.length_micros = None;
                s.track_id = None;
            }
        }
    }
}

/// Object path for a reference: object paths only allow `[A-Za-z0-9_]`.
fn track_id(reference: &ObjectRef) -> Option<OwnedObjectPath> {
    let element: String = reference
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    OwnedObjectPath::try_from(format!("{OBJECT_PATH}/track/{element}")).ok()
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "briefing"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    // There is only ever one file; next/previous have nothing to go to.
    fn next(&self) {}

    fn previous(&self) {}

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.state.lock().map(|s| s.title.is_some()).unwrap_or(false)
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.can_play()
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(path) = s.track_id.clone() {
            if let Ok(v) = OwnedValue::try_from(Value::from(path.into_inner())) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }
        if let Some(title) = s.title.clone() {
            if let Ok(v) = OwnedValue::try_from(Value::from(title)) {
                map.insert("xesam:title".to_string(), v);
            }
        }
        if let Some(len) = s.length_micros {
            if let Ok(v) = OwnedValue::try_from(Value::from(len)) {
                map.insert("mpris:length".to_string(), v);
            }
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                tracing::warn!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(OBJECT_PATH, RootIface { tx: tx.clone() }).await {
                tracing::warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                tracing::warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            tracing::info!("MPRIS service registered as {BUS_NAME}");

            // Keep the service alive.
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
