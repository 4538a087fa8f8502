use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::error::Error;
use crate::handle::{ObjectRef, ObjectStore};

use super::probe::{probe_duration, seek_target};
use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

pub(super) fn spawn_audio_thread<S>(
    store: Arc<S>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()>
where
    S: ObjectStore + Send + Sync + 'static,
{
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let err = Error::OutputDevice(e.to_string());
                tracing::error!(%err, "no audio output");
                drain_without_output(&rx, &playback_info, &err);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut deck = Deck::new(&stream, store, playback_info, audio_settings);

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    deck.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => deck.handle(cmd),
                Err(RecvTimeoutError::Timeout) => deck.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Without an output device every load fails the same way; keep answering
/// until told to quit so the UI never blocks on a dead channel.
fn drain_without_output(rx: &Receiver<AudioCmd>, playback_info: &PlaybackHandle, err: &Error) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            AudioCmd::Quit { .. } => break,
            AudioCmd::Load { reference, .. } => publish(
                playback_info,
                PlaybackInfo {
                    reference: Some(reference),
                    error: Some(err.to_string()),
                    ..PlaybackInfo::default()
                },
            ),
            _ => {}
        }
    }
}

fn publish(playback_info: &PlaybackHandle, info: PlaybackInfo) {
    if let Ok(mut shared) = playback_info.lock() {
        *shared = info;
    }
}

struct Loaded {
    reference: ObjectRef,
    sink: Sink,
    total: Option<Duration>,
}

/// Playback state owned by the audio thread.
struct Deck<'a, S: ObjectStore> {
    stream: &'a OutputStream,
    store: Arc<S>,
    playback_info: PlaybackHandle,
    settings: AudioSettings,
    current: Option<Loaded>,
    paused: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl<'a, S: ObjectStore> Deck<'a, S> {
    fn new(
        stream: &'a OutputStream,
        store: Arc<S>,
        playback_info: PlaybackHandle,
        settings: AudioSettings,
    ) -> Self {
        Self {
            stream,
            store,
            playback_info,
            settings,
            current: None,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load {
                reference,
                autoplay,
            } => self.load(reference, autoplay),
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => self.pause(),
            AudioCmd::TogglePause => {
                if self.paused {
                    self.play();
                } else {
                    self.pause();
                }
            }
            AudioCmd::Stop => self.rebuild_at(Duration::ZERO, false),
            AudioCmd::SeekBy(secs) => {
                let Some(total) = self.current.as_ref().map(|c| c.total) else {
                    return;
                };
                let target = seek_target(self.elapsed(), secs, total);
                self.rebuild_at(target, !self.paused);
            }
            // Handled by the thread loop.
            AudioCmd::Quit { .. } => {}
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn load(&mut self, reference: ObjectRef, autoplay: bool) {
        self.unload();
        tracing::debug!(%reference, autoplay, "loading reference");

        let Some(bytes) = self.store.resolve(&reference) else {
            self.fail(reference.clone(), Error::UnknownReference(reference.to_string()));
            return;
        };
        let probed = probe_duration(&bytes);

        match create_sink_at(self.stream, bytes, Duration::ZERO, self.settings.volume) {
            Ok((sink, decoded_total)) => {
                self.current = Some(Loaded {
                    reference,
                    sink,
                    total: probed.or(decoded_total),
                });
                if autoplay {
                    self.play();
                } else {
                    self.publish();
                }
            }
            Err(err) => self.fail(reference, err),
        }
    }

    /// Replace the sink with a fresh one starting at `at`.
    ///
    /// The bytes are resolved again, so a revoked reference cannot be sought.
    fn rebuild_at(&mut self, at: Duration, playing: bool) {
        let Some(current) = self.current.take() else {
            return;
        };
        current.sink.stop();

        let Some(bytes) = self.store.resolve(&current.reference) else {
            let err = Error::UnknownReference(current.reference.to_string());
            self.fail(current.reference, err);
            return;
        };

        match create_sink_at(self.stream, bytes, at, self.settings.volume) {
            Ok((sink, _)) => {
                if playing {
                    sink.play();
                    self.started_at = Some(Instant::now());
                } else {
                    self.started_at = None;
                }
                self.paused = !playing;
                self.accumulated = at;
                self.current = Some(Loaded { sink, ..current });
                self.publish();
            }
            Err(err) => self.fail(current.reference, err),
        }
    }

    fn play(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if current.sink.empty() {
            // Finished: start over, like a native player's replay.
            self.rebuild_at(Duration::ZERO, true);
            return;
        }
        if self.paused {
            current.sink.play();
            self.paused = false;
            self.started_at = Some(Instant::now());
        }
        self.publish();
    }

    fn pause(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if !self.paused {
            current.sink.pause();
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
            self.paused = true;
        }
        self.publish();
    }

    /// Periodic check for end of file; also refreshes the elapsed time.
    fn tick(&mut self) {
        let Some(current) = self.current.as_ref() else {
            return;
        };
        if !self.paused && current.sink.empty() {
            self.accumulated = current.total.unwrap_or_else(|| self.elapsed());
            self.started_at = None;
            self.paused = true;
        }
        self.publish();
    }

    fn unload(&mut self) {
        if let Some(current) = self.current.take() {
            current.sink.stop();
        }
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn fail(&mut self, reference: ObjectRef, err: Error) {
        tracing::warn!(%reference, %err, "playback unavailable");
        self.unload();
        publish(
            &self.playback_info,
            PlaybackInfo {
                reference: Some(reference),
                error: Some(err.to_string()),
                ..PlaybackInfo::default()
            },
        );
    }

    fn publish(&self) {
        let info = match self.current.as_ref() {
            Some(current) => PlaybackInfo {
                reference: Some(current.reference.clone()),
                elapsed: self.elapsed(),
                total: current.total,
                playing: !self.paused,
                error: None,
            },
            None => PlaybackInfo::default(),
        };
        publish(&self.playback_info, info);
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(current) = self.current.as_ref() {
            if !self.paused {
                fade_out_sink(&current.sink, fade_out_ms, self.settings.volume);
            }
        }
        self.unload();
        publish(&self.playback_info, PlaybackInfo::default());
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64, from: f32) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
