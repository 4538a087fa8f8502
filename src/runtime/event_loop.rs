use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::handle::{ObjectRef, ObjectStore};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::actions;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling in the chooser.
    pub pending_gg: bool,
    /// Last-known loaded reference as emitted to MPRIS.
    pub last_mpris_reference: Option<ObjectRef>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new<S: ObjectStore>(app: &App<S>) -> Self {
        Self {
            pending_gg: false,
            last_mpris_reference: None,
            last_mpris_playback: app.playback,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run<S: ObjectStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<S>,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.sync_playback();

        // Keep MPRIS in sync even when playback changes come from media keys or end of file.
        let reference = app.widget.reference().cloned();
        if reference != state.last_mpris_reference || app.playback != state.last_mpris_playback {
            update_mpris(mpris, app);
            state.last_mpris_reference = reference;
            state.last_mpris_playback = app.playback;
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, control_tx, state) {
                    audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` when the app should quit.
fn handle_control_cmd<S: ObjectStore>(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App<S>,
    audio_player: &AudioPlayer,
) -> bool {
    let has_file = app.widget.reference().is_some();
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return true;
        }
        ControlCmd::Play if has_file => {
            let _ = audio_player.send(AudioCmd::Play);
        }
        ControlCmd::Pause if has_file => {
            let _ = audio_player.send(AudioCmd::Pause);
        }
        ControlCmd::PlayPause if has_file => {
            let _ = audio_player.send(AudioCmd::TogglePause);
        }
        ControlCmd::Stop if has_file => {
            let _ = audio_player.send(AudioCmd::Stop);
        }
        _ => {}
    }
    false
}

/// Returns `true` when the app should quit.
fn handle_key_event<S: ObjectStore>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<S>,
    audio_player: &AudioPlayer,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    if app.chooser.open {
        handle_chooser_key(key, app, audio_player, state);
        return false;
    }
    state.pending_gg = false;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Enter | KeyCode::Char('u') => actions::press_action(app, settings),
        KeyCode::Char('o') => actions::open_chooser(app, settings),
        // Behave like MPRIS PlayPause / Stop.
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('s') => {
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char('H') | KeyCode::Left => {
            if app.widget.reference().is_some() {
                let secs = i32::try_from(settings.controls.scrub_seconds).unwrap_or(i32::MAX);
                let _ = audio_player.send(AudioCmd::SeekBy(-secs));
            }
        }
        KeyCode::Char('L') | KeyCode::Right => {
            if app.widget.reference().is_some() {
                let secs = i32::try_from(settings.controls.scrub_seconds).unwrap_or(i32::MAX);
                let _ = audio_player.send(AudioCmd::SeekBy(secs));
            }
        }
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
    false
}

fn handle_chooser_key<S: ObjectStore>(
    key: KeyEvent,
    app: &mut App<S>,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) {
    if app.chooser.filter_mode {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => app.chooser.clear_filter(),
            KeyCode::Backspace => app.chooser.pop_filter_char(),
            KeyCode::Down => app.chooser.next(),
            KeyCode::Up => app.chooser.prev(),
            KeyCode::Enter => actions::confirm_chooser(app, audio_player),
            KeyCode::Char(c) if !c.is_control() => app.chooser.push_filter_char(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('g') => {
            if state.pending_gg {
                app.chooser.select_first();
            }
            state.pending_gg = !state.pending_gg;
            return;
        }
        KeyCode::Esc | KeyCode::Char('q') => actions::cancel_chooser(app),
        KeyCode::Enter => actions::confirm_chooser(app, audio_player),
        KeyCode::Char('j') | KeyCode::Down => app.chooser.next(),
        KeyCode::Char('k') | KeyCode::Up => app.chooser.prev(),
        KeyCode::Char('G') => app.chooser.select_last(),
        KeyCode::Char('/') => app.chooser.enter_filter_mode(),
        _ => {}
    }
    state.pending_gg = false;
}
