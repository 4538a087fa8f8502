use std::env;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::chooser::FileChooser;
use crate::handle::MemoryStore;
use crate::mpris::ControlCmd;
use crate::widget::{DisplayDate, PlaybackWidget};

mod actions;
mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    let log_path = logging::init(&settings.log);
    tracing::info!(log = ?log_path, "starting briefing");
    if let Some(msg) = &config_problem {
        tracing::warn!("{msg}");
    }

    let store = Arc::new(MemoryStore::new());
    let audio_player = AudioPlayer::new(store.clone(), settings.audio.clone());

    let date = DisplayDate::today(settings.ui.date_style);
    let widget = PlaybackWidget::new(store, date, settings.download.fallback_name.clone());

    let chooser_root = settings
        .chooser
        .dir
        .clone()
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let mut app = App::new(widget, FileChooser::new(chooser_root), settings.audio.autoplay);
    app.set_playback_handle(audio_player.playback_handle());
    if let Some(msg) = config_problem {
        app.set_status(msg);
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    startup::select_initial_files(&mut app, &audio_player, env::args_os().skip(1));
    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &audio_player,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Unmount: the widget releases its handle here.
    drop(app);
    tracing::info!("stopped");

    run_result
}
