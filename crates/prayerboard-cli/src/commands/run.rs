use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;

use prayerboard_core::{
    prefs::PreferenceStore,
    version::{self, CURRENT_VERSION},
    AppConfig, PrayerStore, SnapshotCache,
};
use prayerboard_tui::{
    app::{App, Command, Mode, Screen},
    editor::EditorMode,
    event::{AppEvent, EventHandler, TaskResult},
    input::handle_key_event,
    audio::MusicPlayer,
    refresh::{RefreshRunner, StoreRefresh},
    widgets::{
        EditorWidget, PopupWidget, PrayerViewWidget, RefreshIndicatorWidget, StatusBarWidget,
        UpdateRequiredWidget,
    },
};

/// Everything the main loop needs to carry out app commands
struct Services {
    store: Arc<dyn PrayerStore>,
    runner: RefreshRunner<StoreRefresh>,
    preferences: PreferenceStore,
    task_tx: mpsc::UnboundedSender<TaskResult>,
}

pub async fn run(config: Arc<AppConfig>, store: Arc<dyn PrayerStore>) -> Result<()> {
    // Gate before anything else is shown
    let status = version::check(store.as_ref(), &config.backend.platform, CURRENT_VERSION).await;

    let preferences = PreferenceStore::new(config.preferences_path());
    let prefs = preferences.load();
    let cache = SnapshotCache::new(config.snapshot_path());
    let cached = cache.load();

    let mut app = App::new(config.clone(), &prefs, cached);
    app.apply_version(status, Instant::now());

    let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
    let mut services = Services {
        runner: RefreshRunner::new(Arc::new(StoreRefresh::new(store.clone(), Some(cache)))),
        store,
        preferences,
        task_tx,
    };

    if config.refresh.refresh_on_start && app.screen == Screen::Main {
        if let Some(request) = app.pull.trigger_refresh(Instant::now()) {
            services.runner.spawn(request);
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("Prayerboard"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let player = if config.audio.enabled {
        MusicPlayer::open(config.audio_track_path().as_deref())
    } else {
        None
    };
    if player.is_none() && app.music.is_playing() {
        app.set_status("Background music unavailable");
    }

    let result = main_loop(&mut terminal, &mut app, &mut services, player.as_ref(), task_rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    services: &mut Services,
    player: Option<&MusicPlayer>,
    mut task_rx: mpsc::UnboundedReceiver<TaskResult>,
) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(
        app.config.ui.tick_rate_ms,
        app.config.ui.scroll.animation_fps,
    );

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = false;

    loop {
        let now = Instant::now();

        // Process settled refreshes (non-blocking)
        while let Some(report) = services.runner.try_recv() {
            app.apply_refresh(report, now);
        }

        // Process publish and load results (non-blocking)
        while let Ok(result) = task_rx.try_recv() {
            match result {
                TaskResult::Published(result) => {
                    if let Some(command) = app.apply_published(result, now) {
                        execute_command(command, services);
                    }
                }
                TaskResult::Loaded(result) => app.apply_loaded(result),
            }
        }

        let size = terminal.size()?;
        // Status bar takes the last row
        app.prepare_frame(now, size.width, size.height.saturating_sub(1));
        if let Some(player) = player {
            player.sync(app.music.output());
        }

        terminal.draw(|frame| draw(frame, app, now))?;

        if let Some(event) = event_handler.next(needs_fast_update)? {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, app);
                    if let Some(command) = app.dispatch(action, Instant::now()) {
                        execute_command(command, services);
                    }
                }
                AppEvent::Mouse(mouse) => {
                    if let Some(command) = app.on_mouse(mouse, Instant::now()) {
                        execute_command(command, services);
                    }
                }
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut ratatui::Frame, app: &App, now: Instant) {
    let size = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), size);

    // Main layout: content + status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(size);

    match &app.screen {
        Screen::Main => {
            let shift = app.content_shift_rows().min(main_layout[0].height);
            let areas = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(shift), Constraint::Min(0)])
                .split(main_layout[0]);

            RefreshIndicatorWidget::render(
                frame,
                areas[0],
                &app.pull.indicator(now),
                app.config.refresh.units_per_row,
                &app.theme,
            );
            PrayerViewWidget::render(
                frame,
                areas[1],
                app.prayer.as_ref(),
                app.font_scale,
                app.scroll.current(),
                &app.theme,
            );
        }
        Screen::Editor => {
            if let Some(editor) = &app.editor {
                EditorWidget::render(frame, main_layout[0], editor, &app.theme);

                let row_text = match editor.mode() {
                    EditorMode::ConfirmDelete(path) => editor.document().text(path),
                    _ => None,
                };
                PopupWidget::render_editor_prompt(frame, editor.mode(), row_text, &app.theme);
            }
        }
        Screen::UpdateRequired { current, minimum } => {
            UpdateRequiredWidget::render(frame, main_layout[0], current, minimum, &app.theme);
        }
    }

    StatusBarWidget::render(frame, main_layout[1], app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.theme);
    }
}

fn execute_command(command: Command, services: &Services) {
    match command {
        Command::Refresh(request) => services.runner.spawn(request),
        Command::Publish(data) => {
            let store = services.store.clone();
            let tx = services.task_tx.clone();
            tokio::spawn(async move {
                let result = store.upload(&data).await.map_err(|e| e.to_string());
                match &result {
                    Ok(()) => tracing::info!(sections = data.sections.len(), "Prayer list published"),
                    Err(e) => tracing::error!(error = %e, "Publish failed"),
                }
                let _ = tx.send(TaskResult::Published(result));
            });
        }
        Command::LoadLatest => {
            let store = services.store.clone();
            let tx = services.task_tx.clone();
            tokio::spawn(async move {
                let result = store.fetch_latest().await.map_err(|e| e.to_string());
                let _ = tx.send(TaskResult::Loaded(result));
            });
        }
        Command::SavePreferences(prefs) => {
            if let Err(e) = services.preferences.save(&prefs) {
                tracing::warn!(error = %e, "Failed to save preferences");
            }
        }
    }
}
