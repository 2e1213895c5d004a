use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use prayerboard_core::prayer::{EditablePrayer, PrayerData};
use prayerboard_core::prefs::{FontScale, Preferences, ThemeMode};
use prayerboard_core::version::VersionStatus;
use prayerboard_core::AppConfig;

use crate::audio::BackgroundMusic;
use crate::editor::{DeleteOutcome, EditorMode, EditorState};
use crate::input::Action;
use crate::motion::ScrollAnimator;
use crate::refresh::{PullToRefresh, RefreshReport, RefreshRequest};
use crate::theme::Theme;
use crate::widgets::{prayer_view, EditorWidget};

/// Which screen is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Main,
    Editor,
    /// The backend requires a newer build; nothing else is reachable
    UpdateRequired { current: String, minimum: String },
}

/// Overlay mode on top of the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Side effects the main loop carries out on behalf of the app
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh(RefreshRequest),
    Publish(PrayerData),
    LoadLatest,
    SavePreferences(Preferences),
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub screen: Screen,
    pub mode: Mode,
    /// Currently displayed list
    pub prayer: Option<PrayerData>,
    pub last_updated: Option<DateTime<Local>>,
    pub pull: PullToRefresh,
    /// Scroll position of the main screen
    pub scroll: ScrollAnimator,
    pub editor: Option<EditorState>,
    pub music: BackgroundMusic,
    pub theme: Theme,
    pub font_scale: FontScale,
    pub is_author: bool,
    pub is_publishing: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub pending_key: Option<char>,
    /// Row where the current pull drag started
    drag_origin: Option<u16>,
    content_height: u16,
    viewport_height: u16,
}

impl App {
    pub fn new(config: Arc<AppConfig>, prefs: &Preferences, cached: Option<PrayerData>) -> Self {
        let theme_mode = prefs
            .theme
            .unwrap_or_else(|| ThemeMode::from_name(&config.ui.theme));
        let font_scale = prefs
            .font_scale
            .unwrap_or_else(|| FontScale::new(config.ui.default_font_scale));
        let music_on = prefs.music.unwrap_or(config.audio.autoplay);

        Self {
            pull: PullToRefresh::new(config.refresh.clone()),
            scroll: ScrollAnimator::new(config.ui.scroll.clone()),
            music: BackgroundMusic::new(config.audio.clone(), music_on),
            is_author: config.backend.is_author(),
            config,
            screen: Screen::Main,
            mode: Mode::Normal,
            prayer: cached,
            last_updated: None,
            editor: None,
            theme: Theme::for_mode(theme_mode),
            font_scale,
            is_publishing: false,
            should_quit: false,
            status_message: None,
            pending_key: None,
            drag_origin: None,
            content_height: 0,
            viewport_height: 0,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        self.editor
            .as_ref()
            .map_or(false, |e| matches!(e.mode(), EditorMode::Editing { .. }))
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            theme: Some(self.theme.mode),
            font_scale: Some(self.font_scale),
            music: Some(self.music.is_playing()),
        }
    }

    /// Lock the app behind the update screen when the gate fails
    pub fn apply_version(&mut self, status: VersionStatus, now: Instant) {
        if let VersionStatus::UpdateRequired { current, minimum } = status {
            tracing::warn!(current = %current, minimum = %minimum.min_version, "Update required");
            self.cancel_drag(now);
            if self.editor.take().is_some() {
                self.music.resume(now);
            }
            self.mode = Mode::Normal;
            self.screen = Screen::UpdateRequired {
                current,
                minimum: minimum.min_version,
            };
        }
    }

    /// Rows the main content is pushed down by the pull
    pub fn content_shift_rows(&self) -> u16 {
        let units = self.config.refresh.units_per_row;
        if units <= 0.0 {
            return 0;
        }
        (self.pull.content_offset() / units).round().max(0.0) as u16
    }

    fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn needs_fast_update(&self) -> bool {
        self.pull.needs_tick()
            || self.scroll.needs_update()
            || self.music.needs_tick()
            || self.editor.as_ref().map_or(false, |e| e.needs_fast_update())
    }

    /// Advance animations and measure content for a frame of `width` x `height`
    pub fn prepare_frame(&mut self, now: Instant, width: u16, height: u16) {
        self.pull.tick(now);
        self.music.tick(now);

        if self.screen == Screen::Main {
            self.viewport_height = height.saturating_sub(self.content_shift_rows());
            self.content_height =
                prayer_view::line_count(self.prayer.as_ref(), width, self.font_scale);
            let offset = self.scroll.update_at(now, self.max_scroll());
            self.pull.on_scroll(offset as f64);
        } else if self.screen == Screen::Editor {
            if let Some(editor) = self.editor.as_mut() {
                editor.prepare_frame(now, height.saturating_sub(EditorWidget::CHROME_ROWS));
            }
        }
    }

    /// Apply an action, returning any side effect for the main loop
    pub fn dispatch(&mut self, action: Action, now: Instant) -> Option<Command> {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                None
            }
            Action::PendingG => {
                self.pending_key = Some('g');
                None
            }
            Action::ShowHelp => {
                self.mode = Mode::Help;
                None
            }
            Action::ExitMode => {
                self.mode = Mode::Normal;
                None
            }
            Action::ToggleTheme => {
                self.theme = Theme::for_mode(self.theme.mode.toggled());
                Some(Command::SavePreferences(self.preferences()))
            }
            Action::ToggleMusic => {
                let playing = self.music.toggle(now);
                self.set_status(match (playing, self.music.is_suspended()) {
                    (false, _) => "Music off",
                    (true, false) => "Music on",
                    (true, true) => "Music resumes after editing",
                });
                Some(Command::SavePreferences(self.preferences()))
            }
            Action::FontIncrease => self.change_font_scale(true),
            Action::FontDecrease => self.change_font_scale(false),
            Action::None => None,
            _ if self.screen == Screen::Main => self.dispatch_main(action, now),
            _ if self.screen == Screen::Editor => self.dispatch_editor(action, now),
            _ => None,
        }
    }

    fn change_font_scale(&mut self, increase: bool) -> Option<Command> {
        let allowed = if increase {
            self.font_scale.can_increase()
        } else {
            self.font_scale.can_decrease()
        };
        if !allowed {
            self.set_status(if increase {
                "Text size is at its maximum"
            } else {
                "Text size is at its minimum"
            });
            return None;
        }
        self.font_scale = if increase {
            self.font_scale.increased()
        } else {
            self.font_scale.decreased()
        };
        self.set_status(format!("Text size {}%", self.font_scale.percent()));
        Some(Command::SavePreferences(self.preferences()))
    }

    fn dispatch_main(&mut self, action: Action, now: Instant) -> Option<Command> {
        let max = self.max_scroll();
        match action {
            Action::MoveDown => self.scroll.scroll_lines(1, max),
            Action::MoveUp => self.scroll.scroll_lines(-1, max),
            Action::ScrollHalfPageDown => self.scroll.scroll_half_page(1, self.viewport_height, max),
            Action::ScrollHalfPageUp => self.scroll.scroll_half_page(-1, self.viewport_height, max),
            Action::JumpToTop => self.scroll.scroll_to(0, max, now),
            Action::JumpToBottom => self.scroll.scroll_to(max, max, now),
            Action::Refresh => return self.pull.trigger_refresh(now).map(Command::Refresh),
            Action::OpenEditor => self.open_editor(now),
            _ => {}
        }
        None
    }

    /// Open the editor on the displayed list, or a blank one for today
    pub fn open_editor(&mut self, now: Instant) {
        if !self.is_author {
            self.set_status("Editing requires an author token");
            return;
        }
        let today = Local::now().date_naive();
        let doc = match &self.prayer {
            Some(data) => EditablePrayer::from_published(data, today),
            None => EditablePrayer::new_blank(today, self.config.editor.new_section_items),
        };
        self.editor = Some(EditorState::new(
            doc,
            self.config.editor.clone(),
            self.config.ui.scroll.clone(),
        ));
        self.cancel_drag(now);
        self.music.suspend(now);
        self.screen = Screen::Editor;
    }

    pub fn close_editor(&mut self, now: Instant) {
        self.editor = None;
        self.music.resume(now);
        self.screen = Screen::Main;
    }

    /// Drop a pull in progress when the main list goes away
    fn cancel_drag(&mut self, now: Instant) {
        self.drag_origin = None;
        self.pull.gesture_cancel(now);
    }

    fn dispatch_editor(&mut self, action: Action, now: Instant) -> Option<Command> {
        let is_publishing = self.is_publishing;
        let editor = self.editor.as_mut()?;
        let mut status: Option<String> = None;
        let mut close = false;
        let mut command = None;

        match action {
            Action::MoveDown => editor.move_cursor(1),
            Action::MoveUp => editor.move_cursor(-1),
            Action::ScrollHalfPageDown => editor.scroll_half_page(1),
            Action::ScrollHalfPageUp => editor.scroll_half_page(-1),
            Action::JumpToTop => editor.jump_to_top(),
            Action::JumpToBottom => editor.jump_to_bottom(),
            Action::EditRow => {
                editor.begin_edit();
            }
            Action::InputChar(c) => editor.input_char(c),
            Action::Backspace => editor.backspace(),
            Action::DeleteRow => {
                if editor.request_delete(now) == DeleteOutcome::NotAllowed {
                    status = Some("This row cannot be removed".to_string());
                }
            }
            Action::AddItem => {
                if !editor.add_item() {
                    status = Some("Select a section to add an item".to_string());
                }
            }
            Action::AddSubsection => {
                if !editor.add_subsection() {
                    status = Some("Select a section to add a subsection".to_string());
                }
            }
            Action::AddSection => editor.add_section(),
            Action::PrevDate => editor.shift_date(-1),
            Action::NextDate => editor.shift_date(1),
            Action::Save => {
                if is_publishing {
                    status = Some("Already publishing".to_string());
                } else {
                    match editor.validate() {
                        Ok(()) => editor.set_mode(EditorMode::ConfirmSave),
                        Err(e) => status = Some(e.to_string()),
                    }
                }
            }
            Action::LoadLatest => editor.set_mode(EditorMode::ConfirmLoad),
            Action::Back => {
                if editor.is_dirty() {
                    editor.set_mode(EditorMode::ConfirmExit);
                } else {
                    close = true;
                }
            }
            Action::Confirm => match editor.mode().clone() {
                EditorMode::Editing { .. } => editor.commit_edit(),
                EditorMode::ConfirmDelete(_) => {
                    editor.confirm_delete(now);
                }
                EditorMode::ConfirmSave => {
                    editor.cancel_mode();
                    command = Some(Command::Publish(editor.publishable()));
                    status = Some("Publishing...".to_string());
                }
                EditorMode::ConfirmLoad => {
                    editor.cancel_mode();
                    command = Some(Command::LoadLatest);
                }
                EditorMode::ConfirmExit => close = true,
                EditorMode::Normal => {}
            },
            Action::Cancel => editor.cancel_mode(),
            _ => {}
        }

        if matches!(command, Some(Command::Publish(_))) {
            self.is_publishing = true;
        }
        if let Some(status) = status {
            self.set_status(status);
        }
        if close {
            self.close_editor(now);
        }
        command
    }

    /// Mouse drags at the top of the main list pull to refresh; the wheel scrolls
    pub fn on_mouse(&mut self, event: MouseEvent, now: Instant) -> Option<Command> {
        if self.screen == Screen::Editor {
            if let Some(editor) = self.editor.as_mut() {
                match event.kind {
                    MouseEventKind::ScrollDown => editor.scroll_by(1),
                    MouseEventKind::ScrollUp => editor.scroll_by(-1),
                    _ => {}
                }
            }
            return None;
        }
        if self.screen != Screen::Main {
            return None;
        }

        let max = self.max_scroll();
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pull.on_scroll(self.scroll.current() as f64);
                if self.pull.gesture_begin() {
                    self.drag_origin = Some(event.row);
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(origin) = self.drag_origin {
                    let rows = event.row as f64 - origin as f64;
                    self.pull
                        .gesture_update(rows * self.config.refresh.drag_units_per_row);
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_origin.take()?;
                self.pull.gesture_end(now).map(Command::Refresh)
            }
            MouseEventKind::ScrollDown => {
                self.scroll.scroll_lines(1, max);
                None
            }
            MouseEventKind::ScrollUp => {
                self.scroll.scroll_lines(-1, max);
                None
            }
            _ => None,
        }
    }

    /// Settle a finished refresh; stale reports are dropped
    pub fn apply_refresh(&mut self, report: RefreshReport<Option<PrayerData>>, now: Instant) {
        let outcome = report.outcome();
        if !self.pull.complete_refresh(report.id, &outcome, now) {
            tracing::debug!(id = report.id, "Dropping stale refresh report");
            return;
        }
        match report.result {
            Ok(Some(data)) => {
                tracing::info!(sections = data.sections.len(), "Prayer list updated");
                self.prayer = Some(data);
                self.last_updated = Some(Local::now());
            }
            Ok(None) => self.set_status("No prayer list has been published yet"),
            Err(e) => self.set_status(format!("Refresh failed: {}", e)),
        }
    }

    /// Result of a publish; success returns to the list and refreshes it
    pub fn apply_published(&mut self, result: Result<(), String>, now: Instant) -> Option<Command> {
        self.is_publishing = false;
        match result {
            Ok(()) => {
                self.set_status("Prayer list published");
                if let Some(editor) = self.editor.as_mut() {
                    editor.mark_saved();
                }
                self.close_editor(now);
                self.pull.trigger_refresh(now).map(Command::Refresh)
            }
            Err(e) => {
                self.set_status(format!("Publish failed: {}", e));
                None
            }
        }
    }

    /// Result of loading the latest list into the editor
    pub fn apply_loaded(&mut self, result: Result<Option<PrayerData>, String>) {
        match result {
            Ok(Some(data)) => {
                let Some(editor) = self.editor.as_mut() else {
                    return;
                };
                let date = editor.document().date;
                editor.replace_document(EditablePrayer::from_published(&data, date));
                self.set_status("Loaded the latest list");
            }
            Ok(None) => self.set_status("No prayer list has been published yet"),
            Err(e) => self.set_status(format!("Load failed: {}", e)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::refresh::PullPhase;
    use crossterm::event::KeyModifiers;
    use prayerboard_core::store::sample_prayer;
    use prayerboard_core::version::VersionRequirement;
    use std::time::Duration;

    pub(crate) fn test_app(is_author: bool) -> App {
        let mut config = AppConfig::default();
        if is_author {
            config.backend.author_token = Some("token".to_string());
        }
        App::new(Arc::new(config), &Preferences::default(), Some(sample_prayer()))
    }

    fn update_required() -> VersionStatus {
        VersionStatus::UpdateRequired {
            current: "0.1.0".to_string(),
            minimum: VersionRequirement {
                min_version: "2.0.0".to_string(),
                min_version_code: 20000,
            },
        }
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_preferences_override_config() {
        let prefs = Preferences {
            theme: Some(ThemeMode::Light),
            font_scale: Some(FontScale::new(150)),
            music: Some(false),
        };
        let app = App::new(Arc::new(AppConfig::default()), &prefs, None);
        assert_eq!(app.theme.mode, ThemeMode::Light);
        assert_eq!(app.font_scale.percent(), 150);
        assert!(!app.music.is_playing());
    }

    #[test]
    fn test_mouse_pull_past_threshold_requests_refresh() {
        let mut app = test_app(false);
        let t0 = Instant::now();
        app.prepare_frame(t0, 80, 30);

        assert_eq!(app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2), t0), None);
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20), t0);
        assert!(app.pull.content_offset() > 0.0);

        let command = app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20), t0);
        assert!(matches!(command, Some(Command::Refresh(_))));
        assert!(app.pull.is_refreshing());
    }

    #[test]
    fn test_short_pull_springs_back() {
        let mut app = test_app(false);
        let t0 = Instant::now();
        app.prepare_frame(t0, 80, 30);

        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2), t0);
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 3), t0);
        let command = app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3), t0);
        assert_eq!(command, None);

        app.prepare_frame(t0 + Duration::from_millis(500), 80, 30);
        assert_eq!(app.pull.content_offset(), 0.0);
    }

    #[test]
    fn test_leaving_main_mid_pull_springs_back() {
        let mut app = test_app(true);
        let t0 = Instant::now();
        app.prepare_frame(t0, 80, 30);

        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2), t0);
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 5), t0);
        assert_eq!(app.pull.phase(), PullPhase::Pulling);

        app.dispatch(Action::OpenEditor, t0);
        assert_eq!(app.screen, Screen::Editor);
        assert_eq!(app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5), t0), None);
        app.dispatch(Action::Back, t0);
        assert_eq!(app.screen, Screen::Main);

        app.prepare_frame(t0 + Duration::from_secs(5), 80, 30);
        let state = app.pull.state();
        assert_eq!(state.phase, PullPhase::Idle);
        assert_eq!(state.pull_distance, 0.0);
        assert!(!state.loader_active);
        assert_eq!(app.content_shift_rows(), 0);
    }

    #[test]
    fn test_update_gate_cancels_pull_past_threshold() {
        let mut app = test_app(false);
        let t0 = Instant::now();
        app.prepare_frame(t0, 80, 30);

        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2), t0);
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40), t0);
        assert!(app.pull.content_offset() >= app.pull.threshold());

        app.apply_version(update_required(), t0);
        assert_eq!(app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 40), t0), None);
        app.prepare_frame(t0 + Duration::from_secs(1), 80, 30);
        assert_eq!(app.pull.phase(), PullPhase::Idle);
        assert_eq!(app.pull.content_offset(), 0.0);
    }

    #[test]
    fn test_music_toggle_is_saved() {
        let mut app = test_app(false);
        let t0 = Instant::now();
        assert!(app.music.is_playing());

        let Some(Command::SavePreferences(prefs)) = app.dispatch(Action::ToggleMusic, t0) else {
            panic!("expected preferences to be saved");
        };
        assert_eq!(prefs.music, Some(false));
        assert_eq!(app.status_message.as_deref(), Some("Music off"));
    }

    #[test]
    fn test_editor_holds_music_until_closed() {
        let mut app = test_app(true);
        let t0 = Instant::now();
        app.prepare_frame(t0, 80, 30);
        app.prepare_frame(t0 + Duration::from_secs(1), 80, 30);
        assert!(app.music.output().running);

        app.dispatch(Action::OpenEditor, t0 + Duration::from_secs(1));
        app.prepare_frame(t0 + Duration::from_secs(2), 80, 30);
        assert!(!app.music.output().running);
        assert!(app.music.is_playing());

        app.dispatch(Action::Back, t0 + Duration::from_secs(2));
        app.prepare_frame(t0 + Duration::from_secs(3), 80, 30);
        assert!(app.music.output().running);
        assert_eq!(app.music.volume(), 1.0);
    }

    #[test]
    fn test_refresh_report_updates_list() {
        let mut app = test_app(false);
        app.prayer = None;
        let t0 = Instant::now();
        let Some(Command::Refresh(request)) = app.dispatch(Action::Refresh, t0) else {
            panic!("expected a refresh request");
        };
        // A second trigger while refreshing is ignored
        assert_eq!(app.dispatch(Action::Refresh, t0), None);

        app.apply_refresh(
            RefreshReport {
                id: request.id,
                result: Ok(Some(sample_prayer())),
            },
            t0 + Duration::from_millis(100),
        );
        assert_eq!(app.prayer, Some(sample_prayer()));
        assert!(app.last_updated.is_some());
        // Still tearing down until the fade and collapse finish
        assert!(app.pull.is_refreshing());
        app.prepare_frame(t0 + Duration::from_secs(1), 80, 30);
        assert!(!app.pull.is_refreshing());
    }

    #[test]
    fn test_failed_refresh_keeps_list_and_reports() {
        let mut app = test_app(false);
        let t0 = Instant::now();
        let Some(Command::Refresh(request)) = app.dispatch(Action::Refresh, t0) else {
            panic!("expected a refresh request");
        };
        app.apply_refresh(
            RefreshReport {
                id: request.id,
                result: Err(anyhow::anyhow!("offline")),
            },
            t0,
        );
        assert_eq!(app.prayer, Some(sample_prayer()));
        assert_eq!(app.status_message.as_deref(), Some("Refresh failed: offline"));
        app.prepare_frame(t0 + Duration::from_secs(1), 80, 30);
        assert!(!app.pull.is_refreshing());
        assert_eq!(app.pull.content_offset(), 0.0);
    }

    #[test]
    fn test_theme_and_font_save_preferences() {
        let mut app = test_app(false);
        let t0 = Instant::now();
        let command = app.dispatch(Action::ToggleTheme, t0);
        assert_eq!(app.theme.mode, ThemeMode::Light);
        assert!(matches!(command, Some(Command::SavePreferences(_))));

        app.font_scale = FontScale::new(FontScale::MAX);
        assert_eq!(app.dispatch(Action::FontIncrease, t0), None);
        let Some(Command::SavePreferences(prefs)) = app.dispatch(Action::FontDecrease, t0) else {
            panic!("expected preferences to be saved");
        };
        assert_eq!(prefs.font_scale, Some(FontScale::new(190)));
    }

    #[test]
    fn test_editor_requires_author() {
        let mut app = test_app(false);
        app.dispatch(Action::OpenEditor, Instant::now());
        assert_eq!(app.screen, Screen::Main);
        assert!(app.editor.is_none());
    }

    #[test]
    fn test_exit_with_unsaved_changes_asks_first() {
        let mut app = test_app(true);
        let t0 = Instant::now();
        app.dispatch(Action::OpenEditor, t0);
        assert_eq!(app.screen, Screen::Editor);

        app.dispatch(Action::AddSection, t0);
        app.dispatch(Action::Back, t0);
        assert_eq!(app.screen, Screen::Editor);
        assert_eq!(
            app.editor.as_ref().map(|e| e.mode().clone()),
            Some(EditorMode::ConfirmExit)
        );

        app.dispatch(Action::Confirm, t0);
        assert_eq!(app.screen, Screen::Main);
        assert!(app.editor.is_none());
    }

    #[test]
    fn test_publish_success_returns_to_main_and_refreshes() {
        let mut app = test_app(true);
        let t0 = Instant::now();
        app.dispatch(Action::OpenEditor, t0);
        app.dispatch(Action::Save, t0);
        let command = app.dispatch(Action::Confirm, t0);
        assert!(matches!(command, Some(Command::Publish(_))));
        assert!(app.is_publishing);

        let command = app.apply_published(Ok(()), t0);
        assert!(matches!(command, Some(Command::Refresh(_))));
        assert_eq!(app.screen, Screen::Main);
        assert!(!app.is_publishing);
    }

    #[test]
    fn test_publish_failure_stays_in_editor() {
        let mut app = test_app(true);
        let t0 = Instant::now();
        app.dispatch(Action::OpenEditor, t0);
        assert_eq!(app.apply_published(Err("unauthorized".to_string()), t0), None);
        assert_eq!(app.screen, Screen::Editor);
        assert_eq!(app.status_message.as_deref(), Some("Publish failed: unauthorized"));
    }

    #[test]
    fn test_update_required_locks_app() {
        let mut app = test_app(true);
        app.apply_version(update_required(), Instant::now());
        assert!(matches!(app.screen, Screen::UpdateRequired { .. }));
        assert_eq!(app.dispatch(Action::Refresh, Instant::now()), None);
        assert!(!app.pull.is_refreshing());
    }
}
