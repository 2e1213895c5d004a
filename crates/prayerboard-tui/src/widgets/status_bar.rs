use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, Screen};
use crate::editor::EditorMode;
use crate::refresh::PullPhase;

pub struct StatusBarWidget;

impl StatusBarWidget {
    fn mode_str(app: &App) -> &'static str {
        if app.mode == Mode::Help {
            return "HELP";
        }
        match (&app.screen, app.editor.as_ref().map(|e| e.mode())) {
            (Screen::UpdateRequired { .. }, _) => "UPDATE",
            (Screen::Editor, Some(EditorMode::Editing { .. })) => "INSERT",
            (Screen::Editor, Some(EditorMode::ConfirmDelete(_))) => "DELETE?",
            (Screen::Editor, Some(EditorMode::ConfirmSave)) => "PUBLISH?",
            (Screen::Editor, Some(EditorMode::ConfirmLoad)) => "LOAD?",
            (Screen::Editor, Some(EditorMode::ConfirmExit)) => "EXIT?",
            (Screen::Editor, _) => "EDIT",
            (Screen::Main, _) => match app.pull.phase() {
                PullPhase::Refreshing => "REFRESHING",
                PullPhase::Pulling => "PULL",
                PullPhase::Idle => "NORMAL",
            },
        }
    }

    fn music_str(app: &App) -> &'static str {
        match (app.music.is_playing(), app.music.is_suspended()) {
            (false, _) => "♪ off",
            (true, false) => "♪ on",
            (true, true) => "♪ held",
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let updated = app
                .last_updated
                .map(|t| t.format("updated %H:%M").to_string())
                .unwrap_or_else(|| "cached".to_string());
            let items = app.prayer.as_ref().map_or(0, |p| p.item_count());
            format!(
                " {} | {} items | {} | {}% | {}",
                Self::mode_str(app),
                items,
                updated,
                app.font_scale.percent(),
                Self::music_str(app)
            )
        };

        let help_hint = match app.screen {
            Screen::Editor => " d:delete a:add C-s:publish q:back ?:help ",
            Screen::UpdateRequired { .. } => " q:quit ",
            Screen::Main => " q:quit j/k:scroll r:refresh e:edit m:music ?:help ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.placeholder).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
