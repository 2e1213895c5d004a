use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::editor::EditorMode;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render a confirmation popup dialog
    pub fn render_confirm(frame: &mut Frame, title: &str, message: &str, theme: &Theme) {
        let area = frame.area();

        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_height = 7u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Message
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        let message_paragraph = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(message_paragraph, chunks[0]);

        let hint_paragraph = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.placeholder)),
            Span::styled(
                "y",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]es  [", Style::default().fg(theme.placeholder)),
            Span::styled(
                "n",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("]o", Style::default().fg(theme.placeholder)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint_paragraph, chunks[2]);
    }

    /// Render the prompt matching an editor confirmation mode, if any
    pub fn render_editor_prompt(frame: &mut Frame, mode: &EditorMode, row_text: Option<&str>, theme: &Theme) {
        match mode {
            EditorMode::ConfirmDelete(_) => {
                let message = match row_text {
                    Some(text) if !text.trim().is_empty() => {
                        format!("Delete \"{}\"?", truncate_str(text.trim(), 30))
                    }
                    _ => "Delete this row?".to_string(),
                };
                Self::render_confirm(frame, "Confirm Delete", &message, theme);
            }
            EditorMode::ConfirmSave => {
                Self::render_confirm(frame, "Publish", "Publish this prayer list?", theme)
            }
            EditorMode::ConfirmLoad => Self::render_confirm(
                frame,
                "Load Latest",
                "Replace the draft with the latest published list?",
                theme,
            ),
            EditorMode::ConfirmExit => Self::render_confirm(
                frame,
                "Unsaved Changes",
                "Leave the editor and discard your changes?",
                theme,
            ),
            EditorMode::Normal | EditorMode::Editing { .. } => {}
        }
    }

    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, theme: &Theme) {
        let area = frame.area();
        let popup_area = centered_rect(
            52u16.min(area.width.saturating_sub(4)),
            21u16.min(area.height.saturating_sub(2)),
            area,
        );
        frame.render_widget(Clear, popup_area);

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("{:>10}  ", k), Style::default().fg(theme.primary)),
                Span::styled(what, Style::default().fg(theme.fg1)),
            ])
        };
        let lines = vec![
            key("j/k", "scroll / move"),
            key("C-d/C-u", "half page down / up"),
            key("gg/G", "top / bottom"),
            key("drag down", "pull to refresh"),
            key("r", "refresh"),
            key("e", "edit (authors)"),
            key("t", "toggle theme"),
            key("m", "music on / off"),
            key("+/-", "text size"),
            Line::default(),
            key("Enter", "edit row"),
            key("d", "delete row"),
            key("a / s / S", "add item / subsection / section"),
            key("[ / ]", "previous / next date"),
            key("C-s", "publish"),
            key("L", "load latest"),
            key("q", "back / quit"),
        ];

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg1));
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
