use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::popup::centered_rect;
use crate::theme::Theme;

pub struct UpdateRequiredWidget;

impl UpdateRequiredWidget {
    pub fn render(frame: &mut Frame, area: Rect, current: &str, minimum: &str, theme: &Theme) {
        let box_area = centered_rect(
            56u16.min(area.width.saturating_sub(2)),
            9u16.min(area.height),
            area,
        );

        let lines = vec![
            Line::from(Span::styled(
                "Update required",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "This version is no longer supported. Install the latest release to keep using the prayer list.",
                Style::default().fg(theme.fg1),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Installed: ", Style::default().fg(theme.placeholder)),
                Span::styled(current.to_string(), Style::default().fg(theme.error)),
                Span::styled("   Required: ", Style::default().fg(theme.placeholder)),
                Span::styled(minimum.to_string(), Style::default().fg(theme.success)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg0));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, box_area);
    }
}
