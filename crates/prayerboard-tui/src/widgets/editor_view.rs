use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::editor::{EditorLine, EditorMode, EditorState, LineKind};
use crate::theme::Theme;

pub struct EditorWidget;

impl EditorWidget {
    /// Rows taken by the title border
    pub const CHROME_ROWS: u16 = 1;

    pub fn render(frame: &mut Frame, area: Rect, editor: &EditorState, theme: &Theme) {
        let title = if editor.is_dirty() {
            format!(" {} [modified] ", editor.document().title())
        } else {
            format!(" {} ", editor.document().title())
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let editing = match editor.mode() {
            EditorMode::Editing { path, buffer } => Some((path.id(), buffer.as_str())),
            _ => None,
        };

        let lines: Vec<Line> = editor
            .lines()
            .iter()
            .skip(editor.scroll_offset() as usize)
            .take(inner.height as usize)
            .map(|line| {
                let selected = line.head && line.row.is_some() && line.row == editor.selected();
                let buffer = editing.and_then(|(id, buffer)| {
                    (line.head && line.row == Some(id)).then_some(buffer)
                });
                Self::render_line(line, selected, buffer, inner.width, theme)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_line(
        line: &EditorLine,
        selected: bool,
        buffer: Option<&str>,
        width: u16,
        theme: &Theme,
    ) -> Line<'static> {
        let prefix = match line.kind {
            LineKind::SubsectionHeader if line.head => "• ",
            LineKind::Item if line.head => "- ",
            _ => "",
        };
        let indent = "  ".repeat(line.depth as usize);

        let mut style = match line.kind {
            LineKind::Date => Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            LineKind::SectionHeader => Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            LineKind::SubsectionHeader => Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            LineKind::Item => Style::default().fg(theme.fg1),
            LineKind::AddSection => Style::default().fg(theme.primary),
            LineKind::Margin | LineKind::Spacer => Style::default(),
        };
        if line.placeholder && buffer.is_none() {
            style = Style::default()
                .fg(theme.placeholder)
                .add_modifier(Modifier::ITALIC);
        }
        if line.opacity < 0.15 {
            return Line::default();
        }
        if line.opacity < 0.6 {
            style = style.add_modifier(Modifier::DIM);
        }
        if selected {
            style = style.bg(theme.selection);
        }

        let body = match buffer {
            Some(buffer) => format!("{}{}{}▏", indent, prefix, buffer),
            None => format!("{}{}{}", indent, prefix, line.text),
        };
        let slide = (line.shift * width as f64).round() as usize;
        let mut spans = vec![Span::styled(skip_columns(&body, slide), style)];
        if selected && buffer.is_none() && !line.removable {
            spans.push(Span::styled("  (kept)", Style::default().fg(theme.disabled)));
        }
        Line::from(spans)
    }
}

/// Drop the first `columns` display columns, as if the line slid off to the left
fn skip_columns(text: &str, columns: usize) -> String {
    let mut skipped = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.peek() {
        if skipped >= columns {
            break;
        }
        skipped += c.width().unwrap_or(0);
        chars.next();
    }
    chars.collect()
}
