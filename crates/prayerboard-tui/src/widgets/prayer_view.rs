//! Read-only rendering of a published prayer list

use prayerboard_core::prayer::PrayerData;
use prayerboard_core::prefs::FontScale;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Left margin of item lists below a section header
const SECTION_INDENT: &str = "  ";
const SUBSECTION_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Title,
    Section,
    Item,
    Subsection,
    Verse,
    VerseReference,
    Empty,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    pub kind: ViewKind,
    pub text: String,
}

impl ViewLine {
    fn new(kind: ViewKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(ViewKind::Blank, "")
    }
}

/// Extra blank rows between items for a text size
pub fn line_gap(scale: FontScale) -> usize {
    match scale.percent() {
        0..=119 => 0,
        120..=169 => 1,
        _ => 2,
    }
}

/// Greedy word wrap with a hanging indent for continuation lines
fn wrap(text: &str, width: usize, first_prefix: &str, rest_prefix: &str) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = first_prefix.to_string();
    let mut current_width = first_prefix.width();
    let mut has_word = false;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if has_word && current_width + 1 + word_width > width {
            lines.push(std::mem::replace(&mut current, rest_prefix.to_string()));
            current_width = rest_prefix.width();
            has_word = false;
        }
        if has_word {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
        has_word = true;
    }
    lines.push(current);
    lines
}

fn push_wrapped(
    out: &mut Vec<ViewLine>,
    kind: ViewKind,
    text: &str,
    width: usize,
    first_prefix: &str,
    rest_prefix: &str,
) {
    out.extend(
        wrap(text, width, first_prefix, rest_prefix)
            .into_iter()
            .map(|line| ViewLine::new(kind, line)),
    );
}

fn push_items(out: &mut Vec<ViewLine>, items: &[String], indent: &str, width: usize, gap: usize) {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.extend(std::iter::repeat_with(ViewLine::blank).take(gap));
        }
        let number = format!("{}{}. ", indent, index + 1);
        let hanging = " ".repeat(number.width());
        push_wrapped(out, ViewKind::Item, item, width, &number, &hanging);
    }
}

/// Lay the list out into terminal rows of at most `width` columns
pub fn layout(prayer: Option<&PrayerData>, width: u16, scale: FontScale) -> Vec<ViewLine> {
    let width = width as usize;
    let gap = line_gap(scale);
    let mut out = Vec::new();

    let Some(prayer) = prayer else {
        out.push(ViewLine::new(ViewKind::Empty, "No prayer list yet."));
        out.push(ViewLine::new(ViewKind::Empty, "Pull down or press r to refresh."));
        return out;
    };

    push_wrapped(&mut out, ViewKind::Title, &prayer.title, width, "", "");

    for section in &prayer.sections {
        out.extend(std::iter::repeat_with(ViewLine::blank).take(1 + gap));
        let header = format!("<{}>", section.name);
        push_wrapped(&mut out, ViewKind::Section, &header, width, "", " ");
        if !section.has_body() {
            continue;
        }

        push_items(&mut out, &section.items, SECTION_INDENT, width, gap);
        for subsection in &section.subsections {
            out.push(ViewLine::blank());
            let header = format!("• {}", subsection.name);
            let marker = format!("{}• ", SECTION_INDENT);
            push_wrapped(
                &mut out,
                ViewKind::Subsection,
                &header,
                width,
                SECTION_INDENT,
                &" ".repeat(marker.width()),
            );
            push_items(&mut out, &subsection.items, SUBSECTION_INDENT, width, gap);
        }
    }

    if !prayer.verse.is_empty() {
        out.push(ViewLine::blank());
        out.push(ViewLine::new(ViewKind::Blank, "─".repeat(width.min(40))));
        let quoted = format!("\"{}\"", prayer.verse.text.trim());
        push_wrapped(&mut out, ViewKind::Verse, &quoted, width, "", "");
        if !prayer.verse.reference.trim().is_empty() {
            out.push(ViewLine::new(
                ViewKind::VerseReference,
                format!("- {}", prayer.verse.reference.trim()),
            ));
        }
    }

    out
}

/// Rows the list occupies at `width`
pub fn line_count(prayer: Option<&PrayerData>, width: u16, scale: FontScale) -> u16 {
    layout(prayer, width, scale).len().min(u16::MAX as usize) as u16
}

pub struct PrayerViewWidget;

impl PrayerViewWidget {
    /// Render the list scrolled by `scroll` rows
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        prayer: Option<&PrayerData>,
        scale: FontScale,
        scroll: u16,
        theme: &Theme,
    ) {
        let lines: Vec<Line> = layout(prayer, area.width, scale)
            .into_iter()
            .skip(scroll as usize)
            .take(area.height as usize)
            .map(|line| Self::styled(line, theme))
            .collect();

        let paragraph = Paragraph::new(lines).block(Block::default().style(Style::default().bg(theme.bg0)));
        frame.render_widget(paragraph, area);
    }

    fn styled(line: ViewLine, theme: &Theme) -> Line<'static> {
        let style = match line.kind {
            ViewKind::Title => Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD),
            ViewKind::Section => Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ViewKind::Subsection => Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ViewKind::Item => Style::default().fg(theme.fg1),
            ViewKind::Verse => Style::default().fg(theme.placeholder).add_modifier(Modifier::ITALIC),
            ViewKind::VerseReference => Style::default().fg(theme.placeholder),
            ViewKind::Empty => Style::default().fg(theme.placeholder),
            ViewKind::Blank => Style::default().fg(theme.border),
        };
        let rendered = Line::from(Span::styled(line.text, style));
        if line.kind == ViewKind::VerseReference {
            rendered.alignment(Alignment::Right)
        } else {
            rendered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prayerboard_core::prayer::{PrayerSection, PrayerSubsection, PrayerVerse};

    fn texts(lines: &[ViewLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn sample() -> PrayerData {
        PrayerData {
            title: "Prayers".to_string(),
            sections: vec![PrayerSection {
                name: "Family".to_string(),
                items: vec!["Health".to_string(), "Peace".to_string()],
                subsections: vec![PrayerSubsection {
                    name: "Kids".to_string(),
                    items: vec!["School".to_string()],
                }],
            }],
            verse: PrayerVerse::default(),
        }
    }

    #[test]
    fn test_layout_numbering_and_markers() {
        let lines = layout(Some(&sample()), 80, FontScale::default());
        assert_eq!(
            texts(&lines),
            vec![
                "Prayers",
                "",
                "<Family>",
                "  1. Health",
                "  2. Peace",
                "",
                "  • Kids",
                "    1. School",
            ]
        );
    }

    #[test]
    fn test_large_text_adds_spacing() {
        let normal = line_count(Some(&sample()), 80, FontScale::default());
        let large = line_count(Some(&sample()), 80, FontScale::new(150));
        // One more row before the section and one between the two items
        assert_eq!(large, normal + 2);
    }

    #[test]
    fn test_wrap_uses_hanging_indent() {
        let lines = wrap("pray for the whole church", 12, "1. ", "   ");
        assert_eq!(lines, vec!["1. pray for", "   the whole", "   church"]);
    }

    #[test]
    fn test_long_subsection_header_keeps_indent() {
        let mut data = sample();
        data.sections[0].subsections[0].name = "Kids and youth group".to_string();
        let lines = layout(Some(&data), 14, FontScale::default());
        let headers: Vec<&str> = lines
            .iter()
            .filter(|l| l.kind == ViewKind::Subsection)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(headers, vec!["  • Kids and", "    youth", "    group"]);
    }

    #[test]
    fn test_empty_state() {
        let lines = layout(None, 80, FontScale::default());
        assert!(lines.iter().all(|l| l.kind == ViewKind::Empty));
    }
}
