use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::refresh::indicator::INDICATOR_SIZE;
use crate::refresh::IndicatorFrame;
use crate::theme::Theme;

/// Cells of the progress track drawn next to the glyph
const TRACK_CELLS: usize = 8;

pub struct RefreshIndicatorWidget;

impl RefreshIndicatorWidget {
    /// Row of `area` the indicator's center falls on, if any
    pub fn row_for(indicator: &IndicatorFrame, units_per_row: f64, area_height: u16) -> Option<u16> {
        if !indicator.is_visible() || units_per_row <= 0.0 || area_height == 0 {
            return None;
        }
        let center = indicator.top + INDICATOR_SIZE / 2.0;
        let row = (center / units_per_row).floor().max(0.0) as u16;
        Some(row.min(area_height - 1))
    }

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        indicator: &IndicatorFrame,
        units_per_row: f64,
        theme: &Theme,
    ) {
        let Some(row) = Self::row_for(indicator, units_per_row, area.height) else {
            return;
        };

        let mut style = Style::default().fg(theme.progress_fg);
        if indicator.opacity < 0.5 {
            style = style.add_modifier(Modifier::DIM);
        }

        let mut spans = vec![
            Span::styled(indicator.glyph().to_string(), style.add_modifier(Modifier::BOLD)),
            Span::raw(" "),
        ];
        if indicator.show_track {
            let filled = (indicator.drawn_fraction() * TRACK_CELLS as f64).round() as usize;
            spans.push(Span::styled("━".repeat(filled), style));
            spans.push(Span::styled(
                "─".repeat(TRACK_CELLS - filled.min(TRACK_CELLS)),
                Style::default().fg(theme.progress_bg),
            ));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(indicator.label(), style));

        let line_area = Rect::new(area.x, area.y + row, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), line_area);
    }
}
