//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by a field: bordered box plus one line for its error
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field with its inline error line underneath
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, enabled: bool) {
    let box_area = Rect {
        height: area.height.min(3),
        ..area
    };

    let border_style = if field.has_error() {
        Style::default().fg(Color::Red)
    } else if is_active && enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let value_style = if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if field.is_select() && field.value.is_empty() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    };

    let display_value = field.display_value();
    let mut spans = Vec::new();
    if field.is_select() {
        if is_active && enabled {
            spans.push(Span::styled("◀ ", Style::default().fg(Color::Cyan)));
            spans.push(Span::styled(display_value, value_style));
            spans.push(Span::styled(" ▶", Style::default().fg(Color::Cyan)));
        } else {
            spans.push(Span::styled(display_value, value_style));
        }
    } else {
        spans.push(Span::styled(display_value, value_style));
        if is_active && enabled {
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
        }
    }

    let block = Block::default()
        .title(format!(" {} ", field.display_label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), box_area);

    if let Some(error) = &field.error {
        if area.height > box_area.height {
            let error_area = Rect {
                y: box_area.y + box_area.height,
                height: 1,
                ..area
            };
            let line = Paragraph::new(Span::styled(
                format!(" {error}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(line, error_area);
        }
    }
}
