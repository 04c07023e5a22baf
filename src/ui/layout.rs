//! Layout helpers: centered form column and status bar

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form column grows
const MAX_FORM_WIDTH: u16 = 72;

/// Split the screen into the form column and the status bar row
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let width = rows[0].width.min(MAX_FORM_WIDTH);
    let form_area = Rect {
        x: rows[0].x + (rows[0].width - width) / 2,
        width,
        ..rows[0]
    };
    (form_area, rows[1])
}

/// Draw the status bar with key hints
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let indicator = if state.is_submitting() {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else if state.error_banner().is_some() {
        Span::styled(" ● ", Style::default().fg(Color::Red))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };

    let line = Line::from(vec![
        indicator,
        Span::styled(app.hints(), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
