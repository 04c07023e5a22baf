//! Tax form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::state::Focus;
use crate::ui::components::{
    banner_height, render_banner, render_button, render_loading, BannerConfig, BUTTON_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

const SUCCESS_MESSAGE: &str =
    "Thank you! Your details were submitted and the tax calculator is on its way to your inbox.";

/// Draw the lead form with its submit row and feedback banner
pub fn draw_tax_form(frame: &mut Frame, area: Rect, app: &App) {
    let controller = &app.controller;
    let form = controller.form();
    let state = controller.state();
    let enabled = state.controls_enabled();

    let block = Block::default()
        .title(" Free Tax Calculator ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if enabled {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner = if state.success_banner_visible() {
        Some(("Success", Color::Green, SUCCESS_MESSAGE))
    } else {
        state
            .error_banner()
            .map(|message| ("Error", Color::Red, message))
    };
    let banner_rows = banner
        .map(|(_, _, message)| banner_height(message, inner.width))
        .unwrap_or(0);

    let fields = form.fields();
    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(banner_rows));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (index, field) in fields.iter().enumerate() {
        let is_active = form.active_field_index == index;
        draw_field(frame, chunks[index], field, is_active, enabled);
    }

    let submit_area = chunks[fields.len()];
    if state.loading_visible() {
        render_loading(frame, submit_area, "Submitting...");
    } else if state.submit_visible() {
        render_button(
            frame,
            submit_area,
            "Get My Tax Calculator",
            form.is_submit_active(),
            enabled,
        );
    }

    if let Some((title, color, message)) = banner {
        let focused = matches!(
            controller.focus(),
            Some(Focus::SuccessBanner | Focus::ErrorBanner)
        );
        render_banner(
            frame,
            chunks[fields.len() + 1],
            BannerConfig {
                title,
                color,
                message,
                focused,
            },
        );
    }
}
