//! Success and error banners shown after a submission settles

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Configuration for rendering a banner
pub struct BannerConfig<'a> {
    pub title: &'a str,
    pub color: Color,
    pub message: &'a str,
    /// Draw with emphasis when the banner was just brought into view
    pub focused: bool,
}

/// Rows a banner needs for `message` at the given inner width
pub fn banner_height(message: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(4).max(1) as usize;
    let lines = message.chars().count().div_ceil(inner).max(1) as u16;
    lines + 2
}

/// Render a bordered banner
pub fn render_banner(frame: &mut Frame, area: Rect, config: BannerConfig) {
    let mut border_style = Style::default().fg(config.color);
    if config.focused {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(config.color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let paragraph = Paragraph::new(Line::from(format!(" {}", config.message)))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_height_short_message() {
        assert_eq!(banner_height("Done", 40), 3);
    }

    #[test]
    fn test_banner_height_wraps_long_message() {
        let message = "x".repeat(70);
        // 36 usable columns → 2 lines + borders
        assert_eq!(banner_height(&message, 40), 4);
    }

    #[test]
    fn test_banner_height_tiny_width() {
        assert_eq!(banner_height("abc", 2), 5);
    }
}
