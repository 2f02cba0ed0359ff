//! Notices shown in place of the card.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

/// Shown while either bound entity is missing.
pub const ENTITIES_NOT_FOUND: &str = "Entities not found";

/// Renders a configuration error in a red box, instead of the card.
pub fn render_error_notice(message: &str, area: Rect, buf: &mut Buffer) {
    let style = Style::default().fg(Color::Red);
    Paragraph::new(message)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(style)
                .title(Line::styled("Configuration error", style)),
        )
        .render(area, buf);
}

/// Renders a centered message telling the user the terminal is too small.
pub fn render_too_small(min_width: u16, min_height: u16, area: Rect, buf: &mut Buffer) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{}",
        area.width, area.height, min_width, min_height
    );
    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered = Rect {
        y: area.y + vertical_offset,
        height: area.height - vertical_offset,
        ..area
    };
    Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(centered, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn error_notice() {
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        render_error_notice("you need to define 'entity_min' and 'entity_max'", area, &mut buf);

        insta::assert_snapshot!(buffer_to_string(&buf), @r"
        ╭Configuration error───────────────────────────────────────╮
        │you need to define 'entity_min' and 'entity_max'          │
        ╰──────────────────────────────────────────────────────────╯
        ");
    }

    #[test]
    fn too_small_message() {
        let area = Rect::new(0, 0, 16, 3);
        let mut buf = Buffer::empty(area);
        render_too_small(20, 4, area, &mut buf);
        assert!(buffer_to_string(&buf).contains("Terminal too"));
    }
}
