//! Card rendering.
//!
//! The card is split into regions by [`card_regions`] and drawn by
//! [`render_card`]. The two steps are separate so the app can hand the
//! track area to the range control for hit testing before drawing.

use rangecard_config::{CellMetrics, HandleSize};
use rangecard_protocol::{Handle, Orientation};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::card::SliderCard;
use crate::layout::{HORIZONTAL_TRACK_ROWS, VALUES_ROWS, offset_cells};
use crate::theme::Theme;
use crate::widgets::notice::ENTITIES_NOT_FOUND;

/// Track symbol outside the selected range, by orientation.
const TRACK_SYMBOL: [&str; 2] = ["─", "│"];

/// Track symbol inside the selected range, by orientation.
const CONNECT_SYMBOL: [&str; 2] = ["━", "┃"];

/// Handle symbol.
const HANDLE_SYMBOL: &str = "█";

/// Screen regions of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardRegions {
    /// The whole bordered box.
    pub block: Rect,
    /// The area inside the border.
    pub inner: Rect,
    /// The track.
    pub track: Rect,
    /// The values line.
    pub values: Rect,
}

/// Splits the card's box into regions.
///
/// A vertical track is as tall as the last layout pass asked for and as wide
/// as the configured thickness, centered horizontally. A horizontal track is
/// one row, as wide as the configured percentage of the card.
#[must_use]
pub fn card_regions(card: &SliderCard, cell: &CellMetrics, area: Rect) -> CardRegions {
    let inner = Block::bordered().inner(area);
    let [body, values] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(VALUES_ROWS)]).areas(inner);

    let config = card.config();
    let track = match (config.layout.orientation, card.layout()) {
        (Orientation::Vertical, Some(result)) => {
            let rows = cell.px_to_rows(result.track_height_px).min(body.height);
            let columns = cell.px_to_columns(config.layout.thickness_px).min(body.width);
            centered_columns(body, columns, rows)
        }
        _ => {
            let width = u32::from(body.width) * config.style.horizontal_percent / 100;
            let columns = u16::try_from(width).unwrap_or(body.width).max(1).min(body.width);
            centered_columns(body, columns, HORIZONTAL_TRACK_ROWS.min(body.height))
        }
    };

    CardRegions {
        block: area,
        inner,
        track,
        values,
    }
}

fn centered_columns(body: Rect, columns: u16, rows: u16) -> Rect {
    Rect::new(
        body.x + (body.width - columns) / 2,
        body.y,
        columns,
        rows,
    )
}

/// Formats the values line, e.g. `20.0% - 80.0%`.
#[must_use]
pub fn values_line(card: &SliderCard, values: [f64; 2]) -> String {
    let display = &card.config().display;
    format!(
        "{} - {}",
        display.format_value(values[0]),
        display.format_value(values[1])
    )
}

/// Renders the card into `regions`.
pub fn render_card(
    card: &SliderCard,
    theme: &Theme,
    cell: &CellMetrics,
    regions: &CardRegions,
    buf: &mut Buffer,
) {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.track))
        .title(Line::styled(card.config().display.name.as_str(), theme.text_style()))
        .render(regions.block, buf);

    let Some(values) = card.values() else {
        Paragraph::new(ENTITIES_NOT_FOUND)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .render(regions.inner, buf);
        return;
    };

    render_track(card, theme, cell, regions.track, buf);

    Paragraph::new(values_line(card, values))
        .style(theme.text_style())
        .alignment(Alignment::Center)
        .render(regions.values, buf);
}

fn render_track(card: &SliderCard, theme: &Theme, cell: &CellMetrics, track: Rect, buf: &mut Buffer) {
    let slider = card.slider();
    let orientation = slider.orientation();
    let axis = usize::from(orientation.is_vertical());
    let [low, high] = slider.values().map(|value| slider.position_of(value));

    if main_len(track, orientation) == 0 {
        return;
    }
    if let Some(base) = theme.base {
        buf.set_style(track, Style::default().bg(base));
    }

    for offset in 0..main_len(track, orientation) {
        let (symbol, color) = if (low..=high).contains(&offset) {
            (CONNECT_SYMBOL[axis], theme.connect)
        } else {
            (TRACK_SYMBOL[axis], theme.track)
        };
        for cross in 0..cross_len(track, orientation) {
            let (x, y) = cell_at(track, orientation, offset, i32::from(cross));
            put(buf, x, y, symbol, Style::default().fg(color));
        }
    }

    let handles = &card.config().style.handles;
    let (size, shift) = match orientation {
        Orientation::Vertical => (
            handles.vertical,
            offset_cells(handles.x_offset_vertical_px, cell.width_px),
        ),
        Orientation::Horizontal => (
            handles.horizontal,
            offset_cells(handles.y_offset_horizontal_px, cell.height_px),
        ),
    };
    let extent = handle_extent(size, orientation, cell);
    let first = (i32::from(cross_len(track, orientation)) - i32::from(extent)) / 2 + shift;

    for (handle, offset) in [(Handle::Low, low), (Handle::High, high)] {
        let style = theme.handle_style(handle == slider.active_handle());
        for cross in 0..i32::from(extent) {
            let (x, y) = cell_at(track, orientation, offset, first + cross);
            put(buf, x, y, HANDLE_SYMBOL, style);
        }
    }
}

/// Cells a handle spans across the track.
fn handle_extent(size: HandleSize, orientation: Orientation, cell: &CellMetrics) -> u16 {
    match orientation {
        Orientation::Vertical => cell.px_to_columns(size.width_px),
        Orientation::Horizontal => cell.px_to_rows(size.height_px),
    }
}

fn main_len(track: Rect, orientation: Orientation) -> u16 {
    match orientation {
        Orientation::Vertical => track.height,
        Orientation::Horizontal => track.width,
    }
}

fn cross_len(track: Rect, orientation: Orientation) -> u16 {
    match orientation {
        Orientation::Vertical => track.width,
        Orientation::Horizontal => track.height,
    }
}

/// Screen cell at `offset` along the track and `cross` across it. Vertical
/// offsets count up from the bottom row.
fn cell_at(track: Rect, orientation: Orientation, offset: u16, cross: i32) -> (i32, i32) {
    match orientation {
        Orientation::Vertical => (
            i32::from(track.x) + cross,
            i32::from(track.bottom()) - 1 - i32::from(offset),
        ),
        Orientation::Horizontal => (
            i32::from(track.x) + i32::from(offset),
            i32::from(track.y) + cross,
        ),
    }
}

/// Sets one cell, ignoring positions outside the buffer.
fn put(buf: &mut Buffer, x: i32, y: i32, symbol: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_style(style);
    }
}
