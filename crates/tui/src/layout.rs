//! Geometry of the card in the terminal.
//!
//! The layout engine works in pixels; the terminal works in cells. This
//! module measures the card's host box for the engine and turns the engine's
//! answer back into rows.
//!
//! The card is a bordered box. Its top border carries the title, the row
//! above the bottom border shows the two values, and the track sits in
//! between:
//!
//! ```text
//! ╭Range Slider╮   title row      (chrome)
//! │     █      │
//! │     ┃      │   track rows
//! │     █      │
//! │ 20% - 80%  │   values row     (chrome)
//! ╰────────────╯   bottom border  (covered by the chrome allowance)
//! ```

use rangecard_config::{CellMetrics, HostSizing};
use rangecard_protocol::{LayoutResult, MeasuredGeometry};
use ratatui::layout::Rect;

/// Rows taken by the top border and title.
pub const TITLE_ROWS: u16 = 1;

/// Rows taken by the values line.
pub const VALUES_ROWS: u16 = 1;

/// Rows taken by the bottom border.
pub const BOTTOM_BORDER_ROWS: u16 = 1;

/// Rows taken by a horizontal track.
pub const HORIZONTAL_TRACK_ROWS: u16 = 1;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 20;

/// Minimum terminal height for useful rendering: a horizontal card.
pub const MIN_HEIGHT: u16 = TITLE_ROWS + HORIZONTAL_TRACK_ROWS + VALUES_ROWS + BOTTOM_BORDER_ROWS;

/// Height of the title and values regions in pixels.
#[must_use]
pub fn chrome_height_px(cell: &CellMetrics) -> f64 {
    f64::from(cell.rows_to_px(TITLE_ROWS + VALUES_ROWS))
}

/// Measures the card's host box.
///
/// A box pinned by the previous pass measures exactly its pinned height.
/// Otherwise the box measures what the host offers: the terminal in `fill`
/// mode, the allotted rows in `rows` mode and nothing in `stack` mode.
///
/// # Examples
///
/// ```
/// use rangecard_config::{CellMetrics, HostSizing};
/// use rangecard_protocol::LayoutResult;
/// use rangecard_tui::layout::measure_host;
///
/// let cell = CellMetrics::default();
///
/// let geometry = measure_host(HostSizing::Fill, 30, None, &cell);
/// assert_eq!(geometry.host_height, Some(480.0));
/// assert_eq!(geometry.chrome_height, 32.0);
///
/// let pinned = LayoutResult { track_height_px: 294, forced_container_height_px: Some(350) };
/// let geometry = measure_host(HostSizing::Stack, 30, Some(&pinned), &cell);
/// assert_eq!(geometry.host_height, Some(350.0));
/// ```
#[must_use]
pub fn measure_host(
    sizing: HostSizing,
    terminal_rows: u16,
    previous: Option<&LayoutResult>,
    cell: &CellMetrics,
) -> MeasuredGeometry {
    let chrome = chrome_height_px(cell);
    let host_px = match previous.and_then(|r| r.forced_container_height_px) {
        Some(pinned) => pinned,
        None => cell.rows_to_px(sizing.offered_rows(terminal_rows)),
    };
    MeasuredGeometry::new(f64::from(host_px), chrome)
}

/// Rows the card needs to show a track of the given layout, or a horizontal
/// track when there is no layout.
#[must_use]
pub fn natural_rows(layout: Option<&LayoutResult>, cell: &CellMetrics) -> u16 {
    let track = layout.map_or(HORIZONTAL_TRACK_ROWS, |r| cell.px_to_rows(r.track_height_px));
    (TITLE_ROWS + VALUES_ROWS + BOTTOM_BORDER_ROWS).saturating_add(track)
}

/// Rows allocated to the card's box, never more than the terminal has.
///
/// A pinned box gets enough rows to cover its pinned height. An unpinned
/// box gets what the host offers, or its natural height in `stack` mode.
#[must_use]
pub fn card_rows(
    sizing: HostSizing,
    terminal_rows: u16,
    layout: Option<&LayoutResult>,
    cell: &CellMetrics,
) -> u16 {
    let rows = match layout.and_then(|r| r.forced_container_height_px) {
        Some(pinned) => cell.px_to_rows_covering(pinned),
        None => match sizing {
            HostSizing::Stack => natural_rows(layout, cell),
            HostSizing::Fill | HostSizing::Rows(_) => sizing.offered_rows(terminal_rows),
        },
    };
    rows.min(terminal_rows)
}

/// Returns the top `rows` rows of `area`.
#[must_use]
pub fn card_area(area: Rect, rows: u16) -> Rect {
    Rect {
        height: rows.min(area.height),
        ..area
    }
}

/// Converts a pixel offset into a whole number of cells, rounding to nearest.
#[must_use]
pub fn offset_cells(px: f64, cell_px: u16) -> i32 {
    if !px.is_finite() || cell_px == 0 {
        return 0;
    }
    (px / f64::from(cell_px)).round().clamp(-1000.0, 1000.0) as i32
}
