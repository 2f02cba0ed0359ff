//! Helpers shared by the rendering tests.

use ratatui::buffer::Buffer;

/// Converts a ratatui [`Buffer`] to text, one line per row.
///
/// Trailing spaces are trimmed from each line, which keeps inline snapshots
/// free of invisible padding.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in buf.area.top()..buf.area.bottom() {
        for x in buf.area.left()..buf.area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        let trimmed = result.trim_end_matches(' ');
        result.truncate(trimmed.len());
        result.push('\n');
    }
    result
}
