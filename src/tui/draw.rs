//! Direct writes into the frame's character grid.
//!
//! Every helper clips against the buffer area, so a write that would land past
//! the edge of the grid is silently dropped instead of panicking.

use ratatui::{buffer::Buffer, style::Style};

const TOP_LEFT: &str = "╭";
const TOP_RIGHT: &str = "╮";
const BOTTOM_LEFT: &str = "╰";
const BOTTOM_RIGHT: &str = "╯";
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";

/// Write `text` at (`x`, `y`), truncated at `max_width` cells and at the grid edge.
pub fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, max_width: usize, style: Style) {
    let area = buf.area;
    if y < area.top() || y >= area.bottom() || x < area.left() || x >= area.right() {
        return;
    }
    let room = usize::from(area.right() - x).min(max_width);
    if room == 0 {
        return;
    }
    buf.set_stringn(x, y, text, room, style);
}

/// Write a single glyph, dropping it when outside the grid.
fn put_cell(buf: &mut Buffer, x: u16, y: u16, symbol: &str, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

/// Blank `width` cells starting at (`x`, `y`).
pub fn clear_span(buf: &mut Buffer, x: u16, y: u16, width: u16) {
    put_str(buf, x, y, &" ".repeat(usize::from(width)), usize::from(width), Style::default());
}

/// Draw a rounded frame whose top-left corner is (`x`, `y`).
///
/// Frames smaller than 2x2 are skipped.
pub fn draw_box(buf: &mut Buffer, x: u16, y: u16, height: u16, width: u16, style: Style) {
    if height < 2 || width < 2 {
        return;
    }
    let right = x.saturating_add(width - 1);
    let bottom = y.saturating_add(height - 1);

    for col in x + 1..right {
        put_cell(buf, col, y, HORIZONTAL, style);
        put_cell(buf, col, bottom, HORIZONTAL, style);
    }
    for row in y + 1..bottom {
        put_cell(buf, x, row, VERTICAL, style);
        put_cell(buf, right, row, VERTICAL, style);
    }
    put_cell(buf, x, y, TOP_LEFT, style);
    put_cell(buf, right, y, TOP_RIGHT, style);
    put_cell(buf, x, bottom, BOTTOM_LEFT, style);
    put_cell(buf, right, bottom, BOTTOM_RIGHT, style);
}

/// Column that centres `len` cells in `width`, never left of 0.
pub fn centered(width: u16, len: usize) -> u16 {
    let len = u16::try_from(len).unwrap_or(u16::MAX);
    width.saturating_sub(len) / 2
}
