use glam::DVec2;
use ratatui::layout::Rect;
use typestrike::world::Arena;
use unicode_width::UnicodeWidthStr;

/// Maps a world position onto a cell of `field`, or None when it falls outside
pub fn to_cell(pos: DVec2, arena: &Arena, field: Rect) -> Option<(u16, u16)> {
    if field.width == 0 || field.height == 0 || !pos.is_finite() {
        return None;
    }

    let col = (pos.x / arena.width * field.width as f64).floor();
    let row = (pos.y / arena.height * field.height as f64).floor();
    if col < 0.0 || row < 0.0 || col >= field.width as f64 || row >= field.height as f64 {
        return None;
    }

    Some((field.x + col as u16, field.y + row as u16))
}

/// Start column for `text` centered on `col`, kept inside `field`
pub fn centered_label_x(text: &str, col: u16, field: Rect) -> u16 {
    let width = text.width() as u16;
    let start = col.saturating_sub(width / 2).max(field.x);
    let max_start = (field.x + field.width).saturating_sub(width).max(field.x);
    start.min(max_start)
}
