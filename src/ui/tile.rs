//! Draws one demo tile: a coloured box with its id centred.

use ratatui::{buffer::Buffer, layout::Rect};

use crate::core::item::Item;

use super::theme::Theme;

/// Render callback handed to the grid widget.
pub fn render_tile(item: &Item, area: Rect, buf: &mut Buffer) {
    // One-cell gutter on the right/bottom when the tile has room for it.
    let width = if area.width >= 4 { area.width - 1 } else { area.width };
    let height = if area.height >= 3 { area.height - 1 } else { area.height };
    let body = Rect::new(area.x, area.y, width, height).intersection(*buf.area());
    if body.is_empty() {
        return;
    }

    let style = Theme::tile_label_style(item.color);
    buf.set_style(body, style);

    let label = item.id.to_string();
    let label_width = label.len() as u16;
    if label_width > body.width {
        return;
    }
    let x = body.x + (body.width - label_width) / 2;
    let y = body.y + body.height / 2;
    buf.set_string(x, y, label, style);
}
