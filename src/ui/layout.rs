//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the shuffle button including its border.
const BUTTON_WIDTH: u16 = 13;

/// Primary screen layout: grid pane on top, controls and status bar below.
pub struct AppLayout {
    /// Outer grid pane (with border).
    pub grid_area: Rect,
    pub shuffle_button: Rect,
    pub columns_slider: Rect,
    pub rows_slider: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // grid pane (takes all remaining space)
                Constraint::Length(3), // shuffle button
                Constraint::Length(1), // columns slider
                Constraint::Length(1), // rows slider
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let button_row = chunks[1];
        let width = BUTTON_WIDTH.min(button_row.width);
        let shuffle_button = Rect::new(
            button_row.x + (button_row.width - width) / 2,
            button_row.y,
            width,
            button_row.height,
        );

        Self {
            grid_area: chunks[0],
            shuffle_button,
            columns_slider: pad_x(chunks[2], 2),
            rows_slider: pad_x(chunks[3], 2),
            status_area: chunks[4],
        }
    }

    /// Grid pane minus its one-cell border — the bounds tiles are laid out in.
    pub fn grid_inner(&self) -> Rect {
        self.grid_area.inner(ratatui::layout::Margin::new(1, 1))
    }
}

fn pad_x(area: Rect, pad: u16) -> Rect {
    let pad = pad.min(area.width / 2);
    Rect::new(area.x + pad, area.y, area.width - 2 * pad, area.height)
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.grid_area, Rect::new(0, 0, 80, 24));
        assert_eq!(layout.grid_inner(), Rect::new(1, 1, 78, 22));
        assert_eq!(layout.shuffle_button, Rect::new(33, 24, 13, 3));
        assert_eq!(layout.columns_slider, Rect::new(2, 27, 76, 1));
        assert_eq!(layout.rows_slider.y, 28);
        assert_eq!(layout.status_area, Rect::new(0, 29, 80, 1));
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 3, 4));
        assert!(layout.shuffle_button.width <= 3);
        assert!(layout.columns_slider.width <= 3);
    }

    #[test]
    fn point_hits_are_half_open() {
        let r = Rect::new(2, 2, 3, 1);
        assert!(point_in_rect(r, 2, 2));
        assert!(point_in_rect(r, 4, 2));
        assert!(!point_in_rect(r, 5, 2));
        assert!(!point_in_rect(r, 2, 3));
    }
}
