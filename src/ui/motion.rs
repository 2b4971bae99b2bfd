//! Badge in the grid border while tiles are in flight: how many move, and
//! a bar for the tween that has furthest to go.

use std::hash::Hash;
use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::grid::AnimatedGrid;

use super::theme::Theme;

const BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionIndicator {
    pub moving: usize,
    pub total: usize,
    /// Time progress of the slowest tween, `0.0..=1.0`.
    pub progress: f32,
}

impl MotionIndicator {
    pub fn from_grid<K: Eq + Hash + Clone>(grid: &AnimatedGrid<K>, now: Instant) -> Self {
        Self {
            moving: grid.moving(),
            total: grid.len(),
            progress: grid.progress(now).unwrap_or(1.0),
        }
    }

    fn line(&self) -> Line<'static> {
        let filled = (self.progress.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
        Line::from(vec![
            Span::styled(format!(" {}/{} ", self.moving, self.total), Theme::motion_style()),
            Span::styled("▰".repeat(filled), Theme::motion_bar_style()),
            Span::styled("▱".repeat(BAR_WIDTH - filled), Theme::motion_style()),
            Span::raw(" "),
        ])
    }
}

impl Widget for MotionIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.moving == 0 || area.height == 0 {
            return;
        }
        let line = self.line();
        let width = line.width() as u16;
        // Keep clear of the corner and the title.
        if area.width < width + 4 {
            return;
        }
        let x = area.right() - width - 2;
        buf.set_line(x, area.y, &line, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::easing::{AnimationSpec, Easing};
    use crate::core::geometry::{Bounds, GridGeometry};
    use std::time::Duration;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn idle_grid_draws_nothing() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        MotionIndicator { moving: 0, total: 16, progress: 1.0 }.render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim(), "");
    }

    #[test]
    fn badge_sits_top_right_with_bar() {
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        MotionIndicator { moving: 3, total: 16, progress: 0.3 }.render(area, &mut buf);
        let top = row(&buf, 0);
        assert!(top.ends_with(" 3/16 ▰▰▰▱▱▱▱▱▱▱   "), "{top:?}");
    }

    #[test]
    fn narrow_pane_hides_badge() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        MotionIndicator { moving: 1, total: 4, progress: 0.5 }.render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim(), "");
    }

    #[test]
    fn reads_counts_from_grid() {
        let mut grid = AnimatedGrid::new(AnimationSpec::tween(Duration::from_secs(1), Easing::Linear));
        let geometry = GridGeometry::new(2, 1, Bounds::new(10.0, 1.0)).unwrap();
        let t0 = Instant::now();
        grid.update(&['a', 'b'], |c| *c, geometry, t0);
        assert_eq!(MotionIndicator::from_grid(&grid, t0).moving, 0);

        grid.update(&['b', 'a'], |c| *c, geometry, t0);
        let badge = MotionIndicator::from_grid(&grid, t0 + Duration::from_millis(600));
        assert_eq!((badge.moving, badge.total), (2, 2));
        assert!((badge.progress - 0.6).abs() < 1e-3);
    }
}
