//! Ratatui widget that draws an [`AnimatedGrid`] frame.
//!
//! The widget only reads animation state: it samples every placed tile at
//! `now` and hands the resulting rectangle to a caller-supplied render
//! callback.  Tiles keep the fixed cell size while their position moves.

use std::hash::Hash;
use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Widget},
};

use crate::core::geometry::{CellSize, Offset};
use crate::core::grid::AnimatedGrid;

/// The grid widget itself — created fresh each frame.
pub struct AnimatedGridWidget<'a, T, K, F> {
    grid: &'a AnimatedGrid<K>,
    items: &'a [T],
    now: Instant,
    render_item: F,
    block: Option<Block<'a>>,
}

impl<'a, T, K, F> AnimatedGridWidget<'a, T, K, F>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T, Rect, &mut Buffer),
{
    /// `items` must be the slice last passed to [`AnimatedGrid::update`].
    pub fn new(grid: &'a AnimatedGrid<K>, items: &'a [T], now: Instant, render_item: F) -> Self {
        Self {
            grid,
            items,
            now,
            render_item,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a, T, K, F> Widget for AnimatedGridWidget<'a, T, K, F>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T, Rect, &mut Buffer),
{
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        for placement in self.grid.placements(self.now) {
            let Some(item) = self.items.get(placement.index) else {
                continue;
            };
            if let Some(rect) = tile_rect(inner, placement.offset, placement.size) {
                (self.render_item)(item, rect, buf);
            }
        }
    }
}

/// Snap a tile to terminal cells inside `inner`.
///
/// Both edges are rounded independently so neighbouring tiles share their
/// boundary instead of leaving a gap or overlapping.  Returns `None` if the
/// tile lies entirely outside `inner`.
pub fn tile_rect(inner: Rect, offset: Offset, size: CellSize) -> Option<Rect> {
    let x0 = offset.x.round() as i32;
    let y0 = offset.y.round() as i32;
    let x1 = (offset.x + size.width).round() as i32;
    let y1 = (offset.y + size.height).round() as i32;

    let clamp_x = |v: i32| v.clamp(0, i32::from(inner.width)) as u16;
    let clamp_y = |v: i32| v.clamp(0, i32::from(inner.height)) as u16;
    let (left, right) = (clamp_x(x0), clamp_x(x1));
    let (top, bottom) = (clamp_y(y0), clamp_y(y1));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        inner.x + left,
        inner.y + top,
        right - left,
        bottom - top,
    ))
}
