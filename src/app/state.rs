//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::{AppConfig, Overrides};
use crate::core::{
    easing::AnimationSpec,
    geometry::{Bounds, GridGeometry},
    grid::{AnimatedGrid, UpdateOutcome},
    item::{self, Item},
};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Grid,
    SettingsMenu,
    ControlsSubmenu,
}

/// Top-level application state.
pub struct AppState {
    /// Current column count (slider value).
    pub columns: usize,
    /// Current row count (slider value).
    pub rows: usize,
    /// Tiles in display order.  Regenerated when columns/rows change.
    pub items: Vec<Item>,
    /// Registry of per-tile animations.
    pub grid: AnimatedGrid<u32>,
    /// Inner area of the grid pane from the last draw (terminal cells).
    pub grid_area: Rect,
    /// Size of the whole terminal from the last draw (for mouse hit-testing).
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Keybindings and animation settings, as stored on disk.
    pub config: AppConfig,
    /// Command-line values layered over `config` for this run.
    pub overrides: Overrides,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
}

impl AppState {
    pub fn new(config: AppConfig, columns: usize, rows: usize) -> Self {
        let columns = config.clamp_size(columns);
        let rows = config.clamp_size(rows);
        Self {
            columns,
            rows,
            items: item::create_items(columns * rows),
            grid: AnimatedGrid::new(config.animation_spec()),
            grid_area: Rect::default(),
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            config,
            overrides: Overrides::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self.apply_animation_config();
        self
    }

    /// Animation settings in effect: the file's, unless overridden.
    pub fn animation_spec(&self) -> AnimationSpec {
        let mut spec = self.config.animation_spec();
        if let Some(ms) = self.overrides.duration_ms {
            spec.duration = Duration::from_millis(ms);
        }
        if let Some(easing) = self.overrides.easing {
            spec.easing = easing;
        }
        spec
    }

    pub fn frame_interval(&self) -> Duration {
        let fps = self.overrides.fps.unwrap_or(self.config.fps);
        Duration::from_millis(1000 / u64::from(fps.max(1)))
    }

    /// Set the column count, regenerating the item list if it changed.
    pub fn set_columns(&mut self, columns: usize) {
        let columns = self.config.clamp_size(columns);
        if columns != self.columns {
            self.columns = columns;
            self.regenerate_items();
        }
    }

    /// Set the row count, regenerating the item list if it changed.
    pub fn set_rows(&mut self, rows: usize) {
        let rows = self.config.clamp_size(rows);
        if rows != self.rows {
            self.rows = rows;
            self.regenerate_items();
        }
    }

    /// One tile per cell.  Ids are stable, so surviving tiles glide to
    /// their new cells and the rest appear or vanish.
    fn regenerate_items(&mut self) {
        self.items = item::create_items(self.columns * self.rows);
        self.status_message = Some(format!("Grid: {} × {}", self.columns, self.rows));
    }

    pub fn shuffle(&mut self) {
        self.items = item::shuffled(&self.items, &mut rand::thread_rng());
        self.status_message = None;
    }

    /// Grid geometry for the current pane, or `None` if the pane is empty.
    pub fn geometry(&self) -> Option<GridGeometry> {
        let bounds = Bounds::new(f32::from(self.grid_area.width), f32::from(self.grid_area.height));
        GridGeometry::new(self.columns, self.rows, bounds).ok()
    }

    /// Feed the current items and geometry to the animated grid.
    pub fn sync_grid(&mut self, now: Instant) -> Option<UpdateOutcome> {
        let geometry = self.geometry()?;
        Some(self.grid.update(&self.items, Item::key, geometry, now))
    }

    /// Push new animation settings into the grid.
    pub fn apply_animation_config(&mut self) {
        self.grid.set_animation_spec(self.animation_spec());
    }
}
