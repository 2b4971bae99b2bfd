//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};

/// Durations offered by the settings menu, in milliseconds.
const DURATIONS_MS: &[u64] = &[250, 500, 750, 1000, 1500, 2000, 3000];

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. } | Self::Cycle { label, .. } => label,
        }
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Cycle {
        label: "Duration",
        value: |s| format!("{}ms", s.grid.animation_spec().duration.as_millis()),
        cycle: cycle_duration,
    },
    SettingsItem::Cycle {
        label: "Easing",
        value: |s| s.grid.animation_spec().easing.to_string(),
        cycle: cycle_easing,
    },
];

/// Next longer preset, wrapping to the shortest.
fn next_duration(current: u64) -> u64 {
    DURATIONS_MS
        .iter()
        .copied()
        .find(|&d| d > current)
        .unwrap_or(DURATIONS_MS[0])
}

// Cycles step from the value in effect.  Picking one in the menu replaces
// the command-line value and is the only thing written to disk.

fn cycle_duration(s: &mut AppState) {
    let current = s.grid.animation_spec().duration.as_millis() as u64;
    let next = next_duration(current);
    s.overrides.duration_ms = None;
    s.config.duration_ms = next;
    s.config.save_or_warn();
    s.apply_animation_config();
    s.status_message = Some(format!("Duration: {next}ms"));
}

fn cycle_easing(s: &mut AppState) {
    let next = s.grid.animation_spec().easing.next();
    s.overrides.easing = None;
    s.config.easing = next;
    s.config.save_or_warn();
    s.apply_animation_config();
    s.status_message = Some(format!("Easing: {next}"));
}
