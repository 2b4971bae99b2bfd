//! User configuration — keybindings, animation defaults and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/animated-grid/config.toml`
//! (default `~/.config/animated-grid/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::easing::{AnimationSpec, Easing};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the grid screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shuffle,
    ColumnsDown,
    ColumnsUp,
    RowsDown,
    RowsUp,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::Shuffle,
        Action::ColumnsDown,
        Action::ColumnsUp,
        Action::RowsDown,
        Action::RowsUp,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Shuffle => "Shuffle",
            Action::ColumnsDown => "Fewer Columns",
            Action::ColumnsUp => "More Columns",
            Action::RowsDown => "Fewer Rows",
            Action::RowsUp => "More Rows",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Shuffle => "shuffle",
            Action::ColumnsDown => "columns_down",
            Action::ColumnsUp => "columns_up",
            Action::RowsDown => "rows_down",
            Action::RowsUp => "rows_up",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    const MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & Self::MASK) == (event.modifiers & Self::MASK)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & Self::MASK,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => code_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&code_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Space"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case (`S` vs `s`).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn code_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Smallest grid dimension the sliders may reach.
pub const MIN_SIZE: usize = 2;
/// Largest grid dimension the sliders may reach.
pub const MAX_SIZE: usize = 6;
/// Upper bound on a configurable grid dimension.
const SIZE_LIMIT: usize = 16;

/// Application configuration — keybindings, animation and grid bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Tile tween duration.
    pub duration_ms: u64,
    pub easing: Easing,
    /// Inclusive slider range for both columns and rows.
    pub min_size: usize,
    pub max_size: usize,
    /// Frame rate of the redraw tick.
    pub fps: u32,
}

/// Animation values given on the command line.  They win over the file
/// for one run and are never written back to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub duration_ms: Option<u64>,
    pub easing: Option<Easing>,
    pub fps: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            duration_ms: AnimationSpec::DEFAULT_DURATION.as_millis() as u64,
            easing: Easing::default(),
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
            fps: 60,
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Shuffle, vec![KeyBind::new(Char('s'), n), KeyBind::new(Char(' '), n)]);
        m.insert(ColumnsDown, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ColumnsUp, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(RowsDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(RowsUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(Duration::from_millis(self.duration_ms), self.easing)
    }

    /// Starting size for columns and rows: the middle of the slider range.
    pub fn initial_size(&self) -> usize {
        (self.min_size + self.max_size) / 2
    }

    pub fn clamp_size(&self, value: usize) -> usize {
        value.clamp(self.min_size, self.max_size)
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"←/h"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: shuffle | {}/{}: columns | {}/{}: rows | {}: settings | {}: quit",
            self.short_binding(Action::Shuffle),
            self.short_binding(Action::ColumnsDown),
            self.short_binding(Action::ColumnsUp),
            self.short_binding(Action::RowsDown),
            self.short_binding(Action::RowsUp),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!("no config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    /// Save, logging instead of failing — used by interactive settings.
    pub fn save_or_warn(&self) {
        if let Err(err) = self.save() {
            tracing::warn!("failed to save config: {err:#}");
        }
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "ignoring config line without `=`");
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            // Animation and grid settings.
            match key {
                "duration_ms" => {
                    match value.parse::<u64>() {
                        // Keep this bounded for predictable UX.
                        Ok(v) => config.duration_ms = v.min(10_000),
                        Err(_) => tracing::warn!("invalid duration_ms `{value}`"),
                    }
                    continue;
                }
                "easing" => {
                    match value.parse::<Easing>() {
                        Ok(e) => config.easing = e,
                        Err(err) => tracing::warn!("{err}"),
                    }
                    continue;
                }
                "min_size" | "max_size" => {
                    match value.parse::<usize>() {
                        Ok(v) if key == "min_size" => config.min_size = v.clamp(1, SIZE_LIMIT),
                        Ok(v) => config.max_size = v.clamp(1, SIZE_LIMIT),
                        Err(_) => tracing::warn!("invalid {key} `{value}`"),
                    }
                    continue;
                }
                "fps" => {
                    match value.parse::<u32>() {
                        Ok(v) => config.fps = v.clamp(1, 240),
                        Err(_) => tracing::warn!("invalid fps `{value}`"),
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("unknown config key `{key}`");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        if config.min_size > config.max_size {
            tracing::warn!(
                "min_size {} exceeds max_size {}, swapping",
                config.min_size,
                config.max_size
            );
            std::mem::swap(&mut config.min_size, &mut config.max_size);
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# animated-grid configuration".to_string(),
            String::new(),
            "# Animation".to_string(),
            format!("duration_ms = {}", self.duration_ms),
            format!("easing = {}", self.easing),
            format!("fps = {}", self.fps),
            String::new(),
            "# Grid slider range (columns and rows)".to_string(),
            format!("min_size = {}", self.min_size),
            format!("max_size = {}", self.max_size),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/animated-grid/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("animated-grid").join("config.toml")
}
