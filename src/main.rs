//! An animated grid in the terminal.
//!
//! Tiles are laid out row-major in a `columns × rows` grid.  Shuffling them
//! or changing the grid size makes every tile glide from where it is shown
//! to its new cell.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::{AppConfig, Overrides};
use crate::core::easing::Easing;
use crate::ui::{
    button::Button, grid_widget::AnimatedGridWidget, layout::AppLayout, popup,
    motion::MotionIndicator, slider::Slider, theme::Theme, tile::render_tile,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Animated grid layout demo")]
struct Cli {
    /// Initial column count (clamped to the configured range).
    #[arg(long)]
    columns: Option<usize>,

    /// Initial row count (clamped to the configured range).
    #[arg(long)]
    rows: Option<usize>,

    /// Tile animation duration in milliseconds.
    #[arg(long = "duration-ms")]
    duration_ms: Option<u64>,

    /// Easing curve, e.g. `linear`, `ease-in-out`, `fast-out-slow-in`.
    #[arg(long)]
    easing: Option<Easing>,

    /// Redraw rate while tiles are moving.
    #[arg(long)]
    fps: Option<u32>,

    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Values that shadow the config file for this run only.
    fn overrides(&self) -> Overrides {
        Overrides {
            duration_ms: self.duration_ms,
            easing: self.easing,
            fps: self.fps.map(|fps| fps.clamp(1, 240)),
        }
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            // Only visible when RUST_LOG is set; shares stderr with the UI.
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ──────────

fn draw(frame: &mut Frame, state: &mut AppState, now: Instant) {
    state.terminal_area = frame.area();
    let layout = AppLayout::from_area(frame.area());
    state.grid_area = layout.grid_inner();
    state.sync_grid(now);

    let grid_block = Block::default()
        .title(format!(" Animated grid · {} × {} ", state.columns, state.rows))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());

    frame.render_widget(
        AnimatedGridWidget::new(&state.grid, &state.items, now, render_tile).block(grid_block),
        layout.grid_area,
    );
    frame.render_widget(MotionIndicator::from_grid(&state.grid, now), layout.grid_area);

    frame.render_widget(Button { label: "Shuffle" }, layout.shuffle_button);
    let (min, max) = (state.config.min_size, state.config.max_size);
    frame.render_widget(
        Slider::new("Columns", state.columns, min, max),
        layout.columns_slider,
    );
    frame.render_widget(Slider::new("Rows", state.rows, min, max), layout.rows_slider);

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Grid => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(
                popup::SettingsPopup {
                    state: &*state,
                    selected: state.settings_selected,
                },
                frame.area(),
            );
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                frame.area(),
            );
        }
        ActiveView::Grid => {}
    }
}

// ───────────────────────────────────────── event loop ───────

async fn run(terminal: &mut Terminal<CrosstermBackend<Stderr>>, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(state.frame_interval());
    let mut dirty = true;

    loop {
        // Redraw only when something changed or tiles are in flight.
        if dirty {
            terminal.draw(|frame| draw(frame, state, Instant::now()))?;
            dirty = false;
        }

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => {
                handler::handle_key(state, k);
                dirty = true;
            }
            AppEvent::Mouse(m) => dirty |= handler::handle_mouse(state, m),
            AppEvent::Resize(w, h) => {
                tracing::debug!(w, h, "terminal resized");
                dirty = true;
            }
            AppEvent::Frame(now) => {
                let was_moving = state.grid.is_animating();
                // One more draw after the last tile settles.
                dirty |= state.grid.tick(now) || was_moving;
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let config = AppConfig::load();
    let columns = cli.columns.unwrap_or_else(|| config.initial_size());
    let rows = cli.rows.unwrap_or_else(|| config.initial_size());
    let mut state = AppState::new(config, columns, rows).with_overrides(cli.overrides());
    let spec = state.grid.animation_spec();
    tracing::info!(
        columns = state.columns,
        rows = state.rows,
        duration_ms = spec.duration.as_millis() as u64,
        easing = %spec.easing,
        "starting"
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even if the loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "animated-grid",
            "--duration-ms",
            "250",
            "--easing",
            "linear",
            "--fps",
            "1000",
            "--columns",
            "5",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.duration_ms, Some(250));
        assert_eq!(overrides.easing, Some(Easing::Linear));
        assert_eq!(overrides.fps, Some(240));
        assert_eq!(cli.columns, Some(5));
        assert_eq!(cli.rows, None);
    }

    #[test]
    fn cli_rejects_unknown_easing() {
        assert!(Cli::try_parse_from(["animated-grid", "--easing", "bounce"]).is_err());
    }

    #[test]
    fn unset_flags_leave_the_file_in_charge() {
        let overrides = Cli::parse_from(["animated-grid"]).overrides();
        assert_eq!(overrides, Overrides::default());
    }

    #[test]
    fn first_frame_lays_out_every_tile() {
        let mut terminal = Terminal::new(TestBackend::new(82, 30)).unwrap();
        let mut state = AppState::new(AppConfig::default(), 4, 4);
        let now = Instant::now();
        terminal.draw(|frame| draw(frame, &mut state, now)).unwrap();

        assert_eq!(state.grid_area.width, 80);
        assert_eq!(state.grid.len(), 16);
        assert!(!state.grid.is_animating());
        // Tile 1 sits in the top-left cell, right inside the border.
        let buf = terminal.backend().buffer();
        assert_eq!(buf[(1, 1)].bg, Theme::tile_color(state.items[0].color));
    }

    #[test]
    fn shuffle_then_frames_settle() {
        let mut terminal = Terminal::new(TestBackend::new(82, 30)).unwrap();
        let mut state = AppState::new(AppConfig::default(), 4, 4);
        let t0 = Instant::now();
        terminal.draw(|frame| draw(frame, &mut state, t0)).unwrap();

        state.items.reverse();
        terminal.draw(|frame| draw(frame, &mut state, t0)).unwrap();
        assert!(state.grid.is_animating());
        assert_eq!(MotionIndicator::from_grid(&state.grid, t0).moving, 16);

        let end = t0 + Duration::from_millis(state.config.duration_ms);
        assert!(!state.grid.tick(end));
        terminal.draw(|frame| draw(frame, &mut state, end)).unwrap();
        // Reversed order puts tile 16 in the top-left cell.
        let buf = terminal.backend().buffer();
        assert_eq!(state.items[0].id, 16);
        assert_eq!(buf[(1, 1)].bg, Theme::tile_color(state.items[0].color));
    }
}
