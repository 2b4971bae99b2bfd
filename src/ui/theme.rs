//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::item::Rgb;

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── tiles ──────────────────────────────────────────────────
    pub fn tile_color(rgb: Rgb) -> Color {
        let Rgb(r, g, b) = rgb;
        Color::Rgb(r, g, b)
    }

    /// Label style that stays readable on the tile's background.
    pub fn tile_label_style(rgb: Rgb) -> Style {
        let fg = if rgb.luma() > 150 { Color::Black } else { Color::White };
        Style::default()
            .fg(fg)
            .bg(Self::tile_color(rgb))
            .add_modifier(Modifier::BOLD)
    }

    // ── controls ───────────────────────────────────────────────
    pub fn button_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn slider_label_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn slider_track_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn slider_thumb_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn motion_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn motion_bar_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
