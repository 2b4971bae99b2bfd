//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  It only reads animation state; the main loop ticks it.

pub mod button;
pub mod grid_widget;
pub mod layout;
pub mod motion;
pub mod popup;
pub mod slider;
pub mod theme;
pub mod tile;
