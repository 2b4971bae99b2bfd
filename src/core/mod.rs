//! Core algorithms – grid geometry, easing, per-tile tweens and the keyed
//! animated grid.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in as an [`std::time::Instant`], so every type here can be
//! driven from tests without a real clock.

pub mod easing;
pub mod geometry;
pub mod grid;
pub mod item;
pub mod tween;
