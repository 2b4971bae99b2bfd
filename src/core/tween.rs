//! Per-tile animated position.
//!
//! Each [`AnimatedOffset`] is a tiny state machine:
//!
//! ```text
//! Idle ──animate_to──▶ Animating ──elapsed ≥ duration──▶ Idle (at end)
//!                          │
//!                          └──animate_to──▶ Animating (start = displayed value)
//! ```
//!
//! Nothing here owns a timer.  The caller passes `now` in and advances all
//! offsets from one loop.

use std::time::Instant;

use super::easing::AnimationSpec;
use super::geometry::Offset;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Idle,
    Animating {
        start: Offset,
        end: Offset,
        started_at: Instant,
        spec: AnimationSpec,
    },
}

/// An independently animatable 2D position.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedOffset {
    /// Last sampled value (updated by `tick` and on retarget).
    current: Offset,
    target: Offset,
    motion: Motion,
}

impl AnimatedOffset {
    /// A settled offset sitting at `offset`.
    pub fn at(offset: Offset) -> Self {
        Self {
            current: offset,
            target: offset,
            motion: Motion::Idle,
        }
    }

    #[cfg(test)]
    pub fn target(&self) -> Offset {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.motion, Motion::Animating { .. })
    }

    /// Displayed value at `now`, without mutating state.
    pub fn value_at(&self, now: Instant) -> Offset {
        match self.motion {
            Motion::Idle => self.current,
            Motion::Animating {
                start,
                end,
                started_at,
                spec,
            } => {
                let elapsed = now.saturating_duration_since(started_at);
                if elapsed >= spec.duration {
                    return end;
                }
                start.lerp(end, spec.progress(elapsed))
            }
        }
    }

    /// Un-eased time progress of the running tween, `None` when idle.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        match self.motion {
            Motion::Idle => None,
            Motion::Animating {
                started_at, spec, ..
            } => Some(spec.fraction(now.saturating_duration_since(started_at))),
        }
    }

    /// Start (or redirect) a tween to `target`.  Returns `false` when the
    /// target is unchanged and nothing was started.
    pub fn animate_to(&mut self, target: Offset, spec: AnimationSpec, now: Instant) -> bool {
        if target == self.target {
            return false;
        }
        let start = self.value_at(now);
        self.current = start;
        self.target = target;
        self.motion = Motion::Animating {
            start,
            end: target,
            started_at: now,
            spec,
        };
        true
    }

    /// Sample the tween at `now`.  Returns `true` while still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Motion::Animating {
            started_at, spec, ..
        } = self.motion
        else {
            return false;
        };
        if now.saturating_duration_since(started_at) >= spec.duration {
            self.current = self.target;
            self.motion = Motion::Idle;
            return false;
        }
        self.current = self.value_at(now);
        true
    }
}
