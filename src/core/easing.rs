//! Easing curves and the tween settings used by every tile animation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Cubic-bézier easing curves (the Material set plus the CSS basics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    #[default]
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
}

impl Easing {
    /// Ordered list, used by the settings menu to cycle.
    pub const ALL: &[Easing] = &[
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinearIn,
    ];

    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn transform(self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }

    /// Name used on the command line and in the config file.
    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
            Easing::FastOutSlowIn => "fast-out-slow-in",
            Easing::LinearOutSlowIn => "linear-out-slow-in",
            Easing::FastOutLinearIn => "fast-out-linear-in",
        }
    }

    /// The next curve in [`Easing::ALL`], wrapping around.
    pub fn next(self) -> Easing {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown easing `{0}` (expected one of: linear, ease-in, ease-out, ease-in-out, fast-out-slow-in, linear-out-slow-in, fast-out-linear-in)")]
pub struct ParseEasingError(pub String);

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name() == normalised)
            .ok_or_else(|| ParseEasingError(s.to_string()))
    }
}

/// Solve the bézier for `x = fraction` and return its `y`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let derivative = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson first, bisection if the slope flattens out.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..20 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// Duration + easing for a tile tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSpec {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);

    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Share of the duration covered after `elapsed`, in `[0, 1]`.
    pub fn fraction(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Eased progress after `elapsed`; `1.0` once the duration has passed.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        self.easing.transform(self.fraction(elapsed))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Self::DEFAULT_DURATION, Easing::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_curve_pins_its_endpoints(#[values(0, 1, 2, 3, 4, 5, 6)] idx: usize) {
        let easing = Easing::ALL[idx];
        assert_eq!(easing.transform(0.0), 0.0);
        assert_eq!(easing.transform(1.0), 1.0);
        let mid = easing.transform(0.5);
        assert!(mid > 0.0 && mid < 1.0, "{easing}: {mid}");
    }

    #[test]
    fn curves_are_monotonic() {
        for &easing in Easing::ALL {
            let mut prev = 0.0;
            for step in 1..=50 {
                let v = easing.transform(step as f32 / 50.0);
                assert!(v + 1e-4 >= prev, "{easing} dipped at step {step}");
                prev = v;
            }
        }
    }

    #[test]
    fn fast_out_slow_in_leads_linear() {
        assert!(Easing::FastOutSlowIn.transform(0.3) > 0.3);
        assert!(Easing::EaseIn.transform(0.3) < 0.3);
    }

    #[test]
    fn names_round_trip() {
        for &easing in Easing::ALL {
            assert_eq!(easing.name().parse::<Easing>(), Ok(easing));
        }
        assert_eq!("Ease_In_Out".parse::<Easing>(), Ok(Easing::EaseInOut));
        assert!("bouncy".parse::<Easing>().is_err());
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(Easing::Linear.next(), Easing::EaseIn);
        assert_eq!(Easing::FastOutLinearIn.next(), Easing::Linear);
    }

    #[test]
    fn default_spec_is_one_second() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration, Duration::from_millis(1000));
        assert_eq!(spec.easing, Easing::FastOutSlowIn);
        assert_eq!(spec.progress(Duration::ZERO), 0.0);
        assert_eq!(spec.progress(Duration::from_millis(1000)), 1.0);
        assert_eq!(spec.progress(Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let spec = AnimationSpec::tween(Duration::ZERO, Easing::Linear);
        assert_eq!(spec.progress(Duration::ZERO), 1.0);
    }
}
