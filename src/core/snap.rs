//! Snap controller: eases the offset onto the nearest step-aligned rest
//! position once momentum has died out.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::ConfigError;

/// Distance below which a snap is applied instantly instead of animated.
pub const SNAP_EPSILON: f64 = 0.5;

/// What sits on the viewport's center line at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapAlignment {
    /// A single card is centered.
    Card,
    /// The gap between two cards is centered; both share focus.
    #[default]
    Split,
}

impl SnapAlignment {
    /// Shift applied to every card's natural position.
    pub fn shift(self, step: f64) -> f64 {
        match self {
            SnapAlignment::Card => 0.0,
            SnapAlignment::Split => -step / 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SnapAlignment::Card => "card",
            SnapAlignment::Split => "split",
        }
    }
}

impl fmt::Display for SnapAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SnapAlignment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" | "center" => Ok(SnapAlignment::Card),
            "split" | "gap" => Ok(SnapAlignment::Split),
            other => Err(ConfigError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Nearest rest offset: `round((offset - mid) / step) * step + mid`.
pub fn snap_target(offset: f64, mid: f64, step: f64) -> f64 {
    if !(step.is_finite() && step > 0.0) {
        return offset;
    }
    ((offset - mid) / step).round() * step + mid
}

/// Cubic ease-out: `1 - (1 - t)³`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// A running snap from `from` to `to` over a fixed wall-clock duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    from: f64,
    to: f64,
    started: Duration,
    duration: Duration,
}

impl SnapAnimation {
    pub fn new(from: f64, to: f64, started: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            started,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Elapsed fraction in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Offset at `now`, and whether the animation has finished.  The final
    /// sample is exactly `to`.
    pub fn sample(&self, now: Duration) -> (f64, bool) {
        let t = self.progress(now);
        if t >= 1.0 {
            (self.to, true)
        } else {
            (self.from + (self.to - self.from) * ease_out_cubic(t), false)
        }
    }

    /// Remap both endpoints (used when the surface is resized mid-snap).
    pub fn remap(&mut self, f: impl Fn(f64) -> f64) {
        self.from = f(self.from);
        self.to = f(self.to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_step_aligned() {
        assert_eq!(snap_target(-4800.0, -4800.0, 300.0), -4800.0);
        assert_eq!(snap_target(-4800.0 + 149.0, -4800.0, 300.0), -4800.0);
        assert_eq!(snap_target(-4800.0 + 151.0, -4800.0, 300.0), -4500.0);
        assert_eq!(snap_target(-4800.0 - 620.0, -4800.0, 300.0), -5400.0);
        assert_eq!(snap_target(42.0, 0.0, 0.0), 42.0);
    }

    #[test]
    fn easing_boundaries() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(-2.0), 0.0);
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn animation_runs_to_exact_target() {
        let start = Duration::from_millis(1000);
        let anim = SnapAnimation::new(10.0, 110.0, start, Duration::from_millis(340));

        assert_eq!(anim.sample(start), (10.0, false));

        let (mid_value, done) = anim.sample(start + Duration::from_millis(170));
        assert!(!done);
        assert_eq!(mid_value, 97.5);

        assert_eq!(anim.sample(start + Duration::from_millis(340)), (110.0, true));
        assert_eq!(anim.sample(start + Duration::from_secs(9)), (110.0, true));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let anim = SnapAnimation::new(0.0, 5.0, Duration::ZERO, Duration::ZERO);
        assert_eq!(anim.sample(Duration::ZERO), (5.0, true));
    }

    #[test]
    fn alignment_parses() {
        assert_eq!("Card".parse::<SnapAlignment>().unwrap(), SnapAlignment::Card);
        assert_eq!(" split ".parse::<SnapAlignment>().unwrap(), SnapAlignment::Split);
        assert!("diagonal".parse::<SnapAlignment>().is_err());
        assert_eq!(SnapAlignment::Split.shift(300.0), -150.0);
    }
}
