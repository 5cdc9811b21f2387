//! Pointer drag driver: turns a captured drag into direct offset changes
//! and a release velocity.

use std::time::Duration;

/// Identifier of a captured pointer.
pub type PointerId = u64;

/// Frame length used to convert px/ms into px per tick.
pub const DEFAULT_FRAME_MS: f64 = 16.0;

/// A release this long after the last move means the pointer stopped
/// before lifting; it flings with zero velocity.
pub const ASSUME_STOPPED: Duration = Duration::from_millis(40);

/// State of one drag gesture, from pointer-down to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer: PointerId,
    start_x: f64,
    start_offset: f64,
    last_x: f64,
    last_at: Duration,
    /// Offset units per tick, same sign as the offset change.
    velocity: f64,
    /// Largest distance the pointer has been from `start_x`.
    travel: f64,
}

impl DragSession {
    pub fn begin(pointer: PointerId, x: f64, offset: f64, now: Duration) -> Self {
        Self {
            pointer,
            start_x: x,
            start_offset: offset,
            last_x: x,
            last_at: now,
            velocity: 0.0,
            travel: 0.0,
        }
    }

    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    pub fn last_x(&self) -> f64 {
        self.last_x
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Record a pointer move and return the offset the track should sit at:
    /// `start_offset + (x - start_x)`.
    ///
    /// The velocity estimate is the latest delta over the elapsed time
    /// (at least 1 ms), scaled to one frame.
    pub fn update(&mut self, x: f64, now: Duration, frame_ms: f64) -> f64 {
        let dt_ms = (now.saturating_sub(self.last_at).as_secs_f64() * 1000.0).max(1.0);
        self.velocity = (x - self.last_x) / dt_ms * frame_ms;
        self.last_x = x;
        self.last_at = now;
        self.travel = self.travel.max((x - self.start_x).abs());
        self.start_offset + (x - self.start_x)
    }

    /// Move the anchor by `delta` so the drag stays continuous after the
    /// offset was rewrapped or rescaled underneath it.
    pub fn shift(&mut self, delta: f64) {
        self.start_offset += delta;
    }

    pub fn remap(&mut self, f: impl Fn(f64) -> f64) {
        self.start_offset = f(self.start_offset);
    }

    /// Velocity to hand to the momentum engine when released at `now`.
    pub fn release_velocity(&self, now: Duration) -> f64 {
        if now.saturating_sub(self.last_at) > ASSUME_STOPPED {
            0.0
        } else {
            self.velocity
        }
    }

    /// A press/release that never strayed further than `slop` is a click.
    pub fn is_tap(&self, slop: f64) -> bool {
        self.travel <= slop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn offset_follows_pointer() {
        let mut drag = DragSession::begin(1, 100.0, -4800.0, ms(0));
        assert_eq!(drag.update(160.0, ms(16), DEFAULT_FRAME_MS), -4740.0);
        assert_eq!(drag.update(40.0, ms(32), DEFAULT_FRAME_MS), -4860.0);
        assert!(!drag.is_tap(6.0));
    }

    #[test]
    fn velocity_uses_latest_delta() {
        let mut drag = DragSession::begin(1, 0.0, 0.0, ms(0));
        drag.update(30.0, ms(16), DEFAULT_FRAME_MS);
        drag.update(70.0, ms(26), DEFAULT_FRAME_MS);
        // 40 px over 10 ms, scaled to a 16 ms frame.
        assert_eq!(drag.velocity(), 64.0);
    }

    #[test]
    fn zero_elapsed_time_counts_as_one_ms() {
        let mut drag = DragSession::begin(1, 0.0, 0.0, ms(5));
        drag.update(3.0, ms(5), DEFAULT_FRAME_MS);
        assert_eq!(drag.velocity(), 48.0);
    }

    #[test]
    fn stale_release_has_no_velocity() {
        let mut drag = DragSession::begin(1, 0.0, 0.0, ms(0));
        drag.update(50.0, ms(10), DEFAULT_FRAME_MS);
        assert_eq!(drag.release_velocity(ms(20)), 80.0);
        assert_eq!(drag.release_velocity(ms(200)), 0.0);
    }

    #[test]
    fn shift_keeps_drag_continuous() {
        let mut drag = DragSession::begin(1, 0.0, 100.0, ms(0));
        assert_eq!(drag.update(20.0, ms(16), DEFAULT_FRAME_MS), 120.0);
        drag.shift(-1200.0);
        assert_eq!(drag.update(25.0, ms(32), DEFAULT_FRAME_MS), -1075.0);
    }

    #[test]
    fn small_wiggle_is_a_tap() {
        let mut drag = DragSession::begin(1, 10.0, 0.0, ms(0));
        drag.update(14.0, ms(30), DEFAULT_FRAME_MS);
        drag.update(9.0, ms(60), DEFAULT_FRAME_MS);
        assert!(drag.is_tap(6.0));
        assert!(!drag.is_tap(3.0));
    }
}
