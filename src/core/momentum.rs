//! Momentum engine: geometric velocity decay integrated into the offset,
//! one step per frame tick.

/// Decay constants for the post-release glide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    /// Velocity multiplier per tick, in `(0, 1)`.
    pub decay: f64,
    /// Below this speed (px/tick) the glide is over.
    pub rest_velocity: f64,
}

impl Default for Momentum {
    fn default() -> Self {
        Self {
            decay: 0.92,
            rest_velocity: 0.15,
        }
    }
}

impl Momentum {
    /// Advance one tick: decay, integrate, and report whether the velocity
    /// has dropped below the rest threshold (in which case it is zeroed).
    pub fn step(&self, velocity: &mut f64, offset: &mut f64) -> bool {
        *velocity *= self.decay;
        *offset += *velocity;
        if velocity.abs() < self.rest_velocity {
            *velocity = 0.0;
            true
        } else {
            false
        }
    }

    /// Closed-form tick count of [`Momentum::step`] until rest.
    pub fn ticks_to_rest(&self, initial_velocity: f64) -> u32 {
        ticks_to_rest(initial_velocity, self.decay, self.rest_velocity)
    }
}

/// `⌈log_decay(eps / |v0|)⌉`: ticks for `|v0| · decayⁿ` to fall below
/// `eps`.  Zero when already below it.
pub fn ticks_to_rest(initial_velocity: f64, decay: f64, eps: f64) -> u32 {
    let v0 = initial_velocity.abs();
    if !(v0.is_finite() && eps > 0.0 && decay > 0.0 && decay < 1.0) || v0 < eps {
        return 0;
    }
    ((eps / v0).ln() / decay.ln()).ceil() as u32
}

/// Clamp a velocity to `±limit`.
pub fn clamp_velocity(velocity: f64, limit: f64) -> f64 {
    let limit = limit.abs();
    if !velocity.is_finite() {
        return 0.0;
    }
    velocity.clamp(-limit, limit)
}
