//! Wheel impulse driver: discrete wheel events become velocity kicks.

/// Tuning for wheel impulses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelParams {
    /// Wheel delta (px) that counts as one card's worth of scrolling.
    pub px_per_card: f64,
    /// Upper bound on the card estimate of a single event.
    pub max_cards: f64,
    /// Impulse floor, in steps.
    pub base: f64,
    /// Extra impulse per estimated card, in steps.
    pub per_card: f64,
    /// Fraction of the impulse applied to the offset immediately.
    pub nudge: f64,
}

impl Default for WheelParams {
    fn default() -> Self {
        Self {
            px_per_card: 85.0,
            max_cards: 3.0,
            base: 0.26,
            per_card: 0.2,
            nudge: 0.1,
        }
    }
}

/// Whichever axis moved more; vertical wins ties.
pub fn dominant_delta(delta_x: f64, delta_y: f64) -> f64 {
    if delta_x.abs() > delta_y.abs() {
        delta_x
    } else {
        delta_y
    }
}

/// Signed velocity impulse for one wheel event.
///
/// Positive deltas (scroll down / right) advance to later cards, which
/// moves the track left, so the impulse has the opposite sign.
pub fn impulse(delta_x: f64, delta_y: f64, step: f64, params: &WheelParams) -> f64 {
    let delta = dominant_delta(delta_x, delta_y);
    if delta == 0.0 || !delta.is_finite() {
        return 0.0;
    }
    let per_card = params.px_per_card.max(f64::EPSILON);
    let cards = (delta.abs() / per_card)
        .round()
        .clamp(1.0, params.max_cards.max(1.0));
    -delta.signum() * step * (params.base + params.per_card * cards)
}
