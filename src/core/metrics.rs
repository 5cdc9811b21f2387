//! Surface measurements and the step / stride derived from them.

/// Raw geometry reported by the host for the carousel viewport and one
/// representative card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceGeometry {
    pub viewport_width: f64,
    pub card_width: f64,
    pub gap: f64,
}

/// Resolved layout metrics.  Only exists once the surface has a measured,
/// non-zero card and viewport and the item list is non-empty, so `step` is
/// always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub card_width: f64,
    pub gap: f64,
    /// Distance between adjacent card centers (`card_width + gap`).
    pub step: f64,
    /// Distance covering one full cycle of the real items (`step * n`).
    pub stride: f64,
    pub viewport_width: f64,
    pub item_count: usize,
}

/// Negative, NaN and infinite measurements count as "not measured".
fn measured(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl Metrics {
    /// Resolve metrics from a surface measurement.  Returns `None` while the
    /// surface is unmeasured (zero card or viewport width) or there is
    /// nothing to show.
    pub fn resolve(surface: SurfaceGeometry, item_count: usize) -> Option<Self> {
        let card_width = measured(surface.card_width);
        let viewport_width = measured(surface.viewport_width);
        let gap = measured(surface.gap);
        if card_width == 0.0 || viewport_width == 0.0 || item_count == 0 {
            return None;
        }
        let step = card_width + gap;
        Some(Self {
            card_width,
            gap,
            step,
            stride: step * item_count as f64,
            viewport_width,
            item_count,
        })
    }

    /// Offset at which the first entry of the center copy sits on the
    /// alignment line.
    pub fn mid(&self, copies: usize) -> f64 {
        -((copies / 2) as f64) * self.stride
    }
}

/// Card width that fits `visible_cards` cards and their gaps across the
/// viewport.  Zero when the viewport is unmeasured or too narrow.
pub fn layout_card_width(viewport_width: f64, gap: f64, visible_cards: usize) -> f64 {
    let visible = visible_cards.max(1) as f64;
    let width = (measured(viewport_width) - measured(gap) * (visible - 1.0)) / visible;
    width.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(viewport_width: f64, card_width: f64, gap: f64) -> SurfaceGeometry {
        SurfaceGeometry {
            viewport_width,
            card_width,
            gap,
        }
    }

    #[test]
    fn unmeasured_surface_is_not_ready() {
        assert_eq!(Metrics::resolve(surface(800.0, 0.0, 20.0), 4), None);
        assert_eq!(Metrics::resolve(surface(0.0, 200.0, 20.0), 4), None);
        assert_eq!(Metrics::resolve(surface(800.0, f64::NAN, 20.0), 4), None);
        assert_eq!(Metrics::resolve(surface(800.0, 200.0, 20.0), 0), None);
    }

    #[test]
    fn step_and_stride() {
        let m = Metrics::resolve(surface(1200.0, 280.0, 20.0), 4).unwrap();
        assert_eq!(m.step, 300.0);
        assert_eq!(m.stride, 1200.0);
        assert_eq!(m.mid(9), -4800.0);
    }

    #[test]
    fn single_item_stride_equals_step() {
        let m = Metrics::resolve(surface(600.0, 100.0, -5.0), 1).unwrap();
        assert_eq!(m.gap, 0.0);
        assert_eq!(m.step, 100.0);
        assert_eq!(m.stride, m.step);
    }

    #[test]
    fn layout_width_splits_viewport() {
        assert_eq!(layout_card_width(1260.0, 20.0, 4), 300.0);
        assert_eq!(layout_card_width(0.0, 20.0, 4), 0.0);
        assert_eq!(layout_card_width(30.0, 20.0, 4), 0.0);
        assert_eq!(layout_card_width(500.0, 20.0, 0), 500.0);
    }
}
