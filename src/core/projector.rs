//! Arc projector: maps a card's flat position onto a circular arc in x-z
//! space and applies perspective, so outer cards recede, tilt and fade.
//!
//! The projection uses the exact arcsine (`θ = asin(dx / R)`) rather than
//! the small-angle `θ = dx / R`; the clamp to `±0.94·R` keeps the argument
//! inside the domain of `asin`.
//!
//! Everything here is pure: the same offset, entry and context always give
//! the same result, and the offset is only read through
//! [`phase`](super::cycle::phase).

use super::cycle::phase;
use super::metrics::Metrics;
use super::snap::SnapAlignment;
use super::track::VirtualEntry;

/// Shape of the arc and the falloff bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Arc radius as a multiple of the viewport width.
    pub radius_multiplier: f64,
    /// Lower bound on the radius, in steps, so narrow viewports still curve
    /// gently.
    pub min_radius_steps: f64,
    /// Perspective depth as a multiple of the viewport width.
    pub perspective_multiplier: f64,
    /// Lower bound on the perspective depth, in pixels.
    pub perspective_floor: f64,
    /// `dx` is clamped to `±edge_clamp · R` before taking the arcsine.
    pub edge_clamp: f64,
    /// Fraction of the arc angle turned into card rotation (`<= 1`).
    pub rotation_intensity: f64,
    /// Vertical lift per unit of depth.
    pub lift: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    pub scale_min: f64,
    pub scale_max: f64,
    /// The runner-up card shares focus when it is at most this many steps
    /// further from center than the nearest card.
    pub focus_pair_tolerance: f64,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            radius_multiplier: 0.92,
            min_radius_steps: 3.6,
            perspective_multiplier: 1.25,
            perspective_floor: 980.0,
            edge_clamp: 0.94,
            rotation_intensity: 0.86,
            lift: 0.055,
            opacity_min: 0.45,
            opacity_max: 1.0,
            scale_min: 0.85,
            scale_max: 1.0,
            focus_pair_tolerance: 0.25,
        }
    }
}

impl ArcParams {
    /// Arc radius `R` for the given metrics.  Always positive.
    pub fn radius(&self, metrics: &Metrics) -> f64 {
        (metrics.viewport_width * self.radius_multiplier)
            .max(metrics.step * self.min_radius_steps)
            .max(metrics.step)
    }

    /// Perspective depth `D`; never shallower than the viewport is wide.
    pub fn perspective_depth(&self, metrics: &Metrics) -> f64 {
        (metrics.viewport_width * self.perspective_multiplier)
            .max(self.perspective_floor)
            .max(metrics.viewport_width)
    }
}

/// Everything the projector reads besides the offset.  A snapshot for the
/// duration of one frame.
#[derive(Debug, Clone, Copy)]
pub struct ArcContext<'a> {
    pub metrics: &'a Metrics,
    pub params: &'a ArcParams,
    pub alignment: SnapAlignment,
    /// Offset of the center-copy origin.
    pub mid: f64,
}

/// Transform of one card for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedCard {
    pub virtual_index: usize,
    /// Index into the item list.
    pub item: usize,
    /// Flat distance of the card center from the viewport center.
    pub dx: f64,
    /// Horizontal parallax correction added to the flat position.
    pub x: f64,
    /// Vertical lift (negative = up).
    pub y: f64,
    /// Depth behind the viewport plane.
    pub z: f64,
    pub rotation_deg: f64,
    pub opacity: f64,
    pub scale: f64,
    pub is_focused: bool,
}

impl ProjectedCard {
    /// On-screen center relative to the viewport center.
    pub fn screen_dx(&self) -> f64 {
        self.dx + self.x
    }

    /// Painted width of a card laid out `card_width` wide: scaled, then
    /// foreshortened by the cosine of its rotation.
    pub fn visual_width(&self, card_width: f64) -> f64 {
        card_width * self.scale * self.rotation_deg.to_radians().cos().abs()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Flat distance from the viewport center for a virtual entry.
pub fn card_dx(offset: f64, virtual_index: usize, ctx: &ArcContext<'_>) -> f64 {
    let m = ctx.metrics;
    virtual_index as f64 * m.step
        + ctx.mid
        + phase(offset, ctx.mid, m.stride)
        + ctx.alignment.shift(m.step)
}

/// Project one card.  Focus is decided across the whole frame by
/// [`mark_focus`], so the returned card is never focused.
pub fn project(offset: f64, entry: VirtualEntry, ctx: &ArcContext<'_>) -> ProjectedCard {
    let dx = card_dx(offset, entry.virtual_index, ctx);
    project_dx(dx, entry, ctx)
}

fn project_dx(dx: f64, entry: VirtualEntry, ctx: &ArcContext<'_>) -> ProjectedCard {
    let params = ctx.params;
    let radius = params.radius(ctx.metrics);
    let depth = params.perspective_depth(ctx.metrics);

    let limit = radius * params.edge_clamp;
    let clamped = dx.clamp(-limit, limit);
    let theta = (clamped / radius).asin();
    let z = radius * (1.0 - theta.cos());
    let perspective = depth / (depth - z).max(1.0);

    let max_theta = params.edge_clamp.asin();
    let t = if max_theta > 0.0 {
        (theta.abs() / max_theta).clamp(0.0, 1.0)
    } else {
        0.0
    };

    ProjectedCard {
        virtual_index: entry.virtual_index,
        item: entry.item,
        dx,
        x: clamped * perspective - dx,
        y: -z * params.lift,
        z,
        rotation_deg: -theta.to_degrees() * params.rotation_intensity,
        opacity: lerp(params.opacity_max, params.opacity_min, t)
            .clamp(params.opacity_min, params.opacity_max),
        scale: lerp(params.scale_max, params.scale_min, t)
            .clamp(params.scale_min, params.scale_max),
        is_focused: false,
    }
}

/// Mark the nearest card focused, and the runner-up as well when it is
/// within `pair_tolerance` pixels of the nearest one.
pub fn mark_focus(cards: &mut [ProjectedCard], pair_tolerance: f64) {
    for card in cards.iter_mut() {
        card.is_focused = false;
    }
    let mut order: Vec<usize> = (0..cards.len()).collect();
    order.sort_by(|&a, &b| cards[a].dx.abs().total_cmp(&cards[b].dx.abs()));

    let Some(&nearest) = order.first() else {
        return;
    };
    cards[nearest].is_focused = true;
    if let Some(&runner_up) = order.get(1) {
        if cards[runner_up].dx.abs() - cards[nearest].dx.abs() <= pair_tolerance {
            cards[runner_up].is_focused = true;
        }
    }
}

/// Project every entry whose card can be seen in the viewport (with one
/// card of margin on each side) and mark focus.
///
/// A single-item list renders exactly one static card at the center.
pub fn project_track(
    offset: f64,
    track: &[VirtualEntry],
    ctx: &ArcContext<'_>,
) -> Vec<ProjectedCard> {
    let m = ctx.metrics;
    if track.is_empty() {
        return Vec::new();
    }
    if m.item_count <= 1 {
        let entry = track[track.len() / 2];
        let mut card = project_dx(0.0, entry, ctx);
        card.is_focused = true;
        return vec![card];
    }

    let reach = m.viewport_width / 2.0 + m.card_width + m.step;
    let mut cards: Vec<ProjectedCard> = track
        .iter()
        .map(|&entry| project(offset, entry, ctx))
        .filter(|card| card.dx.abs() <= reach)
        .collect();
    mark_focus(&mut cards, ctx.params.focus_pair_tolerance * m.step);
    cards
}
