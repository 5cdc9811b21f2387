//! Carousel controller: the single owner of offset, velocity and driver
//! mode.
//!
//! Hosts push input through the command methods (`on_drag_*`, `on_wheel`,
//! `on_resize`) and deliver frame ticks through [`CarouselController::on_tick`];
//! they read the scene back with [`CarouselController::frame`].  At most one
//! tick is ever pending, and starting a new driver cancels it before taking
//! over, so two drivers can never write in the same frame.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::CarouselConfig;

use super::cycle;
use super::drag::{DragSession, PointerId};
use super::item::CarouselItem;
use super::metrics::{Metrics, SurfaceGeometry};
use super::momentum::clamp_velocity;
use super::projector::{project_track, ArcContext, ProjectedCard};
use super::scheduler::{FrameQueue, FrameScheduler, TickHandle};
use super::snap::{snap_target, SnapAlignment, SnapAnimation, SNAP_EPSILON};
use super::track::{build_track, required_copies, sanitize_copies, VirtualEntry};
use super::wheel;

/// Which driver currently owns the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverMode {
    #[default]
    Idle,
    Dragging,
    Momentum,
    Snapping,
}

impl DriverMode {
    pub fn label(self) -> &'static str {
        match self {
            DriverMode::Idle => "idle",
            DriverMode::Dragging => "dragging",
            DriverMode::Momentum => "momentum",
            DriverMode::Snapping => "snapping",
        }
    }
}

/// The active driver together with the state only it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Driver {
    Idle,
    Dragging(DragSession),
    Momentum,
    Snapping(SnapAnimation),
}

/// How a drag gesture ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// The pointer barely moved; the host may treat it as a click at `x`.
    Tap { x: f64 },
    /// A real drag; momentum or snapping has taken over.
    Release,
    /// No drag was active for this pointer.
    Ignored,
}

/// Infinite arc carousel state machine.
#[derive(Debug)]
pub struct CarouselController<S: FrameScheduler> {
    config: CarouselConfig,
    items: Vec<CarouselItem>,
    track: Vec<VirtualEntry>,
    copies: usize,
    surface: SurfaceGeometry,
    metrics: Option<Metrics>,
    offset: f64,
    velocity: f64,
    driver: Driver,
    scheduler: S,
    pending: Option<TickHandle>,
}

impl<S: FrameScheduler> CarouselController<S> {
    pub fn new(items: Vec<CarouselItem>, config: CarouselConfig, scheduler: S) -> Self {
        let copies = sanitize_copies(config.copies);
        Self {
            track: build_track(items.len(), copies),
            items,
            config,
            copies,
            surface: SurfaceGeometry::default(),
            metrics: None,
            offset: 0.0,
            velocity: 0.0,
            driver: Driver::Idle,
            scheduler,
            pending: None,
        }
    }

    // ── queries ─────────────────────────────────────────────────

    pub fn mode(&self) -> DriverMode {
        match self.driver {
            Driver::Idle => DriverMode::Idle,
            Driver::Dragging(_) => DriverMode::Dragging,
            Driver::Momentum => DriverMode::Momentum,
            Driver::Snapping(_) => DriverMode::Snapping,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn items(&self) -> &[CarouselItem] {
        &self.items
    }

    /// Copy count in use; may exceed the configured one for wide viewports.
    pub fn copies(&self) -> usize {
        self.copies
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// `true` while a momentum or snap tick is scheduled.
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Offset of the center-copy origin (0 until metrics are known).
    pub fn mid(&self) -> f64 {
        self.metrics.map_or(0.0, |m| m.mid(self.copies))
    }

    /// Where the carousel comes to rest: the running snap's target, or the
    /// nearest rest position to the current offset.
    pub fn rest_target(&self) -> Option<f64> {
        if let Driver::Snapping(anim) = self.driver {
            return Some(anim.target());
        }
        self.metrics
            .map(|m| snap_target(self.offset, self.mid(), m.step))
    }

    fn is_ready(&self) -> bool {
        self.metrics.is_some() && !self.items.is_empty()
    }

    /// A single card never moves.
    fn is_static(&self) -> bool {
        self.items.len() <= 1
    }

    fn alignment(&self) -> SnapAlignment {
        if self.is_static() {
            SnapAlignment::Card
        } else {
            self.config.alignment
        }
    }

    fn velocity_bound(&self, metrics: &Metrics) -> f64 {
        self.config.velocity_limit * metrics.step
    }

    // ── scene ───────────────────────────────────────────────────

    /// Project every visible card for the current offset.  Empty while not
    /// ready.
    pub fn frame(&self) -> Vec<ProjectedCard> {
        let Some(metrics) = self.metrics.as_ref() else {
            return Vec::new();
        };
        if self.items.is_empty() {
            return Vec::new();
        }
        let ctx = ArcContext {
            metrics,
            params: &self.config.arc,
            alignment: self.alignment(),
            mid: self.mid(),
        };
        project_track(self.offset, &self.track, &ctx)
    }

    /// Items of the focused cards, nearest first.
    pub fn focused(&self) -> Vec<&CarouselItem> {
        let mut cards: Vec<ProjectedCard> =
            self.frame().into_iter().filter(|c| c.is_focused).collect();
        cards.sort_by(|a, b| a.dx.abs().total_cmp(&b.dx.abs()));
        cards.iter().map(|c| &self.items[c.item]).collect()
    }

    /// The focused card under viewport coordinate `x` (0 = left edge), if
    /// any.  Unfocused cards are not activatable.
    pub fn activate_at(&self, x: f64) -> Option<&CarouselItem> {
        let metrics = self.metrics?;
        let center = metrics.viewport_width / 2.0;
        let hit = self
            .frame()
            .into_iter()
            .filter(|c| c.is_focused)
            .filter(|c| {
                let half = c.visual_width(metrics.card_width) / 2.0;
                (x - (center + c.screen_dx())).abs() <= half
            })
            .min_by(|a, b| a.dx.abs().total_cmp(&b.dx.abs()))?;
        let item = &self.items[hit.item];
        debug!(id = %item.id, "activate");
        Some(item)
    }

    /// The nearest focused card's item (keyboard activation).
    pub fn activate_focused(&self) -> Option<&CarouselItem> {
        self.focused().into_iter().next()
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Replace the item list.  Cancels any motion and recenters.
    pub fn set_items(&mut self, items: Vec<CarouselItem>) {
        self.cancel_pending();
        self.driver = Driver::Idle;
        self.velocity = 0.0;
        self.items = items;
        self.metrics = Metrics::resolve(self.surface, self.items.len());
        self.copies = self.effective_copies();
        self.track = build_track(self.items.len(), self.copies);
        self.offset = self.mid();
        debug!(items = self.items.len(), copies = self.copies, "item list replaced");
    }

    /// New surface measurement (mount or resize).
    ///
    /// The current mode is kept.  The offset (and the anchor of an active
    /// drag or snap) is rescaled around `mid` so the same card stays under
    /// the center line, then renormalized against the new stride.
    pub fn on_resize(&mut self, surface: SurfaceGeometry) {
        let previous = self.metrics;
        let previous_mid = self.mid();

        self.surface = surface;
        self.metrics = Metrics::resolve(surface, self.items.len());
        let copies = self.effective_copies();
        if copies != self.copies {
            self.copies = copies;
            self.track = build_track(self.items.len(), copies);
        }

        let Some(metrics) = self.metrics else {
            debug!("surface not measured yet");
            return;
        };
        let mid = self.mid();

        let Some(old) = previous else {
            // First measurement: start on the center copy.
            self.offset = mid;
            self.velocity = 0.0;
            debug!(step = metrics.step, stride = metrics.stride, "metrics ready");
            return;
        };

        let ratio = metrics.step / old.step;
        let remap = move |o: f64| mid + (o - previous_mid) * ratio;
        self.offset = remap(self.offset);
        self.velocity = clamp_velocity(self.velocity * ratio, self.velocity_bound(&metrics));
        match &mut self.driver {
            Driver::Dragging(session) => session.remap(remap),
            Driver::Snapping(anim) => anim.remap(remap),
            Driver::Idle | Driver::Momentum => {}
        }
        self.rewrap();

        if self.mode() == DriverMode::Idle {
            // Land exactly on a rest position under the new step.
            if let Some(target) = self.rest_target() {
                self.offset = target;
            }
        }
        debug!(step = metrics.step, mode = self.mode().label(), "resized");
    }

    /// Cancel any scheduled tick and stop all motion.
    pub fn shutdown(&mut self) {
        self.cancel_pending();
        self.driver = Driver::Idle;
        self.velocity = 0.0;
    }

    fn effective_copies(&self) -> usize {
        let configured = sanitize_copies(self.config.copies);
        let Some(metrics) = self.metrics else {
            return configured;
        };
        let required = required_copies(&metrics, self.config.velocity_limit);
        if required > configured {
            warn!(configured, required, "copy count too small for viewport; raising it");
            required
        } else {
            configured
        }
    }

    // ── drag ────────────────────────────────────────────────────

    /// Pointer down.  Always legal; interrupts momentum or snapping.
    pub fn on_drag_start(&mut self, pointer: PointerId, x: f64, now: Duration) {
        if !self.is_ready() {
            trace!("drag ignored: not ready");
            return;
        }
        self.cancel_pending();
        if self.mode() != DriverMode::Idle {
            debug!(from = self.mode().label(), "drag takes over");
        }
        self.velocity = 0.0;
        self.driver = Driver::Dragging(DragSession::begin(pointer, x, self.offset, now));
    }

    /// Pointer move for the captured pointer.
    pub fn on_drag_move(&mut self, pointer: PointerId, x: f64, now: Duration) {
        let frozen = self.is_static();
        let frame_ms = self.config.drag_frame_ms;
        let Driver::Dragging(session) = &mut self.driver else {
            return;
        };
        if session.pointer() != pointer {
            return;
        }
        let next = session.update(x, now, frame_ms);
        if frozen {
            return;
        }
        self.offset = next;
        self.rewrap();
    }

    /// Pointer up: hand over to momentum, or straight to snapping when the
    /// release was slow.
    pub fn on_drag_end(&mut self, pointer: PointerId, now: Duration) -> GestureEnd {
        let Driver::Dragging(session) = self.driver else {
            return GestureEnd::Ignored;
        };
        if session.pointer() != pointer {
            return GestureEnd::Ignored;
        }
        let outcome = if session.is_tap(self.config.tap_slop) {
            GestureEnd::Tap {
                x: session.last_x(),
            }
        } else {
            GestureEnd::Release
        };

        let Some(metrics) = self.metrics else {
            self.driver = Driver::Idle;
            return outcome;
        };
        let release = if self.is_static() {
            0.0
        } else {
            clamp_velocity(session.release_velocity(now), self.velocity_bound(&metrics))
        };

        if release.abs() < self.config.momentum.rest_velocity {
            self.velocity = 0.0;
            self.begin_snap(now);
        } else {
            debug!(velocity = release, "drag released into momentum");
            self.velocity = release;
            self.driver = Driver::Momentum;
            self.schedule();
        }
        outcome
    }

    /// Capture lost; handled exactly like a release.
    pub fn on_drag_cancel(&mut self, pointer: PointerId, now: Duration) -> GestureEnd {
        self.on_drag_end(pointer, now)
    }

    // ── wheel ───────────────────────────────────────────────────

    /// One wheel event.  Ignored while dragging.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64) {
        if matches!(self.driver, Driver::Dragging(_)) || self.is_static() {
            return;
        }
        let Some(metrics) = self.metrics else {
            return;
        };
        let impulse = wheel::impulse(delta_x, delta_y, metrics.step, &self.config.wheel);
        if impulse == 0.0 {
            return;
        }

        self.velocity = clamp_velocity(self.velocity + impulse, self.velocity_bound(&metrics));
        self.offset += impulse * self.config.wheel.nudge;

        if self.driver != Driver::Momentum {
            self.cancel_pending();
            debug!(from = self.mode().label(), impulse, "wheel starts momentum");
            self.driver = Driver::Momentum;
        }
        self.rewrap();
        if self.pending.is_none() {
            self.schedule();
        }
    }

    // ── frame loop ──────────────────────────────────────────────

    /// Deliver a scheduled tick.  Returns `true` when the offset advanced.
    ///
    /// Handles that are not the pending one (cancelled or superseded) are
    /// dropped.
    pub fn on_tick(&mut self, handle: TickHandle, now: Duration) -> bool {
        if self.pending != Some(handle) {
            trace!(handle = handle.id(), "stale tick dropped");
            return false;
        }
        self.pending = None;

        if !self.is_ready() {
            debug!("tick while not ready; stopping");
            self.driver = Driver::Idle;
            self.velocity = 0.0;
            return false;
        }

        match self.driver {
            Driver::Idle | Driver::Dragging(_) => false,
            Driver::Momentum => {
                let settled = self
                    .config
                    .momentum
                    .step(&mut self.velocity, &mut self.offset);
                self.rewrap();
                if settled {
                    self.begin_snap(now);
                } else {
                    self.schedule();
                }
                true
            }
            Driver::Snapping(anim) => {
                let (value, done) = anim.sample(now);
                self.offset = value;
                if done {
                    debug!(offset = value, "snap complete");
                    self.driver = Driver::Idle;
                } else {
                    self.schedule();
                }
                true
            }
        }
    }

    // ── internals ───────────────────────────────────────────────

    fn begin_snap(&mut self, now: Duration) {
        let Some(metrics) = self.metrics else {
            self.driver = Driver::Idle;
            return;
        };
        self.rewrap();
        let target = snap_target(self.offset, self.mid(), metrics.step);
        if (target - self.offset).abs() < SNAP_EPSILON {
            self.offset = target;
            self.driver = Driver::Idle;
            debug!(offset = target, "settled without animation");
            return;
        }
        debug!(from = self.offset, target, "snapping");
        self.driver = Driver::Snapping(SnapAnimation::new(
            self.offset,
            target,
            now,
            self.config.snap_duration,
        ));
        self.schedule();
    }

    /// Rewrap the offset into the safe band.  Skipped mid-snap: the snap
    /// target already lies inside the band.
    fn rewrap(&mut self) {
        let Some(metrics) = self.metrics else {
            return;
        };
        if matches!(self.driver, Driver::Snapping(_)) {
            return;
        }
        let wrapped = cycle::normalize(self.offset, self.mid(), metrics.stride);
        if wrapped != self.offset {
            let delta = wrapped - self.offset;
            trace!(from = self.offset, to = wrapped, "offset rewrapped");
            if let Driver::Dragging(session) = &mut self.driver {
                session.shift(delta);
            }
            self.offset = wrapped;
        }
    }

    fn schedule(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.request_tick());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
        }
    }
}

impl CarouselController<FrameQueue> {
    /// Deliver every tick due this frame.  Returns `true` when any of them
    /// advanced the offset.
    pub fn run_frame(&mut self, now: Duration) -> bool {
        let mut advanced = false;
        for handle in self.scheduler.take_due() {
            advanced |= self.on_tick(handle, now);
        }
        advanced
    }
}

impl<S: FrameScheduler> Drop for CarouselController<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
