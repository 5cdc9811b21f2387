//! End-to-end gesture scenarios driven through the deterministic frame queue.

use std::time::Duration;

use arc_carousel::config::CarouselConfig;
use arc_carousel::core::controller::{CarouselController, DriverMode, GestureEnd};
use arc_carousel::core::item::{showcase_items, CarouselItem};
use arc_carousel::core::metrics::SurfaceGeometry;
use arc_carousel::core::scheduler::FrameQueue;
use arc_carousel::core::snap::SnapAlignment;
use pretty_assertions::assert_eq;

const FRAME: Duration = Duration::from_millis(16);
const STEP: f64 = 300.0;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn surface() -> SurfaceGeometry {
    SurfaceGeometry {
        viewport_width: 1200.0,
        card_width: 280.0,
        gap: 20.0,
    }
}

fn carousel_with(items: Vec<CarouselItem>, config: CarouselConfig) -> CarouselController<FrameQueue> {
    let mut c = CarouselController::new(items, config, FrameQueue::new());
    c.on_resize(surface());
    c
}

fn carousel() -> CarouselController<FrameQueue> {
    carousel_with(showcase_items(), CarouselConfig::default())
}

/// Run frames until nothing is scheduled; returns the final clock.
fn settle(c: &mut CarouselController<FrameQueue>, mut now: Duration) -> Duration {
    for _ in 0..2_000 {
        if !c.is_animating() {
            return now;
        }
        now += FRAME;
        c.run_frame(now);
    }
    panic!("carousel never settled (mode {:?})", c.mode());
}

fn assert_step_aligned(c: &CarouselController<FrameQueue>, step: f64) {
    let cards = (c.offset() - c.mid()) / step;
    assert!(
        (cards - cards.round()).abs() < 1e-6,
        "offset {} is not on a rest position",
        c.offset()
    );
}

#[test]
fn flick_glides_then_snaps_to_rest() {
    let mut c = carousel();
    let start = c.offset();

    c.on_drag_start(1, 500.0, ms(0));
    for i in 1..=5u64 {
        c.on_drag_move(1, 500.0 + 30.0 * i as f64, ms(16 * i));
    }
    assert_eq!(c.offset(), start + 150.0);
    assert_eq!(c.on_drag_end(1, ms(80)), GestureEnd::Release);
    assert_eq!(c.mode(), DriverMode::Momentum);
    assert_eq!(c.velocity(), 30.0);

    let mut now = ms(80);
    let mut glide_ticks = 0;
    while c.mode() == DriverMode::Momentum {
        now += FRAME;
        c.run_frame(now);
        glide_ticks += 1;
    }
    assert_eq!(glide_ticks, c.config().momentum.ticks_to_rest(30.0));
    assert_eq!(c.mode(), DriverMode::Snapping);

    settle(&mut c, now);
    assert_eq!(c.mode(), DriverMode::Idle);
    assert_eq!(c.velocity(), 0.0);
    assert!(c.scheduler().is_idle());
    assert!(c.offset() > start);
    assert_step_aligned(&c, STEP);
}

#[test]
fn slow_release_snaps_without_gliding() {
    let mut c = carousel();
    c.on_drag_start(1, 500.0, ms(0));
    c.on_drag_move(1, 320.0, ms(100));
    c.on_drag_end(1, ms(400));
    assert_eq!(c.mode(), DriverMode::Snapping);

    settle(&mut c, ms(400));
    assert_eq!(c.offset(), c.mid() - STEP);
}

#[test]
fn wheel_velocity_is_clamped() {
    let mut c = carousel();
    for _ in 0..20 {
        c.on_wheel(0.0, 500.0);
    }
    assert_eq!(c.mode(), DriverMode::Momentum);
    let limit = c.config().velocity_limit * STEP;
    assert!((c.velocity() + limit).abs() < 1e-9);
    // Every event reuses the single pending tick.
    assert_eq!(c.scheduler().pending(), 1);

    settle(&mut c, ms(0));
    assert_step_aligned(&c, STEP);
}

#[test]
fn drag_interrupts_momentum() {
    let mut c = carousel();
    c.on_wheel(0.0, 100.0);
    c.run_frame(FRAME);
    assert_eq!(c.mode(), DriverMode::Momentum);

    c.on_drag_start(1, 600.0, FRAME * 2);
    assert_eq!(c.mode(), DriverMode::Dragging);
    assert_eq!(c.velocity(), 0.0);
    assert!(c.scheduler().is_idle());

    // Wheel events while the pointer is captured are ignored.
    let held = c.offset();
    c.on_wheel(0.0, 300.0);
    assert_eq!(c.offset(), held);
    assert_eq!(c.mode(), DriverMode::Dragging);
}

#[test]
fn cancelled_tick_is_never_applied() {
    let mut c = carousel();
    c.on_wheel(0.0, 100.0);
    let handles = c.scheduler_mut().take_due();
    assert_eq!(handles.len(), 1);

    c.shutdown();
    let rest = c.offset();
    assert!(!c.on_tick(handles[0], FRAME));
    assert_eq!(c.offset(), rest);
    assert_eq!(c.mode(), DriverMode::Idle);
}

#[test]
fn long_drag_wraps_seamlessly() {
    let mut c = carousel();
    let stride = c.metrics().unwrap().stride;
    let mid = c.mid();

    c.on_drag_start(1, 0.0, ms(0));
    let mut before = c.frame();
    for i in 1..=400u64 {
        c.on_drag_move(1, -(i as f64) * 25.0, ms(16 * i));
        assert!((c.offset() - mid).abs() <= 1.25 * stride + 25.0);
        let after = c.frame();
        // Whatever card was nearest the center moved by exactly one
        // pointer delta, even across a rewrap.
        let nearest = |cards: &[arc_carousel::core::projector::ProjectedCard]| {
            cards
                .iter()
                .map(|card| card.dx)
                .filter(|dx| *dx > -300.0 && *dx <= 0.0)
                .fold(f64::NAN, f64::max)
        };
        let (a, b) = (nearest(&before), nearest(&after));
        let moved = (b - a + 25.0).rem_euclid(STEP);
        assert!(moved < 1e-6 || STEP - moved < 1e-6, "jump at move {i}");
        before = after;
    }
}

#[test]
fn focus_is_one_or_two_cards() {
    for alignment in [SnapAlignment::Card, SnapAlignment::Split] {
        let config = CarouselConfig {
            alignment,
            ..CarouselConfig::default()
        };
        let mut c = carousel_with(showcase_items(), config);
        c.on_drag_start(1, 0.0, ms(0));
        for i in 0..120u64 {
            c.on_drag_move(1, i as f64 * 7.3, ms(16 * i));
            let focused = c.focused().len();
            assert!((1..=2).contains(&focused), "{focused} focused at move {i}");
        }
    }

    let mut c = carousel_with(
        showcase_items(),
        CarouselConfig {
            alignment: SnapAlignment::Card,
            ..CarouselConfig::default()
        },
    );
    assert_eq!(c.focused().len(), 1);
    c.set_items(showcase_items());
    assert_eq!(c.activate_focused().map(|i| i.id.as_str()), Some("1"));
}

#[test]
fn single_item_is_static() {
    let mut items = showcase_items();
    items.truncate(1);
    let mut c = carousel_with(items, CarouselConfig::default());

    let frame = c.frame();
    assert_eq!(frame.len(), 1);
    assert!(frame[0].is_focused);
    assert_eq!(frame[0].dx, 0.0);

    let rest = c.offset();
    c.on_wheel(0.0, 400.0);
    assert_eq!(c.mode(), DriverMode::Idle);

    c.on_drag_start(1, 100.0, ms(0));
    c.on_drag_move(1, 400.0, ms(16));
    assert_eq!(c.offset(), rest);
    assert_eq!(c.on_drag_end(1, ms(20)), GestureEnd::Release);
    assert_eq!(c.mode(), DriverMode::Idle);
    assert!(c.scheduler().is_idle());
    assert_eq!(c.activate_at(600.0).map(|i| i.id.as_str()), Some("1"));
}

#[test]
fn resize_during_glide_lands_on_new_grid() {
    let mut c = carousel();
    c.on_wheel(0.0, 200.0);
    c.run_frame(FRAME);
    c.run_frame(FRAME * 2);

    c.on_resize(SurfaceGeometry {
        viewport_width: 900.0,
        card_width: 190.0,
        gap: 20.0,
    });
    assert_eq!(c.mode(), DriverMode::Momentum);
    assert_eq!(c.metrics().unwrap().step, 210.0);

    settle(&mut c, FRAME * 2);
    assert_eq!(c.mode(), DriverMode::Idle);
    assert_step_aligned(&c, 210.0);
}

#[test]
fn resize_during_snap_lands_on_new_grid() {
    let mut c = carousel();
    c.on_drag_start(1, 500.0, ms(0));
    c.on_drag_move(1, 320.0, ms(100));
    c.on_drag_end(1, ms(400));
    assert_eq!(c.mode(), DriverMode::Snapping);
    c.run_frame(ms(416));
    assert_eq!(c.mode(), DriverMode::Snapping);

    c.on_resize(SurfaceGeometry {
        viewport_width: 900.0,
        card_width: 190.0,
        gap: 20.0,
    });
    assert_eq!(c.mode(), DriverMode::Snapping);
    let target = c.rest_target().unwrap();
    assert!((target - (c.mid() - 210.0)).abs() < 1e-9, "target {target}");

    settle(&mut c, ms(416));
    assert_eq!(c.mode(), DriverMode::Idle);
    assert_eq!(c.offset(), target);
    assert_step_aligned(&c, 210.0);
}

#[test]
fn losing_measurements_stops_motion() {
    let mut c = carousel();
    c.on_wheel(0.0, 100.0);
    c.on_resize(SurfaceGeometry::default());
    assert!(c.metrics().is_none());

    c.run_frame(FRAME);
    assert_eq!(c.mode(), DriverMode::Idle);
    assert!(c.frame().is_empty());
    assert!(c.scheduler().is_idle());
}

#[test]
fn empty_list_renders_nothing() {
    let mut c = carousel_with(Vec::new(), CarouselConfig::default());
    assert!(c.metrics().is_none());
    assert!(c.frame().is_empty());
    c.on_wheel(0.0, 100.0);
    c.on_drag_start(1, 10.0, ms(0));
    assert_eq!(c.mode(), DriverMode::Idle);
    assert!(c.activate_focused().is_none());
}
