//! Input handling: maps key/mouse events to carousel commands and view
//! changes.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use arc_carousel::core::controller::GestureEnd;
use arc_carousel::core::drag::PointerId;

use crate::ui::layout::{column_to_px, point_in_rect};

use super::state::{ActiveView, AppState};

/// The terminal has a single mouse.
pub const MOUSE_POINTER: PointerId = 1;

/// Wheel delta (px) reported for one notch or one arrow key press.
pub const WHEEL_NOTCH_PX: f64 = 100.0;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Carousel => handle_carousel_key(state, key),
        ActiveView::Details(_) => handle_details_key(state, key),
    }
}

fn handle_carousel_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => state.carousel.on_wheel(-WHEEL_NOTCH_PX, 0.0),
        KeyCode::Right | KeyCode::Char('l') => state.carousel.on_wheel(WHEEL_NOTCH_PX, 0.0),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let id = state.carousel.activate_focused().map(|item| item.id.clone());
            if let Some(id) = id {
                state.open_details(&id);
            }
        }
        KeyCode::Char('d') => state.show_debug = !state.show_debug,
        _ => {}
    }
}

fn handle_details_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => state.close_details(),
        KeyCode::Left | KeyCode::Char('h') => state.step_details(-1),
        KeyCode::Right | KeyCode::Char('l') => state.step_details(1),
        _ => {}
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match state.active_view {
        ActiveView::Carousel => handle_carousel_mouse(state, mouse),
        ActiveView::Details(_) => handle_details_mouse(state, mouse),
    }
}

fn handle_carousel_mouse(state: &mut AppState, mouse: MouseEvent) {
    let stage = state.layout().carousel_area;
    let now = state.now();
    let x = column_to_px(stage, mouse.column);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(stage, mouse.column, mouse.row) {
                state.status_message = None;
                state.carousel.on_drag_start(MOUSE_POINTER, x, now);
            }
        }
        // The terminal keeps reporting drags outside the stage; that is
        // pointer capture.
        MouseEventKind::Drag(MouseButton::Left) => {
            state.carousel.on_drag_move(MOUSE_POINTER, x, now);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let GestureEnd::Tap { x } = state.carousel.on_drag_end(MOUSE_POINTER, now) {
                let id = state.carousel.activate_at(x).map(|item| item.id.clone());
                match id {
                    Some(id) => state.open_details(&id),
                    None => {
                        debug!(x, "tap missed the focused cards");
                        state.status_message =
                            Some("Only the highlighted cards open; drag or scroll to bring one forward".into());
                    }
                }
            }
        }
        MouseEventKind::ScrollDown => state.carousel.on_wheel(0.0, WHEEL_NOTCH_PX),
        MouseEventKind::ScrollUp => state.carousel.on_wheel(0.0, -WHEEL_NOTCH_PX),
        MouseEventKind::ScrollRight => state.carousel.on_wheel(WHEEL_NOTCH_PX, 0.0),
        MouseEventKind::ScrollLeft => state.carousel.on_wheel(-WHEEL_NOTCH_PX, 0.0),
        _ => {}
    }
}

fn handle_details_mouse(state: &mut AppState, mouse: MouseEvent) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let Some(zones) = state.details_hit_zones else {
        return;
    };
    let (col, row) = (mouse.column, mouse.row);
    if point_in_rect(zones.close_rect, col, row) || !point_in_rect(zones.panel, col, row) {
        state.close_details();
    } else if point_in_rect(zones.prev_rect, col, row) {
        state.step_details(-1);
    } else if point_in_rect(zones.next_rect, col, row) {
        state.step_details(1);
    }
}
