//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use image::RgbaImage;
use ratatui::layout::Rect;
use tracing::debug;

use arc_carousel::config::CarouselConfig;
use arc_carousel::core::controller::CarouselController;
use arc_carousel::core::item::CarouselItem;
use arc_carousel::core::metrics::{layout_card_width, SurfaceGeometry};
use arc_carousel::core::scheduler::FrameQueue;

use crate::ui::details::DetailsHitZones;
use crate::ui::layout::{AppLayout, CELL_PX};

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Carousel,
    /// Details popup for the item at this index.
    Details(usize),
}

/// Top-level application state.
pub struct AppState {
    pub carousel: CarouselController<FrameQueue>,
    /// Controls the main event loop.
    pub should_quit: bool,
    pub active_view: ActiveView,
    /// Show the controller-state overlay.
    pub show_debug: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last known terminal area, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Surface last reported to the carousel.
    surface: SurfaceGeometry,
    /// Decoded artwork keyed by `image_ref`.  Filled asynchronously.
    pub thumbnails: HashMap<String, Arc<RgbaImage>>,
    /// Directory `image_ref`s are resolved against.
    pub asset_root: PathBuf,
    /// Bumped whenever the item list changes; stale decodes are dropped.
    pub thumbnail_generation: u64,
    pub details_hit_zones: Option<DetailsHitZones>,
    /// Frame counter (drives the motion spinner).
    pub frame_count: u64,
    started: Instant,
}

impl AppState {
    pub fn new(items: Vec<CarouselItem>, config: CarouselConfig, asset_root: PathBuf) -> Self {
        Self {
            carousel: CarouselController::new(items, config, FrameQueue::new()),
            should_quit: false,
            active_view: ActiveView::default(),
            show_debug: false,
            status_message: None,
            terminal_area: Rect::default(),
            surface: SurfaceGeometry::default(),
            thumbnails: HashMap::new(),
            asset_root,
            thumbnail_generation: 0,
            details_hit_zones: None,
            frame_count: 0,
            started: Instant::now(),
        }
    }

    /// Monotonic timestamp handed to the carousel.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    /// Record the terminal size and report the stage geometry to the
    /// carousel when it changed.
    pub fn sync_terminal_area(&mut self, area: Rect) {
        self.terminal_area = area;
        let stage = self.layout().carousel_area;
        let config = self.carousel.config();
        let viewport_width = stage.width as f64 * CELL_PX;
        let surface = SurfaceGeometry {
            viewport_width,
            card_width: layout_card_width(viewport_width, config.gap, config.visible_cards),
            gap: config.gap,
        };
        if surface != self.surface {
            debug!(?surface, "stage resized");
            self.surface = surface;
            self.carousel.on_resize(surface);
        }
    }

    /// Open the details popup for the item with `id`.
    pub fn open_details(&mut self, id: &str) {
        if let Some(index) = self.carousel.items().iter().position(|i| i.id == id) {
            debug!(id, "details opened");
            self.active_view = ActiveView::Details(index);
            self.status_message = None;
        }
    }

    pub fn close_details(&mut self) {
        self.active_view = ActiveView::Carousel;
        self.details_hit_zones = None;
    }

    /// Step the details popup by `delta` items, wrapping around.
    pub fn step_details(&mut self, delta: isize) {
        let ActiveView::Details(index) = self.active_view else {
            return;
        };
        let n = self.carousel.items().len() as isize;
        if n == 0 {
            return;
        }
        let next = (index as isize + delta).rem_euclid(n) as usize;
        self.active_view = ActiveView::Details(next);
    }
}
