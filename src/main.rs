//! An infinite, physics-driven arc carousel in the terminal.
//!
//! Drag with the mouse, scroll the wheel or use `←`/`→` to browse; click a
//! focused card or press `Enter` to open its details.  Run with
//! `--write-config` to persist the effective tuning knobs.

mod app;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use arc_carousel::config::CarouselConfig;
use arc_carousel::core::item::showcase_items;
use arc_carousel::core::snap::SnapAlignment;

use crate::app::{
    event::{frame_period, spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
    thumbnails::{self, ThumbnailLoaded},
};
use crate::ui::{
    carousel_widget::CarouselWidget, debug_overlay::DebugOverlay, details::DetailsPopup,
    indicator::MotionIndicator, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Infinite 3D-arc carousel")]
struct Cli {
    /// Directory card artwork paths are resolved against.
    #[arg(long, default_value = "public")]
    assets: PathBuf,

    /// Arc radius as a multiple of the viewport width.
    #[arg(long)]
    radius: Option<f64>,

    /// Perspective depth as a multiple of the viewport width.
    #[arg(long)]
    perspective: Option<f64>,

    /// Momentum decay per tick.
    #[arg(long)]
    decay: Option<f64>,

    /// Copies of the item list on the virtual track (odd, >= 3).
    #[arg(long)]
    copies: Option<usize>,

    /// Snap animation length in milliseconds.
    #[arg(long = "snap-ms")]
    snap_ms: Option<u64>,

    /// Cards laid out across the viewport.
    #[arg(long)]
    visible: Option<usize>,

    /// What rests on the center line: `card` or `split`.
    #[arg(long)]
    alignment: Option<SnapAlignment>,

    /// Frame rate of the animation loop.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Start with the debug overlay shown.
    #[arg(long)]
    debug: bool,

    /// Save the effective configuration and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut CarouselConfig) {
        if let Some(radius) = self.radius {
            config.arc.radius_multiplier = radius;
        }
        if let Some(perspective) = self.perspective {
            config.arc.perspective_multiplier = perspective;
        }
        if let Some(decay) = self.decay {
            config.momentum.decay = decay;
        }
        if let Some(copies) = self.copies {
            config.copies = copies;
        }
        if let Some(ms) = self.snap_ms {
            config.snap_duration = Duration::from_millis(ms);
        }
        if let Some(visible) = self.visible {
            config.visible_cards = visible;
        }
        if let Some(alignment) = self.alignment {
            config.alignment = alignment;
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    state.sync_terminal_area(frame.area());
    let layout = state.layout();

    let header = Line::from(vec![
        Span::styled(" Selected work ", Theme::title_style()),
        Span::styled(
            format!("· {} projects", state.carousel.items().len()),
            Theme::dim_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), layout.header_area);

    let cards = state.carousel.frame();
    match state.carousel.metrics() {
        Some(metrics) => frame.render_widget(
            CarouselWidget {
                cards: &cards,
                items: state.carousel.items(),
                metrics,
                thumbnails: &state.thumbnails,
            },
            layout.carousel_area,
        ),
        None => frame.render_widget(
            Paragraph::new(Span::styled("  nothing to show", Theme::dim_style())),
            layout.carousel_area,
        ),
    }
    frame.render_widget(
        MotionIndicator {
            mode: state.carousel.mode(),
            tick: state.frame_count,
        },
        layout.carousel_area,
    );

    let focused = state.carousel.focused();
    let titles: Vec<&str> = focused.iter().map(|item| item.title.as_str()).collect();
    let mut caption = vec![Line::from(Span::styled(titles.join("  ·  "), Theme::title_style()))];
    if let Some(first) = focused.first() {
        caption.push(Line::from(Span::styled(
            first.description.clone(),
            Theme::caption_style(),
        )));
    }
    frame.render_widget(
        Paragraph::new(caption).centered().wrap(Wrap { trim: true }),
        layout.caption_area,
    );

    let hint = "←/→ scroll  drag swipe  Enter open  d debug  q quit";
    let status = state.status_message.as_deref().unwrap_or(hint);
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );

    if state.show_debug {
        frame.render_widget(
            DebugOverlay {
                carousel: &state.carousel,
            },
            layout.carousel_area,
        );
    }

    state.details_hit_zones = match state.active_view {
        ActiveView::Details(index) => state.carousel.items().get(index).map(|item| {
            DetailsPopup {
                item,
                index,
                total: state.carousel.items().len(),
                thumbnail: state.thumbnails.get(&item.image_ref),
            }
            .render_and_hit(frame.area(), frame.buffer_mut())
        }),
        ActiveView::Carousel => None,
    };
}

// ───────────────────────────────────────── thumbnails ────────

fn request_thumbnails(state: &mut AppState, tx: &mpsc::UnboundedSender<ThumbnailLoaded>) {
    state.thumbnail_generation = state.thumbnail_generation.wrapping_add(1);
    state.thumbnails.clear();
    for item in state.carousel.items() {
        let path = thumbnails::resolve(&state.asset_root, &item.image_ref);
        thumbnails::spawn_thumbnail_decode(
            tx.clone(),
            state.thumbnail_generation,
            item.image_ref.clone(),
            path,
        );
    }
}

fn apply_thumbnail(state: &mut AppState, loaded: ThumbnailLoaded) {
    if loaded.generation != state.thumbnail_generation {
        return;
    }
    match loaded.result {
        Ok(image) => {
            state.thumbnails.insert(loaded.image_ref, Arc::new(image));
        }
        // Missing artwork is normal outside the site checkout; the card
        // keeps its placeholder fill.
        Err(err) => debug!(image_ref = %loaded.image_ref, "artwork unavailable: {err:#}"),
    }
}

// ───────────────────────────────────────── main ─────────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    fps: u32,
) -> Result<()> {
    let mut events = spawn_event_reader(frame_period(fps));
    let (thumb_tx, mut thumb_rx) = mpsc::unbounded_channel::<ThumbnailLoaded>();
    request_thumbnails(state, &thumb_tx);

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize => {}
                    AppEvent::Frame => {
                        state.frame_count = state.frame_count.wrapping_add(1);
                        let now = state.now();
                        state.carousel.run_frame(now);
                    }
                }
            }

            Some(loaded) = thumb_rx.recv() => {
                apply_thumbnail(state, loaded);
                while let Ok(more) = thumb_rx.try_recv() {
                    apply_thumbnail(state, more);
                }
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    state.carousel.shutdown();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI owns stdout; logs go to stderr (redirect it to keep them).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CarouselConfig::load();
    cli.apply(&mut config);
    config.validate()?;

    if cli.write_config {
        let path = config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let mut state = AppState::new(showcase_items(), config, cli.assets.clone());
    state.show_debug = cli.debug;
    info!(fps = cli.fps, assets = %cli.assets.display(), "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state, cli.fps).await;

    // ── teardown (also after an error) ─────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
