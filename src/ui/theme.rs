//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Card fill colours, cycled by item index.
const CARD_PALETTE: [(u8, u8, u8); 6] = [
    (64, 112, 168),
    (176, 58, 58),
    (196, 150, 64),
    (82, 140, 96),
    (124, 92, 164),
    (70, 150, 160),
];

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn card_fill(item: usize) -> (u8, u8, u8) {
        CARD_PALETTE[item % CARD_PALETTE.len()]
    }

    /// Darken an RGB colour towards the background by `1 - opacity`.
    pub fn shade((r, g, b): (u8, u8, u8), opacity: f64) -> Color {
        let k = opacity.clamp(0.0, 1.0);
        let f = |c: u8| (c as f64 * k).round() as u8;
        Color::Rgb(f(r), f(g), f(b))
    }

    pub fn card_border_style(focused: bool, opacity: f64) -> Style {
        if focused {
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::shade((160, 160, 160), opacity))
        }
    }

    pub fn card_title_style(focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn caption_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
