//! Project details overlay.
//!
//! Opened when a focused card is activated: artwork on top, title and
//! description below, navigation arrows on the side edges and a close
//! button on the border.

use std::sync::Arc;

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use arc_carousel::core::item::CarouselItem;

use super::halfblock;
use super::theme::Theme;

pub struct DetailsPopup<'a> {
    pub item: &'a CarouselItem,
    /// Position of `item` in the list, for the "2 / 4" indicator.
    pub index: usize,
    pub total: usize,
    pub thumbnail: Option<&'a Arc<RgbaImage>>,
}

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsHitZones {
    pub panel: Rect,
    pub close_rect: Rect,
    pub prev_rect: Rect,
    pub next_rect: Rect,
}

impl DetailsPopup<'_> {
    /// Centred panel covering ~70% of the terminal.
    pub fn panel_area(terminal: Rect) -> Rect {
        let margin_x = (terminal.width as f32 * 0.15).round() as u16;
        let margin_y = (terminal.height as f32 * 0.12).round() as u16;
        Rect::new(
            terminal.x + margin_x,
            terminal.y + margin_y,
            terminal.width.saturating_sub(margin_x * 2).max(24).min(terminal.width),
            terminal.height.saturating_sub(margin_y * 2).max(10).min(terminal.height),
        )
    }

    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, terminal_area: Rect, buf: &mut Buffer) -> DetailsHitZones {
        let area = Self::panel_area(terminal_area);
        Clear.render(area, buf);

        let title = format!(" {} · {}/{} ", self.item.title, self.index + 1, self.total);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let close_rect = Rect::new(area.x + area.width.saturating_sub(5), area.y, 3, 1);
        Paragraph::new(Line::from(Span::styled(
            "[X]",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )))
        .render(close_rect, buf);

        let arrow_y = area.y + area.height / 2;
        let prev_rect = Rect::new(area.x, arrow_y, 3, 1);
        let next_rect = Rect::new(area.x + area.width.saturating_sub(3), arrow_y, 3, 1);
        if self.total > 1 {
            let arrow = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            Paragraph::new(Line::from(Span::styled(" ◀", arrow))).render(prev_rect, buf);
            Paragraph::new(Line::from(Span::styled("▶ ", arrow))).render(next_rect, buf);
        }

        // Artwork takes the upper 60%, text the rest (minus the footer row).
        let art_h = (inner.height as f32 * 0.6).round() as u16;
        let art = Rect::new(
            inner.x.saturating_add(3),
            inner.y,
            inner.width.saturating_sub(6),
            art_h,
        );
        match self.thumbnail {
            Some(thumb) => halfblock::render_cover(thumb, art, 1.0, buf),
            None => {
                halfblock::render_fill(Theme::card_fill(self.index), art, 0.6, buf);
                Paragraph::new(Line::from(Span::styled("Loading…", Theme::dim_style())))
                    .centered()
                    .render(Rect::new(art.x, art.y + art.height / 2, art.width, 1), buf);
            }
        }

        let text_area = Rect::new(
            art.x,
            inner.y + art_h + 1,
            art.width,
            inner.height.saturating_sub(art_h + 2),
        );
        Paragraph::new(vec![
            Line::from(Span::styled(self.item.title.clone(), Theme::title_style())),
            Line::raw(""),
            Line::from(Span::raw(self.item.description.clone())),
        ])
        .wrap(Wrap { trim: true })
        .render(text_area, buf);

        let footer_y = inner.y + inner.height.saturating_sub(1);
        Paragraph::new(Line::from(Span::styled(
            " ←/→ previous/next   Esc close ",
            Theme::dim_style(),
        )))
        .render(Rect::new(inner.x, footer_y, inner.width, 1), buf);

        DetailsHitZones {
            panel: area,
            close_rect,
            prev_rect,
            next_rect,
        }
    }
}
