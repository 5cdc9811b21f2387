//! Carousel stage widget: paints the projected cards back to front.
//!
//! The projection is computed in pixels; the widget maps it onto terminal
//! cells with [`CELL_PX`] / [`ROW_PX`].  A card's painted width is its
//! scaled width foreshortened by the cosine of its rotation, which is how a
//! card turned about its vertical axis reads in a flat terminal.

use std::collections::HashMap;
use std::sync::Arc;

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use arc_carousel::core::item::CarouselItem;
use arc_carousel::core::metrics::Metrics;
use arc_carousel::core::projector::ProjectedCard;

use super::halfblock;
use super::layout::{px_to_column, CELL_PX, ROW_PX};
use super::theme::Theme;

/// Fraction of the stage height a full-scale card occupies.
const CARD_HEIGHT_RATIO: f64 = 0.82;

pub struct CarouselWidget<'a> {
    pub cards: &'a [ProjectedCard],
    pub items: &'a [CarouselItem],
    pub metrics: &'a Metrics,
    /// Decoded artwork keyed by `image_ref`.
    pub thumbnails: &'a HashMap<String, Arc<RgbaImage>>,
}

/// Cell rectangle a projected card covers inside `area`, before clipping.
/// Returned as signed `(x, y, width, height)` so cards hanging off the
/// stage edges keep their true geometry.
pub fn card_cells(card: &ProjectedCard, metrics: &Metrics, area: Rect) -> (i32, i32, i32, i32) {
    let center_px = metrics.viewport_width / 2.0 + card.screen_dx();
    let width_px = card.visual_width(metrics.card_width);
    let width = (width_px / CELL_PX).round().max(3.0) as i32;
    let left = px_to_column(area, center_px - width_px / 2.0);

    let height = ((area.height as f64 * CARD_HEIGHT_RATIO * card.scale).round() as i32).max(3);
    let lift = (card.y / ROW_PX).round() as i32;
    let top = area.y as i32 + (area.height as i32 - height) / 2 + lift;
    (left, top, width, height)
}

fn clip((x, y, w, h): (i32, i32, i32, i32), area: Rect) -> Option<Rect> {
    let x0 = x.max(area.x as i32);
    let y0 = y.max(area.y as i32);
    let x1 = (x + w).min(area.x as i32 + area.width as i32);
    let y1 = (y + h).min(area.y as i32 + area.height as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Deepest first so nearer cards overdraw the ones behind them.
        let mut order: Vec<&ProjectedCard> = self.cards.iter().collect();
        order.sort_by(|a, b| b.z.total_cmp(&a.z));

        for card in order {
            let Some(item) = self.items.get(card.item) else {
                continue;
            };
            let Some(rect) = clip(card_cells(card, self.metrics, area), area) else {
                continue;
            };
            render_card(card, item, self.thumbnails, rect, buf);
        }
    }
}

fn render_card(
    card: &ProjectedCard,
    item: &CarouselItem,
    thumbnails: &HashMap<String, Arc<RgbaImage>>,
    rect: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if card.is_focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Theme::card_border_style(card.is_focused, card.opacity));
    let inner = block.inner(rect);
    block.render(rect, buf);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let art = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    match thumbnails.get(&item.image_ref) {
        Some(thumb) => halfblock::render_cover(thumb, art, card.opacity, buf),
        None => halfblock::render_fill(Theme::card_fill(card.item), art, card.opacity, buf),
    }

    let title_row = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    Paragraph::new(Line::from(Span::styled(
        item.title.clone(),
        Theme::card_title_style(card.is_focused),
    )))
    .centered()
    .render(title_row, buf);
}
