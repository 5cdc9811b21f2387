//! Half-block image renderer (`▀`, two pixels per cell).
//!
//! Terminal cells are roughly twice as tall as they are wide, so each cell
//! carries one pixel column and two pixel rows: the upper pixel in the
//! foreground colour, the lower one in the background colour.

use image::imageops::FilterType;
use image::RgbaImage;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;

use super::theme::Theme;

/// Scale `thumb` to cover `area` (cropping the overflow, centred) and paint
/// it, darkened by `opacity`.  Nothing is drawn for empty areas or images.
pub fn render_cover(thumb: &RgbaImage, area: Rect, opacity: f64, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 || thumb.width() == 0 || thumb.height() == 0 {
        return;
    }

    let target_w = area.width as f64;
    let target_h = area.height as f64 * 2.0;
    let src_w = thumb.width() as f64;
    let src_h = thumb.height() as f64;

    let scale = (target_w / src_w).max(target_h / src_h);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;
    let rgba = image::imageops::resize(thumb, fit_w, fit_h, FilterType::Triangle);

    let crop_x = fit_w.saturating_sub(area.width as u32) / 2;
    let crop_y = fit_h.saturating_sub(area.height as u32 * 2) / 2;
    let pixel = |x: u32, y: u32| -> Option<Color> {
        let (px, py) = (x + crop_x, y + crop_y);
        if px < rgba.width() && py < rgba.height() {
            let p = rgba.get_pixel(px, py);
            Some(Theme::shade((p[0], p[1], p[2]), opacity))
        } else {
            None
        }
    };

    for row in 0..area.height {
        let yt = row as u32 * 2;
        for col in 0..area.width {
            let Some(fg) = pixel(col as u32, yt) else {
                continue;
            };
            let bg = pixel(col as u32, yt + 1).unwrap_or(Color::Reset);
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// Fill `area` with a flat colour (placeholder while artwork loads or when
/// it is missing).
pub fn render_fill(rgb: (u8, u8, u8), area: Rect, opacity: f64, buf: &mut Buffer) {
    let colour = Theme::shade(rgb, opacity);
    for row in area.y..area.y.saturating_add(area.height) {
        for col in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut(Position::new(col, row)) {
                cell.set_char(' ').set_bg(colour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_fills_every_cell() {
        let img = RgbaImage::from_pixel(40, 10, image::Rgba([255, 0, 0, 255]));
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        render_cover(&img, area, 1.0, &mut buf);
        for row in 0..4 {
            for col in 0..6 {
                let cell = &buf[(col, row)];
                assert_eq!(cell.symbol(), "▀");
                assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
            }
        }
    }

    #[test]
    fn fill_is_dimmed() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        render_fill((100, 200, 50), area, 0.5, &mut buf);
        assert_eq!(buf[(1, 0)].bg, Color::Rgb(50, 100, 25));
    }
}
