//! Layout helpers: split the terminal area into regions and convert
//! between terminal cells and carousel pixels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Horizontal pixels represented by one terminal column.
pub const CELL_PX: f64 = 8.0;
/// Vertical pixels represented by one terminal row (cells are ~2:1).
pub const ROW_PX: f64 = 16.0;

/// Primary screen layout: title header, carousel stage, caption of the
/// focused card(s) and a bottom status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    pub header_area: Rect,
    pub carousel_area: Rect,
    pub caption_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(6),    // carousel stage
                Constraint::Length(3), // caption
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            carousel_area: chunks[1],
            caption_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

/// Pixel x of the center of column `col`, relative to the left edge of
/// `area`.
pub fn column_to_px(area: Rect, col: u16) -> f64 {
    (col.saturating_sub(area.x) as f64 + 0.5) * CELL_PX
}

/// Column (absolute) holding pixel `px` of `area`.
pub fn px_to_column(area: Rect, px: f64) -> i32 {
    area.x as i32 + (px / CELL_PX).floor() as i32
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
