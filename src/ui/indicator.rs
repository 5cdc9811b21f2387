//! Motion indicator: a small spinner + driver label in the top-right
//! corner of the carousel stage while the carousel is moving.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use arc_carousel::core::controller::DriverMode;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct MotionIndicator {
    pub mode: DriverMode,
    /// Frame counter driving the spinner.
    pub tick: u64,
}

impl Widget for MotionIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.mode == DriverMode::Idle || area.width < 16 || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {frame} {} ", self.mode.label());
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 1);

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        buf.set_line(x, area.y, &line, label_width);
    }
}
