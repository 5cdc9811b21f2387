//! Debug overlay: live controller state in the bottom-left corner of the
//! stage (`d` toggles it).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use arc_carousel::core::controller::CarouselController;
use arc_carousel::core::scheduler::FrameScheduler;

use super::theme::Theme;

pub struct DebugOverlay<'a, S: FrameScheduler> {
    pub carousel: &'a CarouselController<S>,
}

impl<S: FrameScheduler> DebugOverlay<'_, S> {
    fn lines(&self) -> Vec<Line<'static>> {
        let c = self.carousel;
        let mut lines = vec![
            Line::raw(format!("mode     {}", c.mode().label())),
            Line::raw(format!("offset   {:.1}", c.offset())),
            Line::raw(format!("velocity {:.2}", c.velocity())),
            Line::raw(format!("mid      {:.1}", c.mid())),
            Line::raw(format!("copies   {}", c.copies())),
        ];
        match c.metrics() {
            Some(m) => {
                lines.push(Line::raw(format!("step     {:.1}", m.step)));
                lines.push(Line::raw(format!("stride   {:.1}", m.stride)));
            }
            None => lines.push(Line::raw("metrics  not ready")),
        }
        lines
    }
}

impl<S: FrameScheduler> Widget for DebugOverlay<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = (lines.len() as u16 + 2).min(area.height);
        let width = 24.min(area.width);
        if height < 3 || width < 10 {
            return;
        }
        let rect = Rect::new(area.x, area.y + area.height - height, width, height);
        Clear.render(rect, buf);
        let block = Block::default()
            .title(" debug ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());
        let inner = block.inner(rect);
        block.render(rect, buf);
        Paragraph::new(lines).style(Theme::caption_style()).render(inner, buf);
    }
}
