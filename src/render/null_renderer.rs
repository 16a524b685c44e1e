use crate::error::AxisResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless layout.
///
/// It still validates frame content so tests can catch invalid geometry
/// without a raster backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_tick_count: usize,
    pub last_text_count: usize,
    pub last_line_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> AxisResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_tick_count = frame.tick_marks.len();
        self.last_text_count = frame.texts.len();
        self.last_line_count = frame.lines.len();
        Ok(())
    }
}
