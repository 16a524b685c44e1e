use crate::error::{AxisError, AxisResult};
use crate::render::{LinePrimitive, TextPrimitive, TickMarkPrimitive};

/// Backend-agnostic draw commands for one axis render pass.
///
/// Commands are painted in insertion order within each list, and the lists in
/// the order ticks, texts, lines.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    pub tick_marks: Vec<TickMarkPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub lines: Vec<LinePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            tick_marks: Vec::new(),
            texts: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn draw_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn draw_tick(&mut self, tick: TickMarkPrimitive) {
        self.tick_marks.push(tick);
    }

    pub fn draw_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(AxisError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        for tick in &self.tick_marks {
            tick.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tick_marks.is_empty() && self.texts.is_empty() && self.lines.is_empty()
    }
}
