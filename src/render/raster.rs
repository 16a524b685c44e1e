use tracing::trace;

use crate::error::{AxisError, AxisResult};
use crate::render::{
    Color, HeuristicTextMeasurer, LinePrimitive, RenderFrame, Renderer, TextHAlign,
    TextMeasurer, TextPrimitive,
};

const LINE_SAMPLE_STEP_PX: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterRenderStats {
    pub tick_marks_drawn: usize,
    pub texts_drawn: usize,
    pub lines_drawn: usize,
}

/// Pure software renderer painting solid coverage into an RGBA8 buffer.
///
/// Glyphs are not rasterized: each non-blank text line paints its measured
/// box. Pixel coverage is deterministic across platforms, which makes the
/// buffer usable for structural image assertions.
#[derive(Debug, Clone)]
pub struct RasterRenderer<M: TextMeasurer = HeuristicTextMeasurer> {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    background: Color,
    measurer: M,
    last_stats: RasterRenderStats,
}

impl RasterRenderer {
    pub fn new(width: u32, height: u32) -> AxisResult<Self> {
        Self::with_measurer(width, height, HeuristicTextMeasurer)
    }
}

impl<M: TextMeasurer> RasterRenderer<M> {
    pub fn with_measurer(width: u32, height: u32, measurer: M) -> AxisResult<Self> {
        if width == 0 || height == 0 {
            return Err(AxisError::InvalidDimensions {
                width: f64::from(width),
                height: f64::from(height),
            });
        }
        let background = Color::WHITE;
        let (width, height) = (width as usize, height as usize);
        Ok(Self {
            width,
            height,
            pixels: vec![background.to_rgba8(); width * height],
            background,
            measurer,
            last_stats: RasterRenderStats::default(),
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) -> AxisResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> RasterRenderStats {
        self.last_stats
    }

    /// Packed `0xRRGGBBAA` value at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Number of pixels differing from the background.
    #[must_use]
    pub fn painted_pixel_count(&self) -> usize {
        let background = self.background.to_rgba8();
        self.pixels.iter().filter(|&&pixel| pixel != background).count()
    }

    fn clear(&mut self) {
        let background = self.background.to_rgba8();
        self.pixels.fill(background);
    }

    /// Paints every pixel whose centre lies in `[left, right) x [top, bottom)`.
    fn fill_rect(&mut self, left: f64, top: f64, right: f64, bottom: f64, color: u32) {
        let to_index =
            |edge: f64, limit: usize| (edge - 0.5).ceil().clamp(0.0, limit as f64) as usize;
        let (x0, x1) = (to_index(left, self.width), to_index(right, self.width));
        let (y0, y1) = (to_index(top, self.height), to_index(bottom, self.height));
        for y in y0..y1 {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    fn draw_line(&mut self, line: &LinePrimitive) {
        let color = line.color.to_rgba8();
        let half = line.stroke_width.max(1.0) / 2.0;
        let (dx, dy) = (line.x2 - line.x1, line.y2 - line.y1);

        if dx == 0.0 || dy == 0.0 {
            self.fill_rect(
                line.x1.min(line.x2) - half,
                line.y1.min(line.y2) - half,
                line.x1.max(line.x2) + half,
                line.y1.max(line.y2) + half,
                color,
            );
            return;
        }

        let steps = (dx.hypot(dy) / LINE_SAMPLE_STEP_PX).ceil() as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let (x, y) = (line.x1 + dx * t, line.y1 + dy * t);
            self.fill_rect(x - half, y - half, x + half, y + half, color);
        }
    }

    fn draw_text(&mut self, text: &TextPrimitive) {
        let color = text.color.to_rgba8();
        let size = self.measurer.measure(&text.text, &text.font);
        let (left, top) = text.aligned_origin(size);
        let line_count = text.text.split('\n').count().max(1);
        let line_height = size.height / line_count as f64;
        let (sin, cos) = text.rotation_degrees.to_radians().sin_cos();

        for (index, line) in text.text.split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_width = self.measurer.measure(line, &text.font).width.min(size.width);
            if line_width <= 0.0 {
                continue;
            }
            let line_left = match text.h_align {
                TextHAlign::Left => left,
                TextHAlign::Center => left + (size.width - line_width) / 2.0,
                TextHAlign::Right => left + size.width - line_width,
            };
            let line_top = top + index as f64 * line_height;

            let corners = [
                (line_left, line_top),
                (line_left + line_width, line_top),
                (line_left, line_top + line_height),
                (line_left + line_width, line_top + line_height),
            ]
            .map(|(x, y)| {
                let (rx, ry) = (x - text.x, y - text.y);
                (text.x + rx * cos - ry * sin, text.y + rx * sin + ry * cos)
            });
            let (min_x, max_x) = corners
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| {
                    (lo.min(x), hi.max(x))
                });
            let (min_y, max_y) = corners
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                    (lo.min(y), hi.max(y))
                });
            self.fill_rect(min_x, min_y, max_x, max_y, color);
        }
    }
}

impl<M: TextMeasurer> Renderer for RasterRenderer<M> {
    fn render(&mut self, frame: &RenderFrame) -> AxisResult<()> {
        frame.validate()?;
        self.clear();

        let mut stats = RasterRenderStats::default();
        for tick in &frame.tick_marks {
            self.draw_line(&tick.as_line());
            stats.tick_marks_drawn += 1;
        }
        for text in &frame.texts {
            self.draw_text(text);
            stats.texts_drawn += 1;
        }
        for line in &frame.lines {
            self.draw_line(line);
            stats.lines_drawn += 1;
        }

        trace!(
            ticks = stats.tick_marks_drawn,
            texts = stats.texts_drawn,
            lines = stats.lines_drawn,
            "raster frame rendered"
        );
        self.last_stats = stats;
        Ok(())
    }
}
