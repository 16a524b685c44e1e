use cairo::{Context, Format, ImageSurface};
use pango::{FontDescription, Layout, Weight};

use crate::core::TextSize;
use crate::error::{AxisError, AxisResult};
use crate::render::{
    Color, FontSpec, LinePrimitive, RenderFrame, Renderer, TextHAlign, TextMeasurer,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub tick_marks_drawn: usize,
    pub texts_drawn: usize,
    pub lines_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> AxisResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
///
/// The drawing context is created per render call and dropped when the call
/// returns, on success and on failure alike.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> AxisResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(AxisError::InvalidDimensions {
                width: f64::from(width),
                height: f64::from(height),
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> AxisResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> AxisResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for tick in &frame.tick_marks {
            stroke_line(context, &tick.as_line())?;
            stats.tick_marks_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(context, text)?;
            stats.texts_drawn += 1;
        }

        for line in &frame.lines {
            stroke_line(context, line)?;
            stats.lines_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> AxisResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> AxisResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Measures text with Pango on a scratch 1x1 image surface.
#[derive(Debug)]
pub struct PangoTextMeasurer {
    context: Context,
}

impl PangoTextMeasurer {
    pub fn new() -> AxisResult<Self> {
        let surface = ImageSurface::create(Format::ARgb32, 1, 1)
            .map_err(|err| map_backend_error("failed to create measuring surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create measuring context", err))?;
        Ok(Self { context })
    }
}

impl TextMeasurer for PangoTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
        let layout = build_layout(&self.context, text, font);
        let (width, height) = layout.pixel_size();
        TextSize::new(f64::from(width), f64::from(height))
    }
}

fn build_layout(context: &Context, text: &str, font: &FontSpec) -> Layout {
    let layout = pangocairo::functions::create_layout(context);
    let mut description = FontDescription::new();
    description.set_family(&font.family);
    description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
    if font.bold {
        description.set_weight(Weight::Bold);
    }
    layout.set_font_description(Some(&description));
    layout.set_text(text);
    layout
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> AxisResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) -> AxisResult<()> {
    let layout = build_layout(context, &text.text, &text.font);
    layout.set_alignment(match text.h_align {
        TextHAlign::Left => pango::Alignment::Left,
        TextHAlign::Center => pango::Alignment::Center,
        TextHAlign::Right => pango::Alignment::Right,
    });
    let (width, height) = layout.pixel_size();
    let (left, top) = text.aligned_origin(TextSize::new(f64::from(width), f64::from(height)));

    context
        .save()
        .map_err(|err| map_backend_error("failed to save cairo state", err))?;
    context.translate(text.x, text.y);
    context.rotate(text.rotation_degrees.to_radians());
    apply_color(context, text.color);
    context.move_to(left - text.x, top - text.y);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore cairo state", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> AxisError {
    AxisError::InvalidData(format!("{prefix}: {err}"))
}
