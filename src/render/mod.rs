mod frame;
mod null_renderer;
mod primitives;
mod raster;
pub mod text_measure;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, FontSpec, LinePrimitive, TextHAlign, TextPrimitive, TextVAlign, TickDirection,
    TickMarkPrimitive,
};
pub use raster::{RasterRenderStats, RasterRenderer};
pub use text_measure::{HeuristicTextMeasurer, TextMeasurer};

use crate::error::AxisResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from tick generation and layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> AxisResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{
    CairoContextRenderer, CairoRenderStats, CairoRenderer, PangoTextMeasurer,
};
