use crate::api::axis_config::{DEFAULT_MAJOR_TICK_LENGTH_PX, DEFAULT_MINOR_TICK_LENGTH_PX};
use crate::api::{TickCollection, TickLabelConfig};
use crate::core::{Edge, PlotDimensions};
use crate::error::AxisResult;
use crate::render::{
    Color, FontSpec, RenderFrame, TextHAlign, TextMeasurer, TextPrimitive, TextVAlign,
    TickDirection, TickMarkPrimitive,
};

/// Gap between a ruler-mode tick and the label drawn beside it.
const RULER_LABEL_GAP_PX: f64 = 2.0;

/// Ticks, tick labels and the corner label of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTicks {
    edge: Edge,
    collection: TickCollection,
    pub config: TickLabelConfig,
    pub font: FontSpec,
    pub color: Color,
    pub show_major_ticks: bool,
    pub show_minor_ticks: bool,
    pub show_labels: bool,
    pub major_tick_length: f64,
    pub minor_tick_length: f64,
    pub tick_stroke_width: f64,
    /// Major ticks span the label block and labels sit beside them.
    pub ruler_mode: bool,
}

impl AxisTicks {
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            collection: TickCollection::new(edge),
            config: TickLabelConfig::default(),
            font: FontSpec::default(),
            color: Color::BLACK,
            show_major_ticks: true,
            show_minor_ticks: true,
            show_labels: true,
            major_tick_length: DEFAULT_MAJOR_TICK_LENGTH_PX,
            minor_tick_length: DEFAULT_MINOR_TICK_LENGTH_PX,
            tick_stroke_width: 1.0,
            ruler_mode: false,
        }
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub(crate) fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
        self.collection.set_edge(edge);
    }

    #[must_use]
    pub fn collection(&self) -> &TickCollection {
        &self.collection
    }

    pub(crate) fn recalculate<M: TextMeasurer + ?Sized>(
        &mut self,
        dims: &PlotDimensions,
        measurer: &M,
    ) -> AxisResult<()> {
        self.collection
            .recalculate(dims, &self.font, measurer, &self.config)
    }

    /// Space taken by labels perpendicular to the axis; zero when hidden.
    #[must_use]
    pub fn label_extent(&self) -> f64 {
        if !self.show_labels {
            return 0.0;
        }
        let size = self.collection.max_label_size();
        if self.edge.is_horizontal() {
            size.height
        } else {
            size.width * 1.2
        }
    }

    /// Major tick length counted in the axis size; zero when hidden.
    #[must_use]
    pub fn tick_extent(&self) -> f64 {
        if self.show_major_ticks {
            self.major_tick_length.max(0.0)
        } else {
            0.0
        }
    }

    pub(crate) fn append_to_frame(&self, dims: &PlotDimensions, frame: &mut RenderFrame) {
        let (anchor, direction) = axis_anchor(dims, self.edge);
        let major_length = if self.ruler_mode {
            self.major_tick_length + self.label_extent()
        } else {
            self.major_tick_length
        };

        if self.show_major_ticks && major_length > 0.0 {
            for tick in self.collection.major_ticks() {
                frame.draw_tick(self.tick_mark(tick.pixel, anchor, direction, major_length));
            }
        }
        if self.show_minor_ticks && self.minor_tick_length > 0.0 {
            for tick in self.collection.minor_ticks() {
                frame.draw_tick(self.tick_mark(
                    tick.pixel,
                    anchor,
                    direction,
                    self.minor_tick_length,
                ));
            }
        }
        if self.show_labels {
            self.append_labels(dims, anchor, frame);
        }
    }

    fn tick_mark(
        &self,
        pixel: f64,
        anchor: f64,
        direction: TickDirection,
        length: f64,
    ) -> TickMarkPrimitive {
        let (x, y) = if self.edge.is_horizontal() {
            (pixel, anchor)
        } else {
            (anchor, pixel)
        };
        TickMarkPrimitive {
            x,
            y,
            length,
            direction,
            stroke_width: self.tick_stroke_width,
            color: self.color,
        }
    }

    fn append_labels(&self, dims: &PlotDimensions, anchor: f64, frame: &mut RenderFrame) {
        let offset = self.tick_extent();
        let rotation = self.config.rotation_degrees;

        for tick in self.collection.major_ticks() {
            if tick.label.trim().is_empty() {
                continue;
            }
            let (x, y, h_align, v_align) = if self.ruler_mode {
                self.ruler_label_anchor(tick.pixel, anchor, offset)
            } else {
                self.label_anchor(tick.pixel, anchor, offset)
            };
            frame.draw_text(
                TextPrimitive::new(
                    tick.label.clone(),
                    x,
                    y,
                    self.font.clone(),
                    self.color,
                    h_align,
                )
                .with_v_align(v_align)
                .with_rotation(rotation),
            );
        }

        let corner = self.collection.corner_label();
        if !corner.trim().is_empty() {
            let (x, y, h_align, v_align) = match self.edge {
                Edge::Bottom => (
                    dims.data_right(),
                    anchor + offset + self.collection.max_label_size().height,
                    TextHAlign::Right,
                    TextVAlign::Top,
                ),
                Edge::Top => (
                    dims.data_right(),
                    anchor - offset - self.collection.max_label_size().height,
                    TextHAlign::Right,
                    TextVAlign::Bottom,
                ),
                Edge::Left => (anchor, dims.data_offset_y, TextHAlign::Right, TextVAlign::Bottom),
                Edge::Right => (anchor, dims.data_offset_y, TextHAlign::Left, TextVAlign::Bottom),
            };
            frame.draw_text(
                TextPrimitive::new(corner, x, y, self.font.clone(), self.color, h_align)
                    .with_v_align(v_align),
            );
        }
    }

    fn label_anchor(
        &self,
        pixel: f64,
        anchor: f64,
        offset: f64,
    ) -> (f64, f64, TextHAlign, TextVAlign) {
        match self.edge {
            Edge::Bottom => (pixel, anchor + offset, TextHAlign::Center, TextVAlign::Top),
            Edge::Top => (pixel, anchor - offset, TextHAlign::Center, TextVAlign::Bottom),
            Edge::Left => (anchor - offset, pixel, TextHAlign::Right, TextVAlign::Middle),
            Edge::Right => (anchor + offset, pixel, TextHAlign::Left, TextVAlign::Middle),
        }
    }

    fn ruler_label_anchor(
        &self,
        pixel: f64,
        anchor: f64,
        offset: f64,
    ) -> (f64, f64, TextHAlign, TextVAlign) {
        let gap = RULER_LABEL_GAP_PX;
        match self.edge {
            Edge::Bottom => (pixel + gap, anchor + offset, TextHAlign::Left, TextVAlign::Top),
            Edge::Top => (pixel + gap, anchor - offset, TextHAlign::Left, TextVAlign::Bottom),
            Edge::Left => (anchor - offset, pixel + gap, TextHAlign::Right, TextVAlign::Top),
            Edge::Right => (anchor + offset, pixel + gap, TextHAlign::Left, TextVAlign::Top),
        }
    }
}

/// Pixel coordinate of the axis line across the axis, and the outward
/// tick direction.
pub(crate) fn axis_anchor(dims: &PlotDimensions, edge: Edge) -> (f64, TickDirection) {
    match edge {
        Edge::Left => (dims.data_offset_x, TickDirection::Left),
        Edge::Right => (dims.data_right(), TickDirection::Right),
        Edge::Bottom => (dims.data_bottom(), TickDirection::Down),
        Edge::Top => (dims.data_offset_y, TickDirection::Up),
    }
}
