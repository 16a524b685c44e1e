use crate::core::{Edge, PlotDimensions};
use crate::render::{Color, LinePrimitive, RenderFrame};

/// Line along the data-area edge the axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    edge: Edge,
    pub visible: bool,
    pub color: Color,
    pub width: f64,
}

impl AxisLine {
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            visible: true,
            color: Color::BLACK,
            width: 1.0,
        }
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub(crate) fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    pub(crate) fn append_to_frame(&self, dims: &PlotDimensions, frame: &mut RenderFrame) {
        if !self.visible || self.width <= 0.0 {
            return;
        }
        let (left, top) = (dims.data_offset_x, dims.data_offset_y);
        let (right, bottom) = (dims.data_right(), dims.data_bottom());
        let (x1, y1, x2, y2) = match self.edge {
            Edge::Left => (left, top, left, bottom),
            Edge::Right => (right, top, right, bottom),
            Edge::Bottom => (left, bottom, right, bottom),
            Edge::Top => (left, top, right, top),
        };
        frame.draw_line(LinePrimitive::new(x1, y1, x2, y2, self.width, self.color));
    }
}
