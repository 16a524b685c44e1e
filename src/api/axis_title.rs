use crate::core::{Edge, PlotDimensions, TextSize};
use crate::render::{
    Color, FontSpec, RenderFrame, TextHAlign, TextMeasurer, TextPrimitive, TextVAlign,
};

/// Axis title drawn at the outer edge of the space reserved for the axis.
///
/// Vertical axes rotate the title a quarter turn so it reads along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    edge: Edge,
    pub label: String,
    pub font: FontSpec,
    pub color: Color,
    pub visible: bool,
}

impl AxisTitle {
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            label: String::new(),
            font: FontSpec::new("Sans", 16.0).bold(),
            color: Color::BLACK,
            visible: true,
        }
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub(crate) fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    fn is_drawn(&self) -> bool {
        self.visible && !self.label.trim().is_empty()
    }

    /// Extent across the axis; zero when hidden or empty.
    #[must_use]
    pub fn thickness<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> f64 {
        self.size(measurer).height
    }

    /// Unrotated measured size of the title; zero when hidden or empty.
    #[must_use]
    pub fn size<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> TextSize {
        if self.is_drawn() {
            measurer.measure(&self.label, &self.font)
        } else {
            TextSize::default()
        }
    }

    pub(crate) fn append_to_frame(
        &self,
        dims: &PlotDimensions,
        axis_pixel_size: f64,
        frame: &mut RenderFrame,
    ) {
        if !self.is_drawn() {
            return;
        }
        let centre_x = dims.data_offset_x + dims.data_width / 2.0;
        let centre_y = dims.data_offset_y + dims.data_height / 2.0;

        let (x, y, v_align, rotation) = match self.edge {
            Edge::Bottom => (
                centre_x,
                dims.data_bottom() + axis_pixel_size,
                TextVAlign::Bottom,
                0.0,
            ),
            Edge::Top => (
                centre_x,
                dims.data_offset_y - axis_pixel_size,
                TextVAlign::Top,
                0.0,
            ),
            Edge::Left => (
                dims.data_offset_x - axis_pixel_size,
                centre_y,
                TextVAlign::Top,
                -90.0,
            ),
            Edge::Right => (
                dims.data_right() + axis_pixel_size,
                centre_y,
                TextVAlign::Top,
                90.0,
            ),
        };

        frame.draw_text(
            TextPrimitive::new(
                self.label.clone(),
                x,
                y,
                self.font.clone(),
                self.color,
                TextHAlign::Center,
            )
            .with_v_align(v_align)
            .with_rotation(rotation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::AxisTitle;
    use crate::core::{AxisLimits, Edge, PlotDimensions};
    use crate::render::{HeuristicTextMeasurer, RenderFrame};

    #[test]
    fn vertical_titles_are_rotated() {
        let limits = AxisLimits::new(0.0, 1.0, 0.0, 1.0).expect("limits");
        let dims =
            PlotDimensions::new((200.0, 200.0), (100.0, 100.0), (50.0, 50.0), limits).expect("dims");
        let mut title = AxisTitle::new(Edge::Left);
        title.label = "Price".to_owned();

        let mut frame = RenderFrame::new(200.0, 200.0);
        title.append_to_frame(&dims, 40.0, &mut frame);
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].rotation_degrees, -90.0);
        assert_eq!(frame.texts[0].x, 10.0);
    }

    #[test]
    fn empty_title_takes_no_space() {
        let title = AxisTitle::new(Edge::Bottom);
        assert_eq!(title.thickness(&HeuristicTextMeasurer), 0.0);
    }
}
