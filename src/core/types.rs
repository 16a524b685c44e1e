use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Side of the data area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Edge {
    Left,
    Right,
    #[default]
    Bottom,
    Top,
}

impl Edge {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
}

/// Closed data-space interval. Date axes use unix seconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    pub min: f64,
    pub max: f64,
}

impl DataRange {
    /// Builds a range, swapping reversed bounds.
    pub fn new(a: f64, b: f64) -> AxisResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(AxisError::InvalidData(
                "data range bounds must be finite".to_owned(),
            ));
        }
        Ok(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Relative position of `value` inside the range; `0.5` when degenerate.
    #[must_use]
    pub fn fraction(self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.5
        } else if span.is_finite() {
            (value - self.min) / span
        } else {
            // Halve first so ranges wider than f64::MAX still map.
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.span() == 0.0
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Data-space limits of both plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub x: DataRange,
    pub y: DataRange,
}

impl AxisLimits {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> AxisResult<Self> {
        Ok(Self {
            x: DataRange::new(x_min, x_max)?,
            y: DataRange::new(y_min, y_max)?,
        })
    }
}

/// Pixel extent of a rendered string or box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// Geometry of one plot: figure size, data-area rectangle and axis limits.
///
/// The data area is where ticks are mapped to; axes are laid out in the margin
/// between the data area and the figure edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotDimensions {
    pub figure_width: f64,
    pub figure_height: f64,
    pub data_width: f64,
    pub data_height: f64,
    pub data_offset_x: f64,
    pub data_offset_y: f64,
    pub limits: AxisLimits,
}

impl PlotDimensions {
    pub fn new(
        figure_size: (f64, f64),
        data_size: (f64, f64),
        data_offset: (f64, f64),
        limits: AxisLimits,
    ) -> AxisResult<Self> {
        let dims = Self {
            figure_width: figure_size.0,
            figure_height: figure_size.1,
            data_width: data_size.0,
            data_height: data_size.1,
            data_offset_x: data_offset.0,
            data_offset_y: data_offset.1,
            limits,
        };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> AxisResult<()> {
        for (width, height) in [
            (self.figure_width, self.figure_height),
            (self.data_width, self.data_height),
        ] {
            if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
                return Err(AxisError::InvalidDimensions { width, height });
            }
        }
        if !self.data_offset_x.is_finite() || !self.data_offset_y.is_finite() {
            return Err(AxisError::InvalidData(
                "data area offset must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    /// Pixel span along the axis attached to `edge`.
    #[must_use]
    pub fn pixel_span(&self, edge: Edge) -> f64 {
        if edge.is_horizontal() {
            self.data_width
        } else {
            self.data_height
        }
    }

    /// Data range mapped along the axis attached to `edge`.
    #[must_use]
    pub fn data_range(&self, edge: Edge) -> DataRange {
        if edge.is_horizontal() {
            self.limits.x
        } else {
            self.limits.y
        }
    }

    #[must_use]
    pub fn data_right(&self) -> f64 {
        self.data_offset_x + self.data_width
    }

    #[must_use]
    pub fn data_bottom(&self) -> f64 {
        self.data_offset_y + self.data_height
    }

    /// Maps a data-space position to a pixel along the axis attached to `edge`.
    ///
    /// Vertical axes grow upwards. A zero-width range maps every position to
    /// the centre of the data area.
    #[must_use]
    pub fn position_to_pixel(&self, position: f64, edge: Edge) -> f64 {
        let span_px = self.pixel_span(edge);
        let fraction = self.data_range(edge).fraction(position);
        if edge.is_vertical() {
            self.data_offset_y + span_px - fraction * span_px
        } else {
            self.data_offset_x + fraction * span_px
        }
    }
}
