use serde::{Deserialize, Serialize};

use crate::core::TextSize;
use crate::error::{AxisError, AxisResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> AxisResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AxisError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Packs the color as `0xRRGGBBAA`.
    #[must_use]
    pub fn to_rgba8(self) -> u32 {
        let channel = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.red) << 24)
            | (channel(self.green) << 16)
            | (channel(self.blue) << 8)
            | channel(self.alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Font used for measuring and drawing one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
    #[serde(default)]
    pub bold: bool,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(AxisError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if self.family.trim().is_empty() {
            return Err(AxisError::InvalidData(
                "font family must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Sans", 12.0)
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(AxisError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(AxisError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Direction a tick mark extends from its anchor on the axis line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Draw command for one tick mark anchored on the axis line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMarkPrimitive {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub direction: TickDirection,
    pub stroke_width: f64,
    pub color: Color,
}

impl TickMarkPrimitive {
    /// Segment `(x1, y1, x2, y2)` covered by the mark.
    #[must_use]
    pub fn endpoints(&self) -> (f64, f64, f64, f64) {
        let (dx, dy) = match self.direction {
            TickDirection::Up => (0.0, -self.length),
            TickDirection::Down => (0.0, self.length),
            TickDirection::Left => (-self.length, 0.0),
            TickDirection::Right => (self.length, 0.0),
        };
        (self.x, self.y, self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn as_line(&self) -> LinePrimitive {
        let (x1, y1, x2, y2) = self.endpoints();
        LinePrimitive::new(x1, y1, x2, y2, self.stroke_width, self.color)
    }

    pub fn validate(self) -> AxisResult<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(AxisError::InvalidData(
                "tick mark length must be finite and > 0".to_owned(),
            ));
        }
        self.as_line().validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVAlign {
    Top,
    Middle,
    Bottom,
}

/// Draw command for one (possibly multi-line) label in pixel space.
///
/// The text box is aligned on `(x, y)` and then rotated clockwise by
/// `rotation_degrees` around that anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontSpec,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    pub rotation_degrees: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font: FontSpec,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            color,
            h_align,
            v_align: TextVAlign::Top,
            rotation_degrees: 0.0,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_degrees: f64) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    /// Top-left corner of the unrotated text box of `size`.
    #[must_use]
    pub fn aligned_origin(&self, size: TextSize) -> (f64, f64) {
        let left = match self.h_align {
            TextHAlign::Left => self.x,
            TextHAlign::Center => self.x - size.width / 2.0,
            TextHAlign::Right => self.x - size.width,
        };
        let top = match self.v_align {
            TextVAlign::Top => self.y,
            TextVAlign::Middle => self.y - size.height / 2.0,
            TextVAlign::Bottom => self.y - size.height,
        };
        (left, top)
    }

    pub fn validate(&self) -> AxisResult<()> {
        if self.text.trim().is_empty() {
            return Err(AxisError::InvalidData(
                "text primitive must not be blank".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_degrees.is_finite() {
            return Err(AxisError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        self.font.validate()?;
        self.color.validate()
    }
}
