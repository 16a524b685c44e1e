use crate::core::TextSize;
use crate::render::FontSpec;

/// Ratio between one text line's height and the font pixel size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

const BOLD_WIDTH_RATIO: f64 = 1.1;

/// Measures the pixel extent of (possibly multi-line) label text.
///
/// Tick layout only needs sizes, so measurement is kept separate from drawing
/// and can be served by a backend font engine or by a deterministic estimate.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
        (**self).measure(text, font)
    }
}

/// Backend-independent measurer using per-glyph width classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> TextSize {
        let line_count = text.split('\n').count();
        let width = text
            .split('\n')
            .map(|line| estimate_line_width_px(line, font))
            .fold(0.0, f64::max);
        TextSize::new(width, line_count as f64 * line_height_px(font))
    }
}

#[must_use]
pub fn line_height_px(font: &FontSpec) -> f64 {
    font.size_px * LINE_HEIGHT_RATIO
}

/// Deterministic width estimate of one text line; blank lines measure zero.
#[must_use]
pub fn estimate_line_width_px(line: &str, font: &FontSpec) -> f64 {
    if line.trim().is_empty() {
        return 0.0;
    }
    let units = line.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' | '/' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    let width = (units * font.size_px).max(font.size_px);
    if font.bold {
        width * BOLD_WIDTH_RATIO
    } else {
        width
    }
}

#[cfg(test)]
mod tests {
    use super::{HeuristicTextMeasurer, TextMeasurer};
    use crate::render::FontSpec;

    #[test]
    fn multi_line_text_uses_widest_line_and_stacks_heights() {
        let font = FontSpec::new("Sans", 10.0);
        let single = HeuristicTextMeasurer.measure("2024", &font);
        let double = HeuristicTextMeasurer.measure("2024\n ", &font);
        assert_eq!(single.width, double.width);
        assert_eq!(double.height, 2.0 * single.height);
    }

    #[test]
    fn bold_text_is_wider() {
        let font = FontSpec::new("Sans", 10.0);
        let regular = HeuristicTextMeasurer.measure("12:00", &font);
        let bold = HeuristicTextMeasurer.measure("12:00", &font.clone().bold());
        assert!(bold.width > regular.width);
    }
}
