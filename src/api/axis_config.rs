use serde::{Deserialize, Deserializer, Serialize};

use crate::core::label_format::{
    NumericLabelOptions, validate_date_time_format, validate_radix,
};
use crate::core::{AxisLabelLocale, DateTimeSpacing, NumericFormat};
use crate::error::{AxisError, AxisResult};
use crate::render::Color;

pub const DEFAULT_MAJOR_TICK_LENGTH_PX: f64 = 5.0;
pub const DEFAULT_MINOR_TICK_LENGTH_PX: f64 = 2.0;
pub const DEFAULT_PIXEL_SIZE_MINIMUM: f64 = 5.0;

/// Label and spacing settings consumed by each tick recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickLabelConfig {
    /// Interpret positions as unix seconds (UTC) and use calendar ticks.
    pub date_time: bool,
    pub use_multiplier_notation: bool,
    pub use_offset_notation: bool,
    pub use_exponential_notation: bool,
    pub invert_sign: bool,
    pub numeric_format: Option<NumericFormat>,
    pub radix: u32,
    pub prefix: String,
    /// chrono format string replacing the calendar unit's built-in label.
    pub date_time_format: Option<String>,
    pub date_time_spacing: Option<DateTimeSpacing>,
    pub locale: AxisLabelLocale,
    /// Distribute minor ticks logarithmically within each major step.
    pub minor_log_distribution: bool,
    pub snap_to_nearest_pixel: bool,
    /// Scales the number of ticks that fit the pixel span (`1.0` = default).
    pub tick_density: f64,
    /// Clockwise label rotation in degrees.
    pub rotation_degrees: f64,
}

impl Default for TickLabelConfig {
    fn default() -> Self {
        Self {
            date_time: false,
            use_multiplier_notation: false,
            use_offset_notation: false,
            use_exponential_notation: true,
            invert_sign: false,
            numeric_format: None,
            radix: 10,
            prefix: String::new(),
            date_time_format: None,
            date_time_spacing: None,
            locale: AxisLabelLocale::EnUs,
            minor_log_distribution: false,
            snap_to_nearest_pixel: true,
            tick_density: 1.0,
            rotation_degrees: 0.0,
        }
    }
}

impl TickLabelConfig {
    pub fn validate(&self) -> AxisResult<()> {
        validate_radix(self.radix)?;
        if let Some(pattern) = &self.date_time_format {
            validate_date_time_format(pattern)?;
        }
        if let Some(spacing) = self.date_time_spacing {
            spacing.validate()?;
        }
        validate_tick_density(self.tick_density)?;
        validate_rotation(self.rotation_degrees)
    }

    #[must_use]
    pub fn numeric_label_options(&self) -> NumericLabelOptions<'_> {
        NumericLabelOptions {
            use_multiplier_notation: self.use_multiplier_notation,
            use_offset_notation: self.use_offset_notation,
            use_exponential_notation: self.use_exponential_notation,
            invert_sign: self.invert_sign,
            format: self.numeric_format,
            radix: self.radix,
            prefix: &self.prefix,
            locale: self.locale,
        }
    }

    pub fn to_json_string(&self) -> AxisResult<String> {
        serde_json::to_string(self).map_err(|err| AxisError::Serialization(err.to_string()))
    }

    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        let config: Self =
            serde_json::from_str(input).map_err(|err| AxisError::Serialization(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Partial update applied by `Axis::configure`; absent options are untouched.
///
/// Empty `numeric_format_string` / `date_time_format_string` values clear the
/// corresponding custom format. `date_time_manual_spacing` distinguishes an
/// absent field from an explicit `null` (`Some(None)`), which clears it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisConfigureOptions {
    pub show_title: Option<bool>,
    pub show_labels: Option<bool>,
    pub show_major_ticks: Option<bool>,
    pub show_minor_ticks: Option<bool>,
    pub show_line: Option<bool>,
    pub color: Option<Color>,
    pub use_multiplier_notation: Option<bool>,
    pub use_offset_notation: Option<bool>,
    pub use_exponential_notation: Option<bool>,
    pub date_time: Option<bool>,
    pub ruler_mode: Option<bool>,
    pub invert_sign: Option<bool>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub rotation: Option<f64>,
    pub log_scale: Option<bool>,
    pub numeric_format_string: Option<String>,
    pub snap_to_nearest_pixel: Option<bool>,
    pub radix: Option<u32>,
    pub prefix: Option<String>,
    pub date_time_format_string: Option<String>,
    #[serde(
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_time_manual_spacing: Option<Option<DateTimeSpacing>>,
    pub locale: Option<AxisLabelLocale>,
    pub tick_density: Option<f64>,
}

/// Options that passed validation, with format strings already parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ValidatedFormats {
    pub(crate) numeric_format: Option<Option<NumericFormat>>,
    pub(crate) date_time_format: Option<Option<String>>,
}

impl AxisConfigureOptions {
    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        serde_json::from_str(input).map_err(|err| AxisError::Serialization(err.to_string()))
    }

    /// Checks every provided option without applying any of them.
    pub(crate) fn validate(&self) -> AxisResult<ValidatedFormats> {
        if let Some(radix) = self.radix {
            validate_radix(radix)?;
        }
        if let Some(color) = self.color {
            color
                .validate()
                .map_err(|err| AxisError::InvalidConfiguration(err.to_string()))?;
        }
        if let Some(name) = &self.font_name {
            if name.trim().is_empty() {
                return Err(AxisError::InvalidConfiguration(
                    "font name must not be empty".to_owned(),
                ));
            }
        }
        if let Some(size) = self.font_size {
            if !size.is_finite() || size <= 0.0 {
                return Err(AxisError::InvalidConfiguration(format!(
                    "font size must be finite and > 0, got {size}"
                )));
            }
        }
        if let Some(rotation) = self.rotation {
            validate_rotation(rotation)?;
        }
        if let Some(density) = self.tick_density {
            validate_tick_density(density)?;
        }
        if let Some(Some(spacing)) = self.date_time_manual_spacing {
            spacing.validate()?;
        }

        let numeric_format = match self.numeric_format_string.as_deref() {
            None => None,
            Some(pattern) if pattern.trim().is_empty() => Some(None),
            Some(pattern) => Some(Some(pattern.parse::<NumericFormat>()?)),
        };
        let date_time_format = match self.date_time_format_string.as_deref() {
            None => None,
            Some(pattern) if pattern.is_empty() => Some(None),
            Some(pattern) => {
                validate_date_time_format(pattern)?;
                Some(Some(pattern.to_owned()))
            }
        };

        Ok(ValidatedFormats {
            numeric_format,
            date_time_format,
        })
    }
}

// Only called for fields present in the input, so `null` becomes `Some(None)`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_tick_density(density: f64) -> AxisResult<()> {
    if !density.is_finite() || density <= 0.0 {
        return Err(AxisError::InvalidConfiguration(format!(
            "tick density must be finite and > 0, got {density}"
        )));
    }
    Ok(())
}

fn validate_rotation(rotation: f64) -> AxisResult<()> {
    if !rotation.is_finite() {
        return Err(AxisError::InvalidConfiguration(
            "label rotation must be finite".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{AxisConfigureOptions, TickLabelConfig};
    use crate::core::NumericFormat;
    use crate::error::AxisError;

    #[test]
    fn json_options_parse_partial_sets() {
        let options = AxisConfigureOptions::from_json_str(
            r#"{"show_title": false, "radix": 16, "numeric_format_string": "F3"}"#,
        )
        .expect("options");
        assert_eq!(options.show_title, Some(false));
        assert_eq!(options.radix, Some(16));
        assert_eq!(options.show_line, None);

        let formats = options.validate().expect("valid");
        assert_eq!(formats.numeric_format, Some(Some(NumericFormat::Fixed(3))));
        assert_eq!(formats.date_time_format, None);
    }

    #[test]
    fn unknown_option_is_a_serialization_error() {
        let err = AxisConfigureOptions::from_json_str(r#"{"show_grid": true}"#)
            .expect_err("unknown field");
        assert!(matches!(err, AxisError::Serialization(_)));
    }

    #[test]
    fn empty_format_string_clears_custom_format() {
        let options = AxisConfigureOptions {
            numeric_format_string: Some(String::new()),
            ..AxisConfigureOptions::default()
        };
        let formats = options.validate().expect("valid");
        assert_eq!(formats.numeric_format, Some(None));
    }

    #[test]
    fn tick_config_survives_json() {
        let config = TickLabelConfig {
            date_time: true,
            prefix: "0x".to_owned(),
            ..TickLabelConfig::default()
        };
        let json = config.to_json_string().expect("serialize");
        assert_eq!(TickLabelConfig::from_json_str(&json).expect("parse"), config);
    }

    #[test]
    fn invalid_radix_in_persisted_config_is_rejected() {
        let err = TickLabelConfig::from_json_str(r#"{"radix": 40}"#).expect_err("radix");
        assert!(matches!(err, AxisError::InvalidConfiguration(_)));
    }
}
