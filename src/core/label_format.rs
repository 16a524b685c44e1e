use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Locale preset used by tick label formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisLabelLocale {
    #[default]
    EnUs,
    EsEs,
}

impl AxisLabelLocale {
    #[must_use]
    pub fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }

    #[must_use]
    pub fn group_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }

    /// `strftime` pattern for a calendar date.
    #[must_use]
    pub fn date_pattern(self) -> &'static str {
        match self {
            Self::EnUs => "%Y-%m-%d",
            Self::EsEs => "%d/%m/%Y",
        }
    }

    /// Abbreviated month name for a 1-based month.
    #[must_use]
    pub fn month_abbreviation(self, month: u32) -> &'static str {
        const EN: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        const ES: [&str; 12] = [
            "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
        ];
        let index = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::EnUs => EN[index],
            Self::EsEs => ES[index],
        }
    }
}

/// Numeric tick label format parsed from a compact format string
/// (`"F2"`, `"E3"`, `"N0"`, `"P1"`, `"G"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericFormat {
    /// Fixed-point with the given number of decimals.
    Fixed(u8),
    /// Scientific notation with the given number of mantissa decimals.
    Exponential(u8),
    /// Fixed-point with group separators.
    Number(u8),
    /// Value times 100 followed by a percent sign.
    Percent(u8),
    /// Shortest representation, optionally limited to significant digits.
    General(Option<u8>),
}

impl NumericFormat {
    const MAX_PRECISION: u8 = 15;

    #[must_use]
    pub fn format(self, value: f64, locale: AxisLabelLocale) -> String {
        if !value.is_finite() {
            return format!("{value}");
        }
        match self {
            Self::Fixed(precision) => format_axis_decimal(value, usize::from(precision), locale),
            Self::Exponential(precision) => {
                let precision = usize::from(precision);
                let text = format!("{value:.precision$e}").replace('e', "E");
                localize_decimal(&text, locale)
            }
            Self::Number(precision) => {
                format_grouped_decimal(value, usize::from(precision), locale)
            }
            Self::Percent(precision) => {
                let text = format_axis_decimal(value * 100.0, usize::from(precision), locale);
                match locale {
                    AxisLabelLocale::EnUs => format!("{text}%"),
                    AxisLabelLocale::EsEs => format!("{text} %"),
                }
            }
            Self::General(significant) => format_general(value, significant, locale),
        }
    }
}

impl FromStr for NumericFormat {
    type Err = AxisError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let mut chars = text.chars();
        let Some(kind) = chars.next() else {
            return Err(AxisError::InvalidConfiguration(
                "numeric format string must not be empty".to_owned(),
            ));
        };
        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else {
            let parsed = digits.parse::<u8>().map_err(|_| {
                AxisError::InvalidConfiguration(format!(
                    "numeric format `{text}` has an invalid precision"
                ))
            })?;
            if parsed > Self::MAX_PRECISION {
                return Err(AxisError::InvalidConfiguration(format!(
                    "numeric format `{text}` precision must be <= {}",
                    Self::MAX_PRECISION
                )));
            }
            Some(parsed)
        };

        match kind.to_ascii_uppercase() {
            'F' => Ok(Self::Fixed(precision.unwrap_or(2))),
            'E' => Ok(Self::Exponential(precision.unwrap_or(6))),
            'N' => Ok(Self::Number(precision.unwrap_or(2))),
            'P' => Ok(Self::Percent(precision.unwrap_or(2))),
            'G' => Ok(Self::General(precision.filter(|digits| *digits > 0))),
            _ => Err(AxisError::InvalidConfiguration(format!(
                "unsupported numeric format `{text}`"
            ))),
        }
    }
}

impl fmt::Display for NumericFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(p) => write!(f, "F{p}"),
            Self::Exponential(p) => write!(f, "E{p}"),
            Self::Number(p) => write!(f, "N{p}"),
            Self::Percent(p) => write!(f, "P{p}"),
            Self::General(Some(p)) => write!(f, "G{p}"),
            Self::General(None) => write!(f, "G"),
        }
    }
}

/// Rejects `strftime` patterns chrono cannot render.
pub fn validate_date_time_format(pattern: &str) -> AxisResult<()> {
    if pattern.trim().is_empty() {
        return Err(AxisError::InvalidConfiguration(
            "date/time format string must not be empty".to_owned(),
        ));
    }
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(AxisError::InvalidConfiguration(format!(
            "invalid date/time format string `{pattern}`"
        )));
    }
    Ok(())
}

pub fn validate_radix(radix: u32) -> AxisResult<()> {
    if !(2..=36).contains(&radix) {
        return Err(AxisError::InvalidConfiguration(format!(
            "radix must be in 2..=36, got {radix}"
        )));
    }
    Ok(())
}

/// Numeric label options, copied out of the tick configuration for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericLabelOptions<'a> {
    pub use_multiplier_notation: bool,
    pub use_offset_notation: bool,
    pub use_exponential_notation: bool,
    pub invert_sign: bool,
    pub format: Option<NumericFormat>,
    pub radix: u32,
    pub prefix: &'a str,
    pub locale: AxisLabelLocale,
}

impl Default for NumericLabelOptions<'_> {
    fn default() -> Self {
        Self {
            use_multiplier_notation: false,
            use_offset_notation: false,
            use_exponential_notation: true,
            invert_sign: false,
            format: None,
            radix: 10,
            prefix: "",
            locale: AxisLabelLocale::EnUs,
        }
    }
}

/// Tick labels plus the shared corner label carrying multiplier/offset notation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericLabels {
    pub labels: Vec<String>,
    pub corner_label: String,
}

/// Formats major tick positions, factoring out a common multiplier and/or
/// offset when the corresponding notation is enabled.
#[must_use]
pub fn format_numeric_labels(
    positions: &[f64],
    step: f64,
    options: &NumericLabelOptions<'_>,
) -> NumericLabels {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return NumericLabels::default();
    };

    let range = last - first;
    let exponent = if range > 0.0 && range.is_finite() {
        range.log10().trunc() as i32
    } else {
        0
    };

    let multiplier = if options.use_multiplier_notation && exponent.abs() > 2 {
        10f64.powi(exponent)
    } else {
        1.0
    };

    let offset = if options.use_offset_notation && range > 0.0 && (first / range).abs() >= 10.0 {
        first
    } else {
        0.0
    };

    let adjusted_step = (step / multiplier).abs();
    let labels = positions
        .iter()
        .map(|&position| {
            let mut value = (position - offset) / multiplier;
            if options.invert_sign {
                value = -value;
            }
            format_numeric_value(value, adjusted_step, options)
        })
        .collect();

    let mut corner_label = String::new();
    if options.use_exponential_notation {
        if multiplier != 1.0 {
            corner_label.push_str(&format!("e{exponent} "));
        }
        if offset != 0.0 {
            corner_label.push_str(&format!("{offset:+.2e}"));
        }
    } else {
        if multiplier != 1.0 {
            corner_label.push_str(&format_grouped_decimal(multiplier, 0, options.locale));
        }
        if offset != 0.0 {
            corner_label.push_str(&format!(
                " +{}",
                format_axis_decimal(offset, 2, options.locale)
            ));
        }
    }
    let corner_label = corner_label.replace("+-", "-").trim().to_owned();

    NumericLabels {
        labels,
        corner_label,
    }
}

fn format_numeric_value(value: f64, step: f64, options: &NumericLabelOptions<'_>) -> String {
    let text = if options.radix != 10 {
        let rounded = value.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let magnitude = rounded.abs().min(u64::MAX as f64) as u64;
        format!(
            "{sign}{}{}",
            options.prefix,
            to_radix_string(magnitude, options.radix)
        )
    } else {
        let body = match options.format {
            Some(format) => format.format(value, options.locale),
            None => format_axis_decimal(value, step_precision(step), options.locale),
        };
        if options.prefix.is_empty() {
            body
        } else if let Some(unsigned) = body.strip_prefix('-') {
            format!("-{}{unsigned}", options.prefix)
        } else {
            format!("{}{body}", options.prefix)
        }
    };
    normalize_negative_zero(text)
}

/// Decimals needed to show every multiple of `step` without loss.
#[must_use]
pub fn step_precision(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    for decimals in 0..=12 {
        let scaled = step * 10f64.powi(decimals);
        if (scaled - scaled.round()).abs() <= 1e-6 * scaled.max(1.0) {
            return decimals as usize;
        }
    }
    12
}

#[must_use]
pub fn format_axis_decimal(value: f64, precision: usize, locale: AxisLabelLocale) -> String {
    let text = normalize_negative_zero(format!("{value:.precision$}"));
    localize_decimal(&text, locale)
}

fn localize_decimal(text: &str, locale: AxisLabelLocale) -> String {
    match locale {
        AxisLabelLocale::EnUs => text.to_owned(),
        AxisLabelLocale::EsEs => text.replace('.', ","),
    }
}

fn format_grouped_decimal(value: f64, precision: usize, locale: AxisLabelLocale) -> String {
    let text = normalize_negative_zero(format!("{value:.precision$}"));
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(locale.group_separator());
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}{}{fraction}", locale.decimal_separator()),
        None => format!("{sign}{grouped}"),
    }
}

fn format_general(value: f64, significant: Option<u8>, locale: AxisLabelLocale) -> String {
    let value = match significant {
        Some(digits) if value != 0.0 => {
            let magnitude = value.abs().log10().floor() as i32;
            let scale = 10f64.powi(i32::from(digits) - 1 - magnitude);
            (value * scale).round() / scale
        }
        _ => value,
    };
    let text = match Decimal::from_f64(value) {
        Some(decimal) => decimal.round_dp(10).normalize().to_string(),
        None => format!("{value}"),
    };
    localize_decimal(&normalize_negative_zero(text), locale)
}

fn normalize_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|ch| matches!(ch, '0' | '.' | ',')) => rest.to_owned(),
        _ => text,
    }
}

fn to_radix_string(mut value: u64, radix: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let radix = u64::from(radix.clamp(2, 36));
    let mut digits = Vec::new();
    while value > 0 {
        let digit = (value % radix) as u32;
        digits.push(char::from_digit(digit, radix as u32).unwrap_or('?'));
        value /= radix;
    }
    digits.iter().rev().collect::<String>().to_ascii_uppercase()
}
