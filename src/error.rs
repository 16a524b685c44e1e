use thiserror::Error;

use crate::core::CalendarUnitKind;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("invalid plot dimensions: width={width}, height={height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("fixed tick spacing is not supported for {unit:?} ticks (use a numeric axis instead)")]
    UnsupportedSpacing { unit: CalendarUnitKind },

    #[error("invalid axis configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to parse axis options: {0}")]
    Serialization(String),
}
