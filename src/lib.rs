//! chart-axis: axis tick generation and axis layout engine for 2D plots.
//!
//! Given a numeric or date/time data range and the pixel span available for
//! it, the crate picks "nice" tick positions, maps them to pixels, formats
//! their labels (calendar-aware for date axes) and sizes the axis so title,
//! labels and tick marks fit. Drawing goes through the `Renderer` trait.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Axis, AxisConfigureOptions, TickLabelConfig};
pub use error::{AxisError, AxisResult};
