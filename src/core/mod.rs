pub mod calendar_unit;
pub mod label_format;
pub mod numeric_ticks;
pub mod primitives;
pub mod types;
pub mod unit_selector;

pub use calendar_unit::{CalendarUnitKind, DateTimeUnit, MAX_ENUMERATED_TICKS, UnitRegistry};
pub use label_format::{AxisLabelLocale, NumericFormat};
pub use numeric_ticks::NumericTicks;
pub use primitives::{instant_to_unix_seconds, unix_seconds_to_instant};
pub use types::{AxisLimits, DataRange, Edge, PlotDimensions, TextSize};
pub use unit_selector::{DateTimeSpacing, UnitSelection, select_unit};
