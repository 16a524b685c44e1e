//! Axis orchestration: tick collection, layout and rendering.

mod axis;
pub mod axis_config;
mod axis_line;
mod axis_ticks;
mod axis_title;
mod tick_collection;

pub use axis::{Axis, AxisCacheKey, AxisCacheState};
pub use axis_config::{AxisConfigureOptions, TickLabelConfig};
pub use axis_line::AxisLine;
pub use axis_ticks::AxisTicks;
pub use axis_title::AxisTitle;
pub use tick_collection::{Tick, TickCollection, TickSpacing};
