use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::TickLabelConfig;
use crate::core::label_format::format_numeric_labels;
use crate::core::numeric_ticks::{major_ticks, minor_positions};
use crate::core::{
    CalendarUnitKind, DataRange, DateTimeUnit, Edge, PlotDimensions, TextSize,
    instant_to_unix_seconds, select_unit, unix_seconds_to_instant,
};
use crate::error::AxisResult;
use crate::render::{FontSpec, TextMeasurer};

/// Labels must be spaced at least this many label extents apart.
const LABEL_SPACING_RATIO: f64 = 1.2;

/// One tick: data-space position, pixel along the axis and its label.
///
/// Minor ticks carry an empty label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub pixel: f64,
    pub label: String,
}

/// Spacing chosen by the last recalculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickSpacing {
    Numeric {
        step: f64,
    },
    Calendar {
        unit: CalendarUnitKind,
        multiplier: u32,
    },
}

/// Tick positions, pixels and labels for one axis.
///
/// Every recalculation replaces the previous ticks wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickCollection {
    edge: Edge,
    major: Vec<Tick>,
    minor: Vec<Tick>,
    spacing: Option<TickSpacing>,
    corner_label: String,
    max_label_size: TextSize,
    max_tick_count: usize,
}

struct GeneratedTicks {
    major: Vec<Tick>,
    minor: Vec<Tick>,
    spacing: TickSpacing,
    corner_label: String,
}

impl TickCollection {
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    #[must_use]
    pub fn major_ticks(&self) -> &[Tick] {
        &self.major
    }

    #[must_use]
    pub fn minor_ticks(&self) -> &[Tick] {
        &self.minor
    }

    #[must_use]
    pub fn spacing(&self) -> Option<TickSpacing> {
        self.spacing
    }

    /// Shared multiplier/offset label; empty when no notation applies.
    #[must_use]
    pub fn corner_label(&self) -> &str {
        &self.corner_label
    }

    /// Componentwise maximum over the (rotated) major label boxes.
    #[must_use]
    pub fn max_label_size(&self) -> TextSize {
        self.max_label_size
    }

    /// Tick budget used by the last recalculation.
    #[must_use]
    pub fn max_tick_count(&self) -> usize {
        self.max_tick_count
    }

    /// Regenerates ticks for `dims`.
    ///
    /// A first pass sizes the tick budget from a representative label; the
    /// measured largest label then drives a second pass when it changes the
    /// budget.
    pub fn recalculate<M: TextMeasurer + ?Sized>(
        &mut self,
        dims: &PlotDimensions,
        font: &FontSpec,
        measurer: &M,
        config: &TickLabelConfig,
    ) -> AxisResult<()> {
        dims.validate()?;
        font.validate()?;
        config.validate()?;

        let range = dims.data_range(self.edge);
        let pixel_span = dims.pixel_span(self.edge);

        let representative = representative_label(range, config);
        let first_estimate = rotated_size(measurer.measure(&representative, font), config);
        let mut max_tick_count = self.tick_budget(pixel_span, first_estimate, config);

        let mut generated = generate(dims, self.edge, range, max_tick_count, config)?;
        let mut max_label_size = measure_labels(&generated.major, font, measurer, config);

        let refined = self.tick_budget(pixel_span, max_label_size, config);
        trace!(
            edge = ?self.edge,
            first_pass = max_tick_count,
            second_pass = refined,
            "tick budget passes"
        );
        if refined != max_tick_count {
            max_tick_count = refined;
            generated = generate(dims, self.edge, range, max_tick_count, config)?;
            max_label_size = measure_labels(&generated.major, font, measurer, config);
        }

        debug!(
            edge = ?self.edge,
            spacing = ?generated.spacing,
            major = generated.major.len(),
            minor = generated.minor.len(),
            max_tick_count,
            "recalculated ticks"
        );

        self.major = generated.major;
        self.minor = generated.minor;
        self.spacing = Some(generated.spacing);
        self.corner_label = generated.corner_label;
        self.max_label_size = max_label_size;
        self.max_tick_count = max_tick_count;
        Ok(())
    }

    fn tick_budget(&self, pixel_span: f64, label: TextSize, config: &TickLabelConfig) -> usize {
        let extent = if self.edge.is_horizontal() {
            label.width
        } else {
            label.height
        };
        let budget = pixel_span * config.tick_density / (extent.max(1.0) * LABEL_SPACING_RATIO);
        if budget.is_finite() {
            (budget.floor() as usize).max(1)
        } else {
            1
        }
    }
}

fn generate(
    dims: &PlotDimensions,
    edge: Edge,
    range: DataRange,
    max_tick_count: usize,
    config: &TickLabelConfig,
) -> AxisResult<GeneratedTicks> {
    let to_pixel = |position: f64| {
        let pixel = dims.position_to_pixel(position, edge);
        if config.snap_to_nearest_pixel {
            pixel.round()
        } else {
            pixel
        }
    };

    if config.date_time {
        return generate_date_ticks(range, max_tick_count, config, to_pixel);
    }

    let ticks = major_ticks(range, max_tick_count, config.radix);
    let labels = format_numeric_labels(&ticks.positions, ticks.step, &config.numeric_label_options());
    let major = ticks
        .positions
        .iter()
        .zip(labels.labels)
        .map(|(&position, label)| Tick {
            position,
            pixel: to_pixel(position),
            label,
        })
        .collect();
    let minor = minor_positions(range, &ticks.positions, ticks.step, config.minor_log_distribution)
        .into_iter()
        .map(|position| Tick {
            position,
            pixel: to_pixel(position),
            label: String::new(),
        })
        .collect();

    Ok(GeneratedTicks {
        major,
        minor,
        spacing: TickSpacing::Numeric { step: ticks.step },
        corner_label: labels.corner_label,
    })
}

fn generate_date_ticks(
    range: DataRange,
    max_tick_count: usize,
    config: &TickLabelConfig,
    to_pixel: impl Fn(f64) -> f64,
) -> AxisResult<GeneratedTicks> {
    let from = unix_seconds_to_instant(range.min);
    let to = unix_seconds_to_instant(range.max);
    let selection = select_unit(from, to, max_tick_count, config.locale, config.date_time_spacing)?;

    let mut major: Vec<Tick> = selection
        .ticks(from, to)
        .into_iter()
        .map(|instant| {
            let position = instant_to_unix_seconds(instant);
            Tick {
                position,
                pixel: to_pixel(position),
                label: date_label(&selection.unit, instant, config),
            }
        })
        .collect();
    if major.is_empty() {
        major.push(Tick {
            position: range.min,
            pixel: to_pixel(range.min),
            label: date_label(&selection.unit, from, config),
        });
    }

    Ok(GeneratedTicks {
        major,
        minor: Vec::new(),
        spacing: TickSpacing::Calendar {
            unit: selection.kind(),
            multiplier: selection.multiplier,
        },
        corner_label: String::new(),
    })
}

fn date_label(unit: &DateTimeUnit, instant: NaiveDateTime, config: &TickLabelConfig) -> String {
    if let Some(pattern) = &config.date_time_format {
        let mut label = String::new();
        // Patterns needing a time zone cannot render naive instants.
        if write!(label, "{}", instant.format(pattern)).is_ok() {
            return label;
        }
    }
    unit.format_label(instant)
}

fn representative_label(range: DataRange, config: &TickLabelConfig) -> String {
    if config.date_time {
        let from = unix_seconds_to_instant(range.min);
        return DateTimeUnit::new(CalendarUnitKind::Minute, config.locale, None)
            .map(|unit| date_label(&unit, from, config))
            .unwrap_or_default();
    }
    let endpoints = [range.min, range.max];
    format_numeric_labels(&endpoints, range.span() / 10.0, &config.numeric_label_options())
        .labels
        .into_iter()
        .max_by_key(|label| label.chars().count())
        .unwrap_or_default()
}

fn measure_labels<M: TextMeasurer + ?Sized>(
    ticks: &[Tick],
    font: &FontSpec,
    measurer: &M,
    config: &TickLabelConfig,
) -> TextSize {
    ticks.iter().fold(TextSize::default(), |size, tick| {
        size.max(rotated_size(measurer.measure(&tick.label, font), config))
    })
}

/// Axis-aligned bounding box of a label rotated by the configured angle.
fn rotated_size(size: TextSize, config: &TickLabelConfig) -> TextSize {
    if config.rotation_degrees == 0.0 {
        return size;
    }
    let (sin, cos) = config.rotation_degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    TextSize::new(
        size.width * cos + size.height * sin,
        size.width * sin + size.height * cos,
    )
}

#[cfg(test)]
mod tests {
    use super::{TickCollection, TickSpacing};
    use crate::api::TickLabelConfig;
    use crate::core::{AxisLimits, Edge, PlotDimensions};
    use crate::render::{FontSpec, HeuristicTextMeasurer};

    fn dims(x_min: f64, x_max: f64) -> PlotDimensions {
        let limits = AxisLimits::new(x_min, x_max, 0.0, 1.0).expect("limits");
        PlotDimensions::new((140.0, 140.0), (100.0, 100.0), (20.0, 20.0), limits)
            .expect("dims")
    }

    #[test]
    fn degenerate_range_places_single_tick_at_centre() {
        let mut ticks = TickCollection::new(Edge::Bottom);
        ticks
            .recalculate(
                &dims(5.0, 5.0),
                &FontSpec::default(),
                &HeuristicTextMeasurer,
                &TickLabelConfig::default(),
            )
            .expect("recalculate");
        assert_eq!(ticks.major_ticks().len(), 1);
        assert_eq!(ticks.major_ticks()[0].position, 5.0);
        assert_eq!(ticks.major_ticks()[0].pixel, 70.0);
        assert!(ticks.minor_ticks().is_empty());
    }

    #[test]
    fn numeric_ticks_are_ascending_and_inside_range() {
        let mut ticks = TickCollection::new(Edge::Bottom);
        ticks
            .recalculate(
                &dims(-3.0, 17.0),
                &FontSpec::default(),
                &HeuristicTextMeasurer,
                &TickLabelConfig::default(),
            )
            .expect("recalculate");
        let majors = ticks.major_ticks();
        assert!(!majors.is_empty());
        assert!(majors.len() <= ticks.max_tick_count());
        assert!(majors.windows(2).all(|pair| pair[0].position < pair[1].position));
        assert!(majors.iter().all(|tick| (-3.0..=17.0).contains(&tick.position)));
        assert!(matches!(ticks.spacing(), Some(TickSpacing::Numeric { .. })));
    }

    #[test]
    fn date_mode_has_no_minor_ticks() {
        let config = TickLabelConfig {
            date_time: true,
            ..TickLabelConfig::default()
        };
        let mut ticks = TickCollection::new(Edge::Bottom);
        ticks
            .recalculate(
                &dims(0.0, 86_400.0 * 2.0),
                &FontSpec::default(),
                &HeuristicTextMeasurer,
                &config,
            )
            .expect("recalculate");
        assert!(ticks.minor_ticks().is_empty());
        assert!(matches!(ticks.spacing(), Some(TickSpacing::Calendar { .. })));
        assert!(ticks.major_ticks().iter().all(|tick| tick.label.contains('\n')));
    }
}
