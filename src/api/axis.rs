use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use crate::api::axis_config::DEFAULT_PIXEL_SIZE_MINIMUM;
use crate::api::{AxisConfigureOptions, AxisLine, AxisTicks, AxisTitle, TickLabelConfig};
use crate::core::{AxisLabelLocale, DateTimeSpacing, Edge, NumericFormat, PlotDimensions};
use crate::error::{AxisError, AxisResult};
use crate::render::{FontSpec, HeuristicTextMeasurer, RenderFrame, Renderer, TextMeasurer};

/// Hashable fingerprint of everything tick generation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxisCacheKey {
    edge: Edge,
    geometry: [OrderedFloat<f64>; 10],
    font_family: String,
    font_size: OrderedFloat<f64>,
    font_bold: bool,
    config: TickConfigFingerprint,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TickConfigFingerprint {
    flags: [bool; 7],
    numeric_format: Option<NumericFormat>,
    radix: u32,
    prefix: String,
    date_time_format: Option<String>,
    date_time_spacing: Option<DateTimeSpacing>,
    locale: AxisLabelLocale,
    tick_density: OrderedFloat<f64>,
    rotation_degrees: OrderedFloat<f64>,
}

impl AxisCacheKey {
    #[must_use]
    pub fn new(
        edge: Edge,
        dims: &PlotDimensions,
        font: &FontSpec,
        config: &TickLabelConfig,
    ) -> Self {
        let geometry = [
            dims.figure_width,
            dims.figure_height,
            dims.data_width,
            dims.data_height,
            dims.data_offset_x,
            dims.data_offset_y,
            dims.limits.x.min,
            dims.limits.x.max,
            dims.limits.y.min,
            dims.limits.y.max,
        ]
        .map(OrderedFloat);

        Self {
            edge,
            geometry,
            font_family: font.family.clone(),
            font_size: OrderedFloat(font.size_px),
            font_bold: font.bold,
            config: TickConfigFingerprint {
                flags: [
                    config.date_time,
                    config.use_multiplier_notation,
                    config.use_offset_notation,
                    config.use_exponential_notation,
                    config.invert_sign,
                    config.minor_log_distribution,
                    config.snap_to_nearest_pixel,
                ],
                numeric_format: config.numeric_format,
                radix: config.radix,
                prefix: config.prefix.clone(),
                date_time_format: config.date_time_format.clone(),
                date_time_spacing: config.date_time_spacing,
                locale: config.locale,
                tick_density: OrderedFloat(config.tick_density),
                rotation_degrees: OrderedFloat(config.rotation_degrees),
            },
        }
    }
}

/// Whether the tick collection matches its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AxisCacheState {
    #[default]
    Stale,
    Fresh(AxisCacheKey),
}

/// One plot axis: title, ticks with labels, and the axis line.
///
/// Ticks are regenerated lazily: rendering or auto-sizing recalculates only
/// when the cache is stale or its inputs changed since the last pass.
#[derive(Debug, Clone)]
pub struct Axis<M: TextMeasurer = HeuristicTextMeasurer> {
    edge: Edge,
    title: AxisTitle,
    ticks: AxisTicks,
    line: AxisLine,
    pixel_size: f64,
    pixel_size_minimum: f64,
    auto_sized: bool,
    cache: AxisCacheState,
    recalculation_count: u64,
    measurer: M,
}

impl Axis {
    #[must_use]
    pub fn new(edge: Edge) -> Self {
        Self::with_measurer(edge, HeuristicTextMeasurer)
    }
}

impl<M: TextMeasurer> Axis<M> {
    #[must_use]
    pub fn with_measurer(edge: Edge, measurer: M) -> Self {
        Self {
            edge,
            title: AxisTitle::new(edge),
            ticks: AxisTicks::new(edge),
            line: AxisLine::new(edge),
            pixel_size: DEFAULT_PIXEL_SIZE_MINIMUM,
            pixel_size_minimum: DEFAULT_PIXEL_SIZE_MINIMUM,
            auto_sized: false,
            cache: AxisCacheState::Stale,
            recalculation_count: 0,
            measurer,
        }
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Moves the axis to `edge`, updating title, ticks and line alike.
    pub fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
        self.title.set_edge(edge);
        self.ticks.set_edge(edge);
        self.line.set_edge(edge);
        self.invalidate();
    }

    #[must_use]
    pub fn title(&self) -> &AxisTitle {
        &self.title
    }

    pub fn title_mut(&mut self) -> &mut AxisTitle {
        &mut self.title
    }

    /// Sets the title text and makes it visible.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.title.label = label.into();
        self.title.visible = true;
    }

    #[must_use]
    pub fn ticks(&self) -> &AxisTicks {
        &self.ticks
    }

    /// Mutable tick settings; changes to the tick font or label config are
    /// picked up by the next render through the cache key.
    pub fn ticks_mut(&mut self) -> &mut AxisTicks {
        &mut self.ticks
    }

    #[must_use]
    pub fn line(&self) -> &AxisLine {
        &self.line
    }

    pub fn line_mut(&mut self) -> &mut AxisLine {
        &mut self.line
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Space reserved for the axis across its edge, as of the last auto-size.
    ///
    /// The first render auto-sizes the axis when no auto-size ran before.
    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    #[must_use]
    pub fn pixel_size_minimum(&self) -> f64 {
        self.pixel_size_minimum
    }

    pub fn set_pixel_size_minimum(&mut self, minimum: f64) -> AxisResult<()> {
        if !minimum.is_finite() || minimum < 0.0 {
            return Err(AxisError::InvalidConfiguration(format!(
                "axis minimum size must be finite and >= 0, got {minimum}"
            )));
        }
        self.pixel_size_minimum = minimum;
        self.pixel_size = self.pixel_size.max(minimum);
        Ok(())
    }

    #[must_use]
    pub fn cache_state(&self) -> &AxisCacheState {
        &self.cache
    }

    /// Number of tick recalculations performed so far.
    #[must_use]
    pub fn recalculation_count(&self) -> u64 {
        self.recalculation_count
    }

    /// Forces the next render or auto-size to recalculate ticks.
    pub fn invalidate(&mut self) {
        self.cache = AxisCacheState::Stale;
    }

    /// Recalculates tick positions for `dims` unconditionally.
    pub fn recalculate_tick_positions(&mut self, dims: &PlotDimensions) -> AxisResult<()> {
        self.ticks.recalculate(dims, &self.measurer)?;
        self.recalculation_count += 1;
        self.cache = AxisCacheState::Fresh(self.cache_key(dims));
        debug!(
            edge = ?self.edge,
            major = self.ticks.collection().major_ticks().len(),
            recalculation_count = self.recalculation_count,
            "axis ticks recalculated"
        );
        Ok(())
    }

    fn cache_key(&self, dims: &PlotDimensions) -> AxisCacheKey {
        AxisCacheKey::new(self.edge, dims, &self.ticks.font, &self.ticks.config)
    }

    fn ensure_fresh(&mut self, dims: &PlotDimensions) -> AxisResult<()> {
        let is_fresh = match &self.cache {
            AxisCacheState::Fresh(key) => *key == self.cache_key(dims),
            AxisCacheState::Stale => false,
        };
        if is_fresh {
            Ok(())
        } else {
            self.recalculate_tick_positions(dims)
        }
    }

    /// Sizes the axis to fit its title, labels and major ticks.
    ///
    /// Returns the new pixel size, never below the configured minimum.
    pub fn auto_size(&mut self, dims: &PlotDimensions) -> AxisResult<f64> {
        self.ensure_fresh(dims)?;

        let size = self.title.thickness(&self.measurer)
            + self.ticks.label_extent()
            + self.ticks.tick_extent();
        self.pixel_size = size.max(self.pixel_size_minimum);
        self.auto_sized = true;
        debug!(edge = ?self.edge, pixel_size = self.pixel_size, "axis auto-sized");
        Ok(self.pixel_size)
    }

    /// Applies every provided option, or none of them when any is invalid.
    ///
    /// Tick regeneration is deferred to the next render or auto-size.
    pub fn configure(&mut self, options: AxisConfigureOptions) -> AxisResult<()> {
        let formats = match options.validate() {
            Ok(formats) => formats,
            Err(err) => {
                warn!(edge = ?self.edge, error = %err, "rejected axis configuration");
                return Err(err);
            }
        };

        let AxisConfigureOptions {
            show_title,
            show_labels,
            show_major_ticks,
            show_minor_ticks,
            show_line,
            color,
            use_multiplier_notation,
            use_offset_notation,
            use_exponential_notation,
            date_time,
            ruler_mode,
            invert_sign,
            font_name,
            font_size,
            rotation,
            log_scale,
            numeric_format_string: _,
            snap_to_nearest_pixel,
            radix,
            prefix,
            date_time_format_string: _,
            date_time_manual_spacing,
            locale,
            tick_density,
        } = options;

        let ticks = &mut self.ticks;
        assign(&mut self.title.visible, show_title);
        assign(&mut ticks.show_labels, show_labels);
        assign(&mut ticks.show_major_ticks, show_major_ticks);
        assign(&mut ticks.show_minor_ticks, show_minor_ticks);
        assign(&mut self.line.visible, show_line);
        if let Some(color) = color {
            ticks.color = color;
            self.title.color = color;
            self.line.color = color;
        }
        assign(&mut ticks.ruler_mode, ruler_mode);
        assign(&mut ticks.font.family, font_name);
        assign(&mut ticks.font.size_px, font_size);

        let config = &mut ticks.config;
        assign(&mut config.use_multiplier_notation, use_multiplier_notation);
        assign(&mut config.use_offset_notation, use_offset_notation);
        assign(&mut config.use_exponential_notation, use_exponential_notation);
        assign(&mut config.date_time, date_time);
        assign(&mut config.invert_sign, invert_sign);
        assign(&mut config.rotation_degrees, rotation);
        assign(&mut config.minor_log_distribution, log_scale);
        assign(&mut config.numeric_format, formats.numeric_format);
        assign(&mut config.snap_to_nearest_pixel, snap_to_nearest_pixel);
        assign(&mut config.radix, radix);
        assign(&mut config.prefix, prefix);
        assign(&mut config.date_time_format, formats.date_time_format);
        assign(&mut config.date_time_spacing, date_time_manual_spacing);
        assign(&mut config.locale, locale);
        assign(&mut config.tick_density, tick_density);
        Ok(())
    }

    /// Builds the draw commands for the axis: ticks, then title, then line.
    pub fn build_frame(&mut self, dims: &PlotDimensions) -> AxisResult<RenderFrame> {
        if self.auto_sized {
            self.ensure_fresh(dims)?;
        } else {
            self.auto_size(dims)?;
        }

        let mut frame = RenderFrame::new(dims.figure_width, dims.figure_height);
        self.ticks.append_to_frame(dims, &mut frame);
        self.title.append_to_frame(dims, self.pixel_size, &mut frame);
        self.line.append_to_frame(dims, &mut frame);
        Ok(frame)
    }

    /// Recalculates if stale, then draws the axis with `renderer`.
    pub fn render<R: Renderer + ?Sized>(
        &mut self,
        dims: &PlotDimensions,
        renderer: &mut R,
    ) -> AxisResult<()> {
        let frame = self.build_frame(dims)?;
        renderer.render(&frame)
    }
}

fn assign<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
