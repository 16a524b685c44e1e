use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::calendar_unit::{CalendarUnitKind, DateTimeUnit, UnitRegistry};
use crate::core::label_format::AxisLabelLocale;
use crate::error::{AxisError, AxisResult};

/// Caller-fixed date/time spacing.
///
/// `multiplier` is always pinned; `unit` pins the calendar unit as well when
/// present, otherwise the unit is still chosen from the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeSpacing {
    #[serde(default)]
    pub unit: Option<CalendarUnitKind>,
    pub multiplier: u32,
}

impl DateTimeSpacing {
    #[must_use]
    pub fn new(multiplier: u32) -> Self {
        Self {
            unit: None,
            multiplier,
        }
    }

    #[must_use]
    pub fn with_unit(unit: CalendarUnitKind, multiplier: u32) -> Self {
        Self {
            unit: Some(unit),
            multiplier,
        }
    }

    /// Fails fast when the spacing can never be honoured.
    pub fn validate(self) -> AxisResult<()> {
        if self.multiplier == 0 {
            return Err(AxisError::InvalidConfiguration(
                "manual date/time spacing must be >= 1".to_owned(),
            ));
        }
        if let Some(unit) = self.unit {
            if !unit.supports_manual_spacing() {
                return Err(AxisError::UnsupportedSpacing { unit });
            }
        }
        Ok(())
    }
}

/// Outcome of one unit selection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSelection {
    pub unit: DateTimeUnit,
    pub multiplier: u32,
    pub tick_count: usize,
    /// `false` when no combination fit and the coarsest one was used.
    pub fits_budget: bool,
}

impl UnitSelection {
    #[must_use]
    pub fn kind(&self) -> CalendarUnitKind {
        self.unit.kind()
    }

    #[must_use]
    pub fn ticks(&self, from: NaiveDateTime, to: NaiveDateTime) -> Vec<NaiveDateTime> {
        self.unit.enumerate_ticks(from, to, self.multiplier)
    }
}

/// Picks the finest calendar unit and smallest multiplier whose tick count
/// over `[from, to]` stays within `max_tick_count`.
pub fn select_unit(
    from: NaiveDateTime,
    to: NaiveDateTime,
    max_tick_count: usize,
    locale: AxisLabelLocale,
    spacing: Option<DateTimeSpacing>,
) -> AxisResult<UnitSelection> {
    let registry = match spacing {
        None => UnitRegistry::standard(locale),
        Some(spacing) => {
            spacing.validate()?;
            match spacing.unit {
                Some(kind) => {
                    let mut registry = UnitRegistry::empty();
                    registry.insert(DateTimeUnit::new(kind, locale, Some(spacing.multiplier))?);
                    registry
                }
                None => UnitRegistry::with_manual_spacing(locale, spacing.multiplier)?,
            }
        }
    };
    select_from_registry(&registry, from, to, max_tick_count)
}

/// Finest-first walk over `registry`; see [`select_unit`].
pub fn select_from_registry(
    registry: &UnitRegistry,
    from: NaiveDateTime,
    to: NaiveDateTime,
    max_tick_count: usize,
) -> AxisResult<UnitSelection> {
    let max_tick_count = max_tick_count.max(1);
    let (from, to) = (from.min(to), from.max(to));

    for unit in registry.iter() {
        for &multiplier in unit.multipliers() {
            let tick_count = unit
                .enumerate_ticks_limited(from, to, multiplier, max_tick_count + 1)
                .len();
            if tick_count <= max_tick_count {
                debug!(
                    unit = ?unit.kind(),
                    multiplier,
                    tick_count,
                    max_tick_count,
                    "selected date/time tick unit"
                );
                return Ok(UnitSelection {
                    unit: unit.clone(),
                    multiplier,
                    tick_count,
                    fits_budget: true,
                });
            }
        }
    }

    let Some(unit) = registry.coarsest() else {
        return Err(AxisError::InvalidConfiguration(
            "unit registry is empty".to_owned(),
        ));
    };
    let multiplier = unit.multipliers().last().copied().unwrap_or(1);
    let tick_count = unit.enumerate_ticks(from, to, multiplier).len();
    warn!(
        unit = ?unit.kind(),
        multiplier,
        tick_count,
        max_tick_count,
        "no date/time unit fits the tick budget; using the coarsest spacing"
    );
    Ok(UnitSelection {
        unit: unit.clone(),
        multiplier,
        tick_count,
        fits_budget: false,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{DateTimeSpacing, select_from_registry, select_unit};
    use crate::core::calendar_unit::{CalendarUnitKind, DateTimeUnit, UnitRegistry};
    use crate::core::label_format::AxisLabelLocale;
    use crate::error::AxisError;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid instant")
    }

    #[test]
    fn two_day_span_prefers_hours_over_days() {
        let selection = select_unit(at(2022, 3, 1, 0), at(2022, 3, 3, 0), 10, AxisLabelLocale::EnUs, None)
            .expect("selection");
        assert_eq!(selection.kind(), CalendarUnitKind::Hour);
        assert_eq!(selection.multiplier, 6);
        assert_eq!(selection.tick_count, 9);
        assert!(selection.fits_budget);
    }

    #[test]
    fn four_centuries_with_five_ticks_select_century() {
        let from = at(1900, 1, 1, 0);
        let to = at(2300, 1, 1, 0);
        let selection = select_unit(from, to, 5, AxisLabelLocale::EnUs, None).expect("selection");
        assert_eq!(selection.kind(), CalendarUnitKind::Century);
        assert_eq!(selection.multiplier, 1);

        let labels: Vec<String> = selection
            .ticks(from, to)
            .into_iter()
            .map(|tick| selection.unit.format_label(tick))
            .collect();
        assert_eq!(
            labels,
            vec!["1900\n ", "2000\n ", "2100\n ", "2200\n ", "2300\n "]
        );
    }

    #[test]
    fn degenerate_range_selects_single_tick() {
        let instant = at(2010, 6, 15, 12);
        let selection = select_unit(instant, instant, 4, AxisLabelLocale::EnUs, None).expect("selection");
        assert_eq!(selection.tick_count, 1);
        assert_eq!(selection.ticks(instant, instant).len(), 1);
    }

    #[test]
    fn budget_of_one_over_full_range_picks_five_millennia() {
        let (from, to) = (at(1, 1, 1, 0), at(9999, 1, 1, 0));
        let selection =
            select_unit(from, to, 1, AxisLabelLocale::EnUs, None).expect("selection");
        assert_eq!(selection.kind(), CalendarUnitKind::Millennium);
        assert_eq!(selection.multiplier, 5);
        assert!(selection.fits_budget);
        assert_eq!(selection.ticks(from, to), vec![at(5000, 1, 1, 0)]);
    }

    #[test]
    fn unfit_registry_falls_back_to_its_coarsest_spacing() {
        let mut registry = UnitRegistry::empty();
        registry.insert(
            DateTimeUnit::new(CalendarUnitKind::Day, AxisLabelLocale::EnUs, None).expect("unit"),
        );
        let (from, to) = (at(2000, 1, 1, 0), at(2010, 1, 1, 0));
        let selection = select_from_registry(&registry, from, to, 3).expect("selection");
        assert_eq!(selection.kind(), CalendarUnitKind::Day);
        assert_eq!(selection.multiplier, 20);
        assert!(!selection.fits_budget);
        assert!(selection.tick_count > 3);
    }

    #[test]
    fn manual_multiplier_is_pinned_while_unit_is_searched() {
        let spacing = DateTimeSpacing::new(15);
        let selection = select_unit(
            at(2022, 3, 1, 0),
            at(2022, 3, 1, 6),
            30,
            AxisLabelLocale::EnUs,
            Some(spacing),
        )
        .expect("selection");
        assert_eq!(selection.kind(), CalendarUnitKind::Minute);
        assert_eq!(selection.multiplier, 15);
        assert_eq!(selection.tick_count, 25);
    }

    #[test]
    fn pinned_unit_and_multiplier_skip_the_search() {
        let spacing = DateTimeSpacing::with_unit(CalendarUnitKind::Day, 7);
        let selection = select_unit(
            at(2022, 1, 1, 0),
            at(2022, 12, 31, 0),
            3,
            AxisLabelLocale::EnUs,
            Some(spacing),
        )
        .expect("selection");
        assert_eq!(selection.kind(), CalendarUnitKind::Day);
        assert_eq!(selection.multiplier, 7);
        assert!(!selection.fits_budget);
    }

    #[test]
    fn pinned_year_spacing_is_a_configuration_error() {
        let spacing = DateTimeSpacing::with_unit(CalendarUnitKind::Year, 2);
        let err = select_unit(at(2000, 1, 1, 0), at(2020, 1, 1, 0), 5, AxisLabelLocale::EnUs, Some(spacing))
            .expect_err("years reject fixed spacing");
        assert!(matches!(
            err,
            AxisError::UnsupportedSpacing {
                unit: CalendarUnitKind::Year
            }
        ));
    }
}
