//! Calendar unit strategies for date/time axes.
//!
//! Each [`CalendarUnitKind`] knows how to floor an instant to the start of its
//! unit, step forward by a multiple of the unit, and label a tick. Instants are
//! naive UTC date-times bounded to years `1..=9999`; stepping past either
//! bound reports exhaustion (`None`) instead of wrapping.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::label_format::AxisLabelLocale;
use crate::core::primitives::{MAX_YEAR, MIN_YEAR, clamp_instant, is_representable, min_instant};
use crate::error::{AxisError, AxisResult};

/// Hard cap on ticks produced by one enumeration.
pub const MAX_ENUMERATED_TICKS: usize = 10_000;

/// Calendar granularity, ordered finest to coarsest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CalendarUnitKind {
    Millisecond,
    Centisecond,
    Decisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
    Decade,
    Century,
    Millennium,
}

impl CalendarUnitKind {
    pub const ALL: [Self; 12] = [
        Self::Millisecond,
        Self::Centisecond,
        Self::Decisecond,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Month,
        Self::Year,
        Self::Decade,
        Self::Century,
        Self::Millennium,
    ];

    /// Nice spacing multipliers searched by the unit selector, ascending.
    #[must_use]
    pub fn allowed_multipliers(self) -> &'static [u32] {
        match self {
            Self::Millisecond | Self::Centisecond | Self::Decisecond => &[1, 2, 5],
            Self::Second | Self::Minute => &[1, 2, 5, 10, 15, 30],
            Self::Hour => &[1, 2, 3, 4, 6, 12],
            Self::Day => &[1, 2, 5, 10, 20],
            Self::Month => &[1, 2, 3, 6],
            Self::Year | Self::Decade | Self::Century | Self::Millennium => &[1, 2, 5],
        }
    }

    /// Calendar-year units cannot honour a caller-fixed spacing.
    #[must_use]
    pub fn supports_manual_spacing(self) -> bool {
        self < Self::Year
    }

    fn years_per_unit(self) -> Option<i64> {
        match self {
            Self::Year => Some(1),
            Self::Decade => Some(10),
            Self::Century => Some(100),
            Self::Millennium => Some(1000),
            _ => None,
        }
    }

    fn millis_per_unit(self) -> Option<i64> {
        match self {
            Self::Millisecond => Some(1),
            Self::Centisecond => Some(10),
            Self::Decisecond => Some(100),
            _ => None,
        }
    }
}

/// Strategy for one calendar unit: floor, increment, label and enumerate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeUnit {
    kind: CalendarUnitKind,
    locale: AxisLabelLocale,
    multipliers: SmallVec<[u32; 6]>,
    manual_spacing: bool,
}

impl DateTimeUnit {
    /// Builds the strategy for `kind`.
    ///
    /// A `manual_spacing` replaces the unit's multiplier search with exactly
    /// that multiplier; calendar-year units reject it.
    pub fn new(
        kind: CalendarUnitKind,
        locale: AxisLabelLocale,
        manual_spacing: Option<u32>,
    ) -> AxisResult<Self> {
        let multipliers = match manual_spacing {
            Some(_) if !kind.supports_manual_spacing() => {
                return Err(AxisError::UnsupportedSpacing { unit: kind });
            }
            Some(0) => {
                return Err(AxisError::InvalidConfiguration(
                    "manual date/time spacing must be >= 1".to_owned(),
                ));
            }
            Some(spacing) => SmallVec::from_slice(&[spacing]),
            None => SmallVec::from_slice(kind.allowed_multipliers()),
        };

        Ok(Self {
            kind,
            locale,
            multipliers,
            manual_spacing: manual_spacing.is_some(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> CalendarUnitKind {
        self.kind
    }

    #[must_use]
    pub fn locale(&self) -> AxisLabelLocale {
        self.locale
    }

    #[must_use]
    pub fn multipliers(&self) -> &[u32] {
        &self.multipliers
    }

    #[must_use]
    pub fn has_manual_spacing(&self) -> bool {
        self.manual_spacing
    }

    /// Rounds `instant` down to the start of the unit containing it.
    #[must_use]
    pub fn floor(&self, instant: NaiveDateTime) -> NaiveDateTime {
        let instant = clamp_instant(instant);
        let date = instant.date();

        if let Some(millis) = self.kind.millis_per_unit() {
            let nanos_per_unit = (millis as u32) * 1_000_000;
            let nanos = instant.nanosecond().min(999_999_999);
            return instant
                .with_nanosecond(nanos / nanos_per_unit * nanos_per_unit)
                .unwrap_or(instant);
        }

        if let Some(years) = self.kind.years_per_unit() {
            let year = i64::from(instant.year());
            return start_of_year(year - year.rem_euclid(years));
        }

        let time = match self.kind {
            CalendarUnitKind::Second => {
                NaiveTime::from_hms_opt(instant.hour(), instant.minute(), instant.second())
            }
            CalendarUnitKind::Minute => NaiveTime::from_hms_opt(instant.hour(), instant.minute(), 0),
            CalendarUnitKind::Hour => NaiveTime::from_hms_opt(instant.hour(), 0, 0),
            CalendarUnitKind::Day => Some(NaiveTime::default()),
            CalendarUnitKind::Month => {
                return date
                    .with_day(1)
                    .map(|first| first.and_time(NaiveTime::default()))
                    .unwrap_or(instant);
            }
            _ => None,
        };
        time.map(|time| date.and_time(time)).unwrap_or(instant)
    }

    /// Advances `instant` by `delta * multiplier` units.
    ///
    /// Returns `None` when the result would leave the representable range.
    #[must_use]
    pub fn increment(
        &self,
        instant: NaiveDateTime,
        delta: i64,
        multiplier: u32,
    ) -> Option<NaiveDateTime> {
        let units = delta.checked_mul(i64::from(multiplier))?;

        let next = if let Some(millis) = self.kind.millis_per_unit() {
            instant.checked_add_signed(TimeDelta::try_milliseconds(units.checked_mul(millis)?)?)?
        } else if let Some(years) = self.kind.years_per_unit() {
            add_months(instant, units.checked_mul(years)?.checked_mul(12)?)?
        } else {
            match self.kind {
                CalendarUnitKind::Second => {
                    instant.checked_add_signed(TimeDelta::try_seconds(units)?)?
                }
                CalendarUnitKind::Minute => {
                    instant.checked_add_signed(TimeDelta::try_minutes(units)?)?
                }
                CalendarUnitKind::Hour => instant.checked_add_signed(TimeDelta::try_hours(units)?)?,
                CalendarUnitKind::Day => instant.checked_add_signed(TimeDelta::try_days(units)?)?,
                CalendarUnitKind::Month => add_months(instant, units)?,
                _ => return None,
            }
        };

        is_representable(next).then_some(next)
    }

    /// Two-line tick label; the second line is a single space when unused so
    /// every label of a tick set has the same height.
    #[must_use]
    pub fn format_label(&self, instant: NaiveDateTime) -> String {
        let locale = self.locale;
        let date = instant.format(locale.date_pattern());
        let separator = locale.decimal_separator();
        let millis = instant.nanosecond().min(999_999_999) / 1_000_000;

        match self.kind {
            CalendarUnitKind::Millisecond => format!(
                "{}{separator}{millis:03}\n{date}",
                instant.format("%H:%M:%S")
            ),
            CalendarUnitKind::Centisecond => format!(
                "{}{separator}{:02}\n{date}",
                instant.format("%H:%M:%S"),
                millis / 10
            ),
            CalendarUnitKind::Decisecond => format!(
                "{}{separator}{}\n{date}",
                instant.format("%H:%M:%S"),
                millis / 100
            ),
            CalendarUnitKind::Second => format!("{}\n{date}", instant.format("%H:%M:%S")),
            CalendarUnitKind::Minute | CalendarUnitKind::Hour => {
                format!("{}\n{date}", instant.format("%H:%M"))
            }
            CalendarUnitKind::Day => format!("{date}\n "),
            CalendarUnitKind::Month => format!(
                "{}\n{}",
                locale.month_abbreviation(instant.month()),
                instant.format("%Y")
            ),
            CalendarUnitKind::Year
            | CalendarUnitKind::Decade
            | CalendarUnitKind::Century
            | CalendarUnitKind::Millennium => format!("{}\n ", instant.format("%Y")),
        }
    }

    /// Ticks inside `[from, to]`, ascending, starting from `floor(from)`.
    #[must_use]
    pub fn enumerate_ticks(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        multiplier: u32,
    ) -> Vec<NaiveDateTime> {
        self.enumerate_ticks_limited(from, to, multiplier, MAX_ENUMERATED_TICKS)
    }

    /// Like [`Self::enumerate_ticks`] but stops after `max_ticks` ticks.
    ///
    /// A degenerate range yields the floored instant alone. A zero multiplier
    /// is treated as one.
    #[must_use]
    pub fn enumerate_ticks_limited(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        multiplier: u32,
        max_ticks: usize,
    ) -> Vec<NaiveDateTime> {
        let multiplier = multiplier.max(1);
        let max_ticks = max_ticks.clamp(1, MAX_ENUMERATED_TICKS);
        let (from, to) = (clamp_instant(from.min(to)), clamp_instant(from.max(to)));

        if from == to {
            return vec![self.floor(from)];
        }

        let Some(mut current) = self.enumeration_start(from, multiplier) else {
            return Vec::new();
        };
        let mut ticks = Vec::new();
        while current <= to {
            if current >= from {
                ticks.push(current);
                if ticks.len() >= max_ticks {
                    break;
                }
            }
            match self.increment(current, 1, multiplier) {
                Some(next) if next > current => current = next,
                _ => break,
            }
        }
        ticks
    }
}

impl DateTimeUnit {
    /// `floor(from)`, except that a year-based boundary falling on year zero
    /// moves to the next boundary so later ticks stay aligned.
    fn enumeration_start(&self, from: NaiveDateTime, multiplier: u32) -> Option<NaiveDateTime> {
        let Some(years) = self.kind.years_per_unit() else {
            return Some(self.floor(from));
        };
        let year = i64::from(from.year());
        let boundary = year - year.rem_euclid(years);
        if boundary >= i64::from(MIN_YEAR) {
            return Some(start_of_year(boundary));
        }
        let next = boundary + years * i64::from(multiplier);
        (next <= i64::from(MAX_YEAR)).then(|| start_of_year(next))
    }
}

fn start_of_year(year: i64) -> NaiveDateTime {
    let year = year.clamp(i64::from(MIN_YEAR), i64::from(MAX_YEAR)) as i32;
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| date.and_time(NaiveTime::default()))
        .unwrap_or_else(min_instant)
}

fn add_months(instant: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        instant.checked_add_months(magnitude)
    } else {
        instant.checked_sub_months(magnitude)
    }
}

/// Ordered set of unit strategies the selector walks, finest first.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitRegistry {
    units: IndexMap<CalendarUnitKind, DateTimeUnit>,
}

impl UnitRegistry {
    /// Every built-in unit with its default multipliers.
    #[must_use]
    pub fn standard(locale: AxisLabelLocale) -> Self {
        let mut registry = Self::empty();
        for kind in CalendarUnitKind::ALL {
            if let Ok(unit) = DateTimeUnit::new(kind, locale, None) {
                registry.insert(unit);
            }
        }
        registry
    }

    /// Units that accept a fixed spacing, each pinned to `spacing`.
    pub fn with_manual_spacing(locale: AxisLabelLocale, spacing: u32) -> AxisResult<Self> {
        let mut registry = Self::empty();
        for kind in CalendarUnitKind::ALL
            .into_iter()
            .filter(|kind| kind.supports_manual_spacing())
        {
            registry.insert(DateTimeUnit::new(kind, locale, Some(spacing))?);
        }
        Ok(registry)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            units: IndexMap::new(),
        }
    }

    /// Adds or replaces the strategy for `unit.kind()`, keeping granularity order.
    pub fn insert(&mut self, unit: DateTimeUnit) {
        self.units.insert(unit.kind(), unit);
        self.units.sort_keys();
    }

    #[must_use]
    pub fn get(&self, kind: CalendarUnitKind) -> Option<&DateTimeUnit> {
        self.units.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateTimeUnit> {
        self.units.values()
    }

    #[must_use]
    pub fn coarsest(&self) -> Option<&DateTimeUnit> {
        self.units.last().map(|(_, unit)| unit)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
