use chart_axis::core::{
    AxisLabelLocale, CalendarUnitKind, DateTimeUnit, MAX_ENUMERATED_TICKS, unix_seconds_to_instant,
};
use chrono::{Datelike, Timelike};
use proptest::prelude::*;

// Unix seconds of 0001-01-01 and 9999-12-31.
const FIRST_SECOND: i64 = -62_135_596_800;
const LAST_SECOND: i64 = 253_402_300_799;

fn any_unit() -> impl Strategy<Value = CalendarUnitKind> {
    proptest::sample::select(CalendarUnitKind::ALL.to_vec())
}

fn any_year_based_unit() -> impl Strategy<Value = (CalendarUnitKind, i32)> {
    proptest::sample::select(vec![
        (CalendarUnitKind::Year, 1),
        (CalendarUnitKind::Decade, 10),
        (CalendarUnitKind::Century, 100),
        (CalendarUnitKind::Millennium, 1000),
    ])
}

fn unit(kind: CalendarUnitKind) -> DateTimeUnit {
    DateTimeUnit::new(kind, AxisLabelLocale::EnUs, None).expect("unit")
}

proptest! {
    #[test]
    fn floor_is_idempotent_and_never_later(
        kind in any_unit(),
        seconds in FIRST_SECOND..LAST_SECOND,
        millis in 0u32..1000,
    ) {
        let instant = unix_seconds_to_instant(seconds as f64 + f64::from(millis) / 1000.0);
        let unit = unit(kind);
        let floored = unit.floor(instant);

        prop_assert!(floored <= instant);
        prop_assert_eq!(unit.floor(floored), floored);
    }

    #[test]
    fn enumeration_is_ascending_and_inside_range(
        kind in any_unit(),
        from in FIRST_SECOND..LAST_SECOND,
        span in 0i64..5_000_000_000,
        multiplier_index in 0usize..6,
    ) {
        let unit = unit(kind);
        let multipliers = unit.multipliers();
        let multiplier = multipliers[multiplier_index % multipliers.len()];
        let to = (from + span).min(LAST_SECOND);
        let from_instant = unix_seconds_to_instant(from as f64);
        let to_instant = unix_seconds_to_instant(to as f64);

        let ticks = unit.enumerate_ticks_limited(from_instant, to_instant, multiplier, 64);

        prop_assert!(!ticks.is_empty() || from_instant < to_instant);
        prop_assert!(ticks.len() <= 64);
        prop_assert!(ticks.len() <= MAX_ENUMERATED_TICKS);
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        if from_instant < to_instant {
            prop_assert!(ticks.iter().all(|tick| *tick >= from_instant && *tick <= to_instant));
        }
    }

    #[test]
    fn year_based_ticks_land_on_unit_boundaries(
        (kind, years) in any_year_based_unit(),
        from in FIRST_SECOND..LAST_SECOND,
        span in 0i64..LAST_SECOND - FIRST_SECOND,
        multiplier_index in 0usize..3,
    ) {
        let unit = unit(kind);
        let multiplier = unit.multipliers()[multiplier_index % unit.multipliers().len()];
        let to = from.saturating_add(span).min(LAST_SECOND);
        let from_instant = unix_seconds_to_instant(from as f64);
        let to_instant = unix_seconds_to_instant(to as f64);
        prop_assume!(from_instant < to_instant);

        for tick in unit.enumerate_ticks_limited(from_instant, to_instant, multiplier, 64) {
            prop_assert_eq!(tick.year() % years, 0, "{:?} tick {}", kind, tick);
            prop_assert_eq!((tick.month(), tick.day()), (1, 1));
            prop_assert_eq!(tick.num_seconds_from_midnight(), 0);
        }
    }

    #[test]
    fn labels_always_have_two_lines(
        kind in any_unit(),
        seconds in FIRST_SECOND..LAST_SECOND,
    ) {
        let instant = unix_seconds_to_instant(seconds as f64);
        let label = unit(kind).format_label(instant);
        prop_assert_eq!(label.split('\n').count(), 2);
    }
}
