use chart_axis::AxisError;
use chart_axis::core::unit_selector::select_from_registry;
use chart_axis::core::{
    AxisLabelLocale, CalendarUnitKind, DateTimeSpacing, DateTimeUnit, UnitRegistry, select_unit,
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid instant")
}

#[test]
fn two_day_range_with_ten_ticks_selects_hours() {
    let selection = select_unit(
        at(2021, 6, 1, 0, 0),
        at(2021, 6, 3, 0, 0),
        10,
        AxisLabelLocale::EnUs,
        None,
    )
    .expect("selection");
    assert_eq!(selection.kind(), CalendarUnitKind::Hour);
    assert!(selection.fits_budget);
    assert!(selection.tick_count <= 10);
    assert_eq!(
        selection.ticks(at(2021, 6, 1, 0, 0), at(2021, 6, 3, 0, 0)).len(),
        selection.tick_count
    );
}

#[test]
fn four_centuries_with_five_ticks_select_century() {
    let from = at(1900, 1, 1, 0, 0);
    let to = at(2300, 1, 1, 0, 0);
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
fn zero_tick_budget_behaves_like_one() {
    let from = at(2000, 1, 1, 0, 0);
    let to = at(2000, 1, 1, 6, 0);
    let zero = select_unit(from, to, 0, AxisLabelLocale::EnUs, None).expect("selection");
    let one = select_unit(from, to, 1, AxisLabelLocale::EnUs, None).expect("selection");
    assert_eq!(zero, one);
    assert!(zero.tick_count <= 1);
}

#[test]
fn degenerate_range_yields_floored_instant() {
    let instant = at(2015, 8, 20, 13, 37);
    let selection = select_unit(instant, instant, 7, AxisLabelLocale::EnUs, None)
        .expect("selection");
    let ticks = selection.ticks(instant, instant);
    assert_eq!(ticks.len(), 1);
    assert!(ticks[0] <= instant);
}

#[test]
fn manual_spacing_pins_multiplier() {
    let from = at(2021, 6, 1, 0, 0);
    let to = at(2021, 6, 1, 6, 0);
    let selection = select_unit(
        from,
        to,
        30,
        AxisLabelLocale::EnUs,
        Some(DateTimeSpacing::new(15)),
    )
    .expect("selection");
    assert_eq!(selection.kind(), CalendarUnitKind::Minute);
    assert_eq!(selection.multiplier, 15);
    assert_eq!(selection.tick_count, 25);
}

#[test]
fn pinned_unit_that_cannot_fit_falls_back_with_flag() {
    let selection = select_unit(
        at(2000, 1, 1, 0, 0),
        at(2010, 1, 1, 0, 0),
        3,
        AxisLabelLocale::EnUs,
        Some(DateTimeSpacing::with_unit(CalendarUnitKind::Day, 7)),
    )
    .expect("selection");
    assert_eq!(selection.kind(), CalendarUnitKind::Day);
    assert_eq!(selection.multiplier, 7);
    assert!(!selection.fits_budget);
    assert!(selection.tick_count > 3);
}

#[test]
fn spacing_on_calendar_years_is_rejected() {
    for unit in [
        CalendarUnitKind::Year,
        CalendarUnitKind::Decade,
        CalendarUnitKind::Century,
        CalendarUnitKind::Millennium,
    ] {
        let err = select_unit(
            at(2000, 1, 1, 0, 0),
            at(2100, 1, 1, 0, 0),
            5,
            AxisLabelLocale::EnUs,
            Some(DateTimeSpacing::with_unit(unit, 2)),
        )
        .expect_err("spacing must be rejected");
        assert!(matches!(err, AxisError::UnsupportedSpacing { unit: rejected } if rejected == unit));
    }
}

#[test]
fn custom_registry_limits_candidate_units() {
    let mut registry = UnitRegistry::empty();
    registry.insert(
        DateTimeUnit::new(CalendarUnitKind::Month, AxisLabelLocale::EsEs, None).expect("unit"),
    );
    registry.insert(
        DateTimeUnit::new(CalendarUnitKind::Day, AxisLabelLocale::EsEs, None).expect("unit"),
    );
    let kinds: Vec<CalendarUnitKind> = registry.iter().map(DateTimeUnit::kind).collect();
    assert_eq!(kinds, vec![CalendarUnitKind::Day, CalendarUnitKind::Month]);

    let from = at(2020, 1, 1, 0, 0);
    let to = at(2020, 12, 31, 0, 0);
    let selection = select_from_registry(&registry, from, to, 6).expect("selection");
    assert_eq!(selection.kind(), CalendarUnitKind::Month);
    assert_eq!(selection.multiplier, 2);

    let label = selection.unit.format_label(at(2020, 4, 1, 0, 0));
    assert_eq!(label, "abr\n2020");
}

#[test]
fn empty_registry_is_a_configuration_error() {
    let err = select_from_registry(
        &UnitRegistry::empty(),
        at(2020, 1, 1, 0, 0),
        at(2021, 1, 1, 0, 0),
        5,
    )
    .expect_err("empty registry");
    assert!(matches!(err, AxisError::InvalidConfiguration(_)));
}
