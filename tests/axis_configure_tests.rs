use chart_axis::api::{Axis, AxisConfigureOptions};
use chart_axis::core::{
    AxisLabelLocale, AxisLimits, CalendarUnitKind, DateTimeSpacing, Edge, NumericFormat,
    PlotDimensions,
};
use chart_axis::render::{Color, NullRenderer};
use chart_axis::AxisError;

fn dims() -> PlotDimensions {
    let limits = AxisLimits::new(0.0, 100.0, 0.0, 1.0).expect("limits");
    PlotDimensions::new((500.0, 300.0), (400.0, 200.0), (60.0, 40.0), limits).expect("dims")
}

#[test]
fn absent_options_are_left_untouched() {
    let mut axis = Axis::new(Edge::Bottom);
    axis.configure(AxisConfigureOptions {
        show_minor_ticks: Some(false),
        radix: Some(16),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");
    axis.configure(AxisConfigureOptions {
        prefix: Some("0x".to_owned()),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");

    let ticks = axis.ticks();
    assert!(!ticks.show_minor_ticks);
    assert!(ticks.show_major_ticks);
    assert_eq!(ticks.config.radix, 16);
    assert_eq!(ticks.config.prefix, "0x");
    assert!(axis.title().visible);
    assert!(axis.line().visible);
}

#[test]
fn invalid_option_rejects_the_whole_set() {
    let mut axis = Axis::new(Edge::Bottom);
    let before = axis.ticks().clone();

    let err = axis
        .configure(AxisConfigureOptions {
            show_title: Some(false),
            show_labels: Some(false),
            radix: Some(1),
            ..AxisConfigureOptions::default()
        })
        .expect_err("radix 1 must be rejected");

    assert!(matches!(err, AxisError::InvalidConfiguration(_)));
    assert!(axis.title().visible);
    assert_eq!(axis.ticks(), &before);
}

#[test]
fn bad_format_strings_are_rejected_before_assignment() {
    let mut axis = Axis::new(Edge::Bottom);
    for options in [
        AxisConfigureOptions {
            numeric_format_string: Some("Q4".to_owned()),
            show_line: Some(false),
            ..AxisConfigureOptions::default()
        },
        AxisConfigureOptions {
            date_time_format_string: Some("%Q".to_owned()),
            show_line: Some(false),
            ..AxisConfigureOptions::default()
        },
        AxisConfigureOptions {
            font_size: Some(0.0),
            show_line: Some(false),
            ..AxisConfigureOptions::default()
        },
        AxisConfigureOptions {
            rotation: Some(f64::NAN),
            show_line: Some(false),
            ..AxisConfigureOptions::default()
        },
    ] {
        assert!(axis.configure(options).is_err());
        assert!(axis.line().visible);
    }
}

#[test]
fn manual_spacing_on_year_units_is_unsupported() {
    let mut axis = Axis::new(Edge::Bottom);
    let err = axis
        .configure(AxisConfigureOptions {
            date_time: Some(true),
            date_time_manual_spacing: Some(Some(DateTimeSpacing::with_unit(
                CalendarUnitKind::Year,
                2,
            ))),
            ..AxisConfigureOptions::default()
        })
        .expect_err("year spacing");
    assert!(matches!(
        err,
        AxisError::UnsupportedSpacing {
            unit: CalendarUnitKind::Year
        }
    ));
    assert!(!axis.ticks().config.date_time);
}

#[test]
fn configure_does_not_recalculate_but_next_render_does() {
    let mut axis = Axis::new(Edge::Bottom);
    let mut renderer = NullRenderer::default();
    axis.render(&dims(), &mut renderer).expect("render");
    assert_eq!(axis.recalculation_count(), 1);

    axis.configure(AxisConfigureOptions {
        invert_sign: Some(true),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");
    assert_eq!(axis.recalculation_count(), 1);

    axis.render(&dims(), &mut renderer).expect("render");
    assert_eq!(axis.recalculation_count(), 2);
    let labels: Vec<&str> = axis
        .ticks()
        .collection()
        .major_ticks()
        .iter()
        .map(|tick| tick.label.as_str())
        .collect();
    assert!(labels.iter().skip(1).all(|label| label.starts_with('-')));
}

#[test]
fn visibility_only_changes_keep_the_cache() {
    let mut axis = Axis::new(Edge::Bottom);
    let mut renderer = NullRenderer::default();
    axis.render(&dims(), &mut renderer).expect("render");

    axis.configure(AxisConfigureOptions {
        show_title: Some(false),
        show_line: Some(false),
        ruler_mode: Some(true),
        color: Some(Color::rgb(0.2, 0.4, 0.6)),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");
    axis.render(&dims(), &mut renderer).expect("render");

    assert_eq!(axis.recalculation_count(), 1);
    assert_eq!(renderer.last_line_count, 0);
    assert_eq!(axis.line().color, Color::rgb(0.2, 0.4, 0.6));
}

#[test]
fn json_options_are_applied() {
    let options = AxisConfigureOptions::from_json_str(
        r#"{
            "show_major_ticks": false,
            "numeric_format_string": "N1",
            "locale": "EsEs",
            "font_name": "Serif",
            "font_size": 10.5,
            "date_time_manual_spacing": { "unit": "Minute", "multiplier": 15 }
        }"#,
    )
    .expect("json options");

    let mut axis = Axis::new(Edge::Left);
    axis.configure(options).expect("configure");

    let ticks = axis.ticks();
    assert!(!ticks.show_major_ticks);
    assert_eq!(ticks.config.numeric_format, Some(NumericFormat::Number(1)));
    assert_eq!(ticks.config.locale, AxisLabelLocale::EsEs);
    assert_eq!(ticks.font.family, "Serif");
    assert_eq!(ticks.font.size_px, 10.5);
    assert_eq!(
        ticks.config.date_time_spacing,
        Some(DateTimeSpacing::with_unit(CalendarUnitKind::Minute, 15))
    );
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = AxisConfigureOptions::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, AxisError::Serialization(_)));
}

#[test]
fn empty_format_string_clears_numeric_format() {
    let mut axis = Axis::new(Edge::Bottom);
    axis.configure(AxisConfigureOptions {
        numeric_format_string: Some("P0".to_owned()),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");
    assert_eq!(axis.ticks().config.numeric_format, Some(NumericFormat::Percent(0)));

    axis.configure(AxisConfigureOptions {
        numeric_format_string: Some(String::new()),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");
    assert_eq!(axis.ticks().config.numeric_format, None);
}

#[test]
fn manual_date_spacing_can_be_cleared() {
    let mut axis = Axis::new(Edge::Bottom);
    axis.configure(AxisConfigureOptions {
        date_time_manual_spacing: Some(Some(DateTimeSpacing::new(15))),
        ..AxisConfigureOptions::default()
    })
    .expect("configure");
    assert_eq!(axis.ticks().config.date_time_spacing, Some(DateTimeSpacing::new(15)));

    let untouched = AxisConfigureOptions::from_json_str(r#"{ "show_line": true }"#).expect("json");
    assert_eq!(untouched.date_time_manual_spacing, None);
    axis.configure(untouched).expect("configure");
    assert_eq!(axis.ticks().config.date_time_spacing, Some(DateTimeSpacing::new(15)));

    let cleared = AxisConfigureOptions::from_json_str(r#"{ "date_time_manual_spacing": null }"#)
        .expect("json");
    assert_eq!(cleared.date_time_manual_spacing, Some(None));
    axis.configure(cleared).expect("configure");
    assert_eq!(axis.ticks().config.date_time_spacing, None);

    let zero = axis.configure(AxisConfigureOptions {
        date_time_manual_spacing: Some(Some(DateTimeSpacing::new(0))),
        ..AxisConfigureOptions::default()
    });
    assert!(matches!(zero, Err(AxisError::InvalidConfiguration(_))));
    assert_eq!(axis.ticks().config.date_time_spacing, None);
}
