use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Smallest calendar year a date axis can represent.
pub const MIN_YEAR: i32 = 1;
/// Largest calendar year a date axis can represent.
pub const MAX_YEAR: i32 = 9999;

/// First representable instant (`0001-01-01T00:00:00`).
#[must_use]
pub fn min_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::default())
}

/// Last representable instant (`9999-12-31T23:59:59.999`).
#[must_use]
pub fn max_instant() -> NaiveDateTime {
    let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::default());
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
        .unwrap_or(NaiveDate::MAX)
        .and_time(time)
}

#[must_use]
pub fn is_representable(instant: NaiveDateTime) -> bool {
    instant >= min_instant() && instant <= max_instant()
}

/// Clamps an instant into the representable range.
#[must_use]
pub fn clamp_instant(instant: NaiveDateTime) -> NaiveDateTime {
    instant.clamp(min_instant(), max_instant())
}

/// Converts an instant to unix seconds with millisecond resolution.
#[must_use]
pub fn instant_to_unix_seconds(instant: NaiveDateTime) -> f64 {
    instant.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Converts unix seconds to an instant, clamped to the representable range.
///
/// Non-finite input maps to the nearest bound (`NaN` maps to the minimum).
#[must_use]
pub fn unix_seconds_to_instant(seconds: f64) -> NaiveDateTime {
    let min_ms = min_instant().and_utc().timestamp_millis();
    let max_ms = max_instant().and_utc().timestamp_millis();
    let millis = (seconds * 1000.0).round();
    let millis = if millis.is_nan() {
        min_ms
    } else {
        (millis.clamp(min_ms as f64, max_ms as f64)) as i64
    };
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .unwrap_or_else(min_instant)
}
