//! Temporal normalization.
//!
//! Every date, time and duration that reaches the wire is expressed as a
//! float64 count of milliseconds: since the Unix epoch for datetime-like
//! values, as an absolute length for timedelta-like values. "Not a time"
//! becomes NaN.
//!
//! ```rust
//! use arraywire::temporal::{to_epoch_millis, TemporalValue};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
//! assert_eq!(to_epoch_millis(&TemporalValue::Date(day)).unwrap(), 86_400_000.0);
//! ```

mod normalize;
mod types;

pub use normalize::normalize_array;
pub(crate) use normalize::normalize_ndarray;
pub use types::{Datetime64, TemporalKind, TemporalValue, Timedelta64, TimeUnit, NAT};

#[cfg(feature = "columnar")]
pub use types::{Period, PeriodFreq, Timedelta, Timestamp};

use std::sync::OnceLock;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::error::{Result, WireError};

/// Returns the set of kinds treated as datetime-like.
///
/// Built once per process from the compiled feature set.
pub fn recognized_datetime_kinds() -> &'static [TemporalKind] {
    static KINDS: OnceLock<Vec<TemporalKind>> = OnceLock::new();
    KINDS.get_or_init(|| {
        #[allow(unused_mut)]
        let mut kinds = vec![
            TemporalKind::Date,
            TemporalKind::Time,
            TemporalKind::DateTime,
            TemporalKind::DateTimeTz,
            TemporalKind::Datetime64,
        ];
        #[cfg(feature = "columnar")]
        kinds.extend([
            TemporalKind::Timestamp,
            TemporalKind::Period,
            TemporalKind::NaT,
        ]);
        kinds
    })
}

/// Returns true if `value` is a date, time, datetime or timestamp-like value.
pub fn is_datetime_like(value: &TemporalValue) -> bool {
    recognized_datetime_kinds().contains(&value.kind())
}

/// Returns true if `value` is a duration.
pub fn is_timedelta_like(value: &TemporalValue) -> bool {
    match value {
        TemporalValue::TimeDelta(_) | TemporalValue::Timedelta64(_) => true,
        #[cfg(feature = "columnar")]
        TemporalValue::Timedelta(_) => true,
        _ => false,
    }
}

/// Converts a datetime-like value to float milliseconds since the epoch.
///
/// Time-of-day values convert to milliseconds since midnight. Offset-aware
/// datetimes keep their wall clock; the offset is discarded.
///
/// # Errors
/// - `WireError::UnrecognizedValue` for native durations and timedelta64
///   elements (use [`to_epoch_millis_duration`])
/// - `WireError::OutOfRange` for periods starting outside the timestamp range
pub fn to_epoch_millis(value: &TemporalValue) -> Result<f64> {
    match value {
        #[cfg(feature = "columnar")]
        TemporalValue::NaT => Ok(f64::NAN),
        #[cfg(feature = "columnar")]
        TemporalValue::Period(period) => Ok(nanos_to_millis(period.to_timestamp()?.as_nanos())),
        #[cfg(feature = "columnar")]
        TemporalValue::Timestamp(ts) => Ok(nanos_to_millis(ts.as_nanos())),
        #[cfg(feature = "columnar")]
        TemporalValue::Timedelta(td) => Ok(nanos_to_millis(td.as_nanos())),
        TemporalValue::DateTime(dt) => Ok(naive_millis(dt)),
        TemporalValue::DateTimeTz(dt) => Ok(naive_millis(&dt.naive_local())),
        TemporalValue::Date(date) => Ok(naive_millis(&date.and_time(NaiveTime::MIN))),
        TemporalValue::Datetime64(v) => Ok(v.unit.to_millis(v.value)),
        TemporalValue::Time(time) => Ok(time_of_day_millis(time)),
        TemporalValue::TimeDelta(_) | TemporalValue::Timedelta64(_) => {
            Err(WireError::unrecognized("datetime", value))
        }
    }
}

/// Converts a duration to float milliseconds.
///
/// # Errors
/// Returns `WireError::UnrecognizedValue` for anything that is not a
/// duration.
pub fn to_epoch_millis_duration(value: &TemporalValue) -> Result<f64> {
    match value {
        TemporalValue::TimeDelta(delta) => Ok(delta_millis(delta)),
        TemporalValue::Timedelta64(v) => Ok(v.unit.to_millis(v.value)),
        #[cfg(feature = "columnar")]
        TemporalValue::Timedelta(td) => Ok(nanos_to_millis(td.as_nanos())),
        _ => Err(WireError::unrecognized("timedelta", value)),
    }
}

fn nanos_to_millis(nanos: i64) -> f64 {
    nanos as f64 / 1e6
}

/// Milliseconds since the epoch at microsecond resolution.
fn naive_millis(dt: &NaiveDateTime) -> f64 {
    dt.and_utc().timestamp_micros() as f64 / 1000.0
}

/// Total milliseconds at microsecond resolution.
fn delta_millis(delta: &TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1000.0,
        None => delta.num_milliseconds() as f64,
    }
}

fn time_of_day_millis(time: &NaiveTime) -> f64 {
    let whole = (time.hour() * 3600 + time.minute() * 60 + time.second()) as f64 * 1000.0;
    // Leap seconds carry nanosecond() >= 1e9
    whole + (time.nanosecond() / 1000) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    fn datetime(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, us: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, us)
            .unwrap()
    }

    #[test]
    fn test_datetime_millis() {
        let dt = datetime(2017, 1, 1, 0, 0, 0, 0);
        assert_eq!(
            to_epoch_millis(&TemporalValue::DateTime(dt)).unwrap(),
            1_483_228_800_000.0
        );
    }

    #[test]
    fn test_datetime_before_epoch() {
        let dt = datetime(1969, 12, 31, 23, 59, 59, 500_000);
        assert_eq!(to_epoch_millis(&TemporalValue::DateTime(dt)).unwrap(), -500.0);
    }

    #[test]
    fn test_offset_datetime_keeps_wall_clock() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let aware = tz.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            to_epoch_millis(&TemporalValue::DateTimeTz(aware)).unwrap(),
            1_483_228_800_000.0
        );
    }

    #[test]
    fn test_date_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        assert_eq!(
            to_epoch_millis(&TemporalValue::Date(date)).unwrap(),
            1_483_228_800_000.0
        );
    }

    #[test]
    fn test_time_of_day() {
        let time = NaiveTime::from_hms_micro_opt(1, 2, 3, 4_500).unwrap();
        assert_eq!(
            to_epoch_millis(&TemporalValue::Time(time)).unwrap(),
            3_723_004.5
        );
    }

    #[test]
    fn test_datetime64_units() {
        let ms = Datetime64::new(1_483_228_800_000, TimeUnit::Millisecond);
        let s = Datetime64::new(1_483_228_800, TimeUnit::Second);
        assert_eq!(to_epoch_millis(&ms.into()).unwrap(), 1_483_228_800_000.0);
        assert_eq!(to_epoch_millis(&s.into()).unwrap(), 1_483_228_800_000.0);
        assert!(to_epoch_millis(&Datetime64::nat(TimeUnit::Second).into())
            .unwrap()
            .is_nan());
    }

    #[test]
    fn test_durations_rejected_as_datetimes() {
        let err = to_epoch_millis(&TemporalValue::TimeDelta(TimeDelta::seconds(1))).unwrap_err();
        assert!(err.is_unrecognized());

        let td = Timedelta64::new(5, TimeUnit::Second);
        assert!(to_epoch_millis(&td.into()).unwrap_err().is_unrecognized());
    }

    #[test]
    fn test_duration_millis() {
        let delta = TimeDelta::days(1) + TimeDelta::microseconds(1500);
        assert_eq!(
            to_epoch_millis_duration(&TemporalValue::TimeDelta(delta)).unwrap(),
            86_400_001.5
        );
        let td = Timedelta64::new(-3, TimeUnit::Minute);
        assert_eq!(to_epoch_millis_duration(&td.into()).unwrap(), -180_000.0);
    }

    #[test]
    fn test_duration_rejects_datetimes() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        let err = to_epoch_millis_duration(&TemporalValue::Date(date)).unwrap_err();
        assert!(matches!(
            err,
            WireError::UnrecognizedValue { expected: "timedelta", .. }
        ));
    }

    #[test]
    fn test_kind_predicates() {
        let date = TemporalValue::Date(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap());
        let delta = TemporalValue::TimeDelta(TimeDelta::hours(2));
        assert!(is_datetime_like(&date));
        assert!(!is_timedelta_like(&date));
        assert!(is_timedelta_like(&delta));
        assert!(!is_datetime_like(&delta));
    }

    #[test]
    fn test_recognized_kinds_built_once() {
        let first = recognized_datetime_kinds().as_ptr();
        let second = recognized_datetime_kinds().as_ptr();
        assert_eq!(first, second);
    }

    #[cfg(feature = "columnar")]
    #[test]
    fn test_columnar_variants() {
        assert!(to_epoch_millis(&TemporalValue::NaT).unwrap().is_nan());
        assert!(is_datetime_like(&TemporalValue::NaT));

        let ts = Timestamp::from_nanos(1_483_228_800_123_456_789);
        let millis = to_epoch_millis(&ts.into()).unwrap();
        assert!((millis - 1_483_228_800_123.457).abs() < 1e-3);

        let period = Period::new(47, PeriodFreq::Annual);
        assert_eq!(
            to_epoch_millis(&period.into()).unwrap(),
            1_483_228_800_000.0
        );

        let td = Timedelta::from_nanos(2_000_000);
        assert!(is_timedelta_like(&td.into()));
        assert_eq!(to_epoch_millis(&td.into()).unwrap(), 2.0);
        assert_eq!(to_epoch_millis_duration(&td.into()).unwrap(), 2.0);
    }
}
