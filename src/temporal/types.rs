//! Temporal value types.
//!
//! [`TemporalValue`] is the closed set of date/time/duration values the
//! normalizer understands. Variants backed by the columnar value model
//! (`Timestamp`, `Timedelta`, `Period`, `NaT`) exist only with the
//! `columnar` feature.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

#[cfg(feature = "columnar")]
use crate::error::{Result, WireError};

/// Integer payload used by datetime64/timedelta64 for "not a time".
pub const NAT: i64 = i64::MIN;

/// Resolution of a datetime64/timedelta64 value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days (`D`).
    Day,
    /// Hours (`h`).
    Hour,
    /// Minutes (`m`).
    Minute,
    /// Seconds (`s`).
    Second,
    /// Milliseconds (`ms`).
    Millisecond,
    /// Microseconds (`us`).
    Microsecond,
    /// Nanoseconds (`ns`).
    Nanosecond,
}

impl TimeUnit {
    /// Returns the unit tag used inside dtype strings, e.g. `ms`.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::Hour => "h",
            Self::Minute => "m",
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }

    /// Parses a unit tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "D" => Self::Day,
            "h" => Self::Hour,
            "m" => Self::Minute,
            "s" => Self::Second,
            "ms" => Self::Millisecond,
            "us" => Self::Microsecond,
            "ns" => Self::Nanosecond,
            _ => return None,
        })
    }

    /// Converts a count of this unit to milliseconds. [`NAT`] becomes NaN.
    pub fn to_millis(&self, value: i64) -> f64 {
        if value == NAT {
            return f64::NAN;
        }
        let v = value as f64;
        match self {
            Self::Day => v * 86_400_000.0,
            Self::Hour => v * 3_600_000.0,
            Self::Minute => v * 60_000.0,
            Self::Second => v * 1000.0,
            Self::Millisecond => v,
            Self::Microsecond => v / 1000.0,
            Self::Nanosecond => v / 1_000_000.0,
        }
    }

    /// Converts a count of this unit to milliseconds after truncating to
    /// microsecond resolution (floor). [`NAT`] becomes NaN.
    pub fn to_millis_us_floor(&self, value: i64) -> f64 {
        match self {
            Self::Nanosecond if value != NAT => value.div_euclid(1000) as f64 / 1000.0,
            _ => self.to_millis(value),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single datetime64 element: a count of `unit` since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Datetime64 {
    /// Units since 1970-01-01T00:00:00.
    pub value: i64,
    /// Resolution of `value`.
    pub unit: TimeUnit,
}

impl Datetime64 {
    /// Creates a datetime64 element.
    pub const fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// Creates the "not a time" element of the given unit.
    pub const fn nat(unit: TimeUnit) -> Self {
        Self { value: NAT, unit }
    }

    /// Returns true for the "not a time" element.
    pub const fn is_nat(&self) -> bool {
        self.value == NAT
    }
}

/// A single timedelta64 element: a signed count of `unit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timedelta64 {
    /// Signed number of units.
    pub value: i64,
    /// Resolution of `value`.
    pub unit: TimeUnit,
}

impl Timedelta64 {
    /// Creates a timedelta64 element.
    pub const fn new(value: i64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// Returns true for the "not a time" element.
    pub const fn is_nat(&self) -> bool {
        self.value == NAT
    }
}

/// Nanosecond-precision instant (nanoseconds since the Unix epoch, UTC).
#[cfg(feature = "columnar")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

#[cfg(feature = "columnar")]
impl Timestamp {
    /// Creates a timestamp from nanoseconds since the epoch.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Converts a naive (UTC wall clock) datetime.
    ///
    /// Returns `None` outside the ~584 year nanosecond range.
    pub fn from_naive(datetime: NaiveDateTime) -> Option<Self> {
        datetime.and_utc().timestamp_nanos_opt().map(Self)
    }

    /// Returns nanoseconds since the epoch.
    #[inline]
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }
}

/// Nanosecond-precision signed duration.
#[cfg(feature = "columnar")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timedelta(pub i64);

#[cfg(feature = "columnar")]
impl Timedelta {
    /// Creates a duration from nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Returns the duration in nanoseconds.
    #[inline]
    pub const fn as_nanos(&self) -> i64 {
        self.0
    }
}

/// Span covered by one [`Period`].
#[cfg(feature = "columnar")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodFreq {
    /// Calendar years.
    Annual,
    /// Calendar quarters.
    Quarterly,
    /// Calendar months.
    Monthly,
    /// Days.
    Daily,
    /// Hours.
    Hourly,
    /// Minutes.
    Minutely,
    /// Seconds.
    Secondly,
    /// Milliseconds.
    Millisecond,
    /// Microseconds.
    Microsecond,
    /// Nanoseconds.
    Nanosecond,
}

#[cfg(feature = "columnar")]
impl PeriodFreq {
    /// Length of one period in nanoseconds, for fixed-length frequencies.
    const fn fixed_nanos(&self) -> Option<i64> {
        match self {
            Self::Annual | Self::Quarterly | Self::Monthly => None,
            Self::Daily => Some(86_400_000_000_000),
            Self::Hourly => Some(3_600_000_000_000),
            Self::Minutely => Some(60_000_000_000),
            Self::Secondly => Some(1_000_000_000),
            Self::Millisecond => Some(1_000_000),
            Self::Microsecond => Some(1_000),
            Self::Nanosecond => Some(1),
        }
    }
}

/// A span of time: the `ordinal`-th period of `freq` counted from the one
/// containing 1970-01-01T00:00.
///
/// # Example
/// ```
/// use arraywire::{Period, PeriodFreq};
///
/// // 1970Q2 starts on April 1st
/// let q = Period::new(1, PeriodFreq::Quarterly);
/// assert_eq!(q.to_timestamp().unwrap().as_nanos(), 7_776_000_000_000_000);
/// ```
#[cfg(feature = "columnar")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Periods since the epoch period.
    pub ordinal: i64,
    /// Period frequency.
    pub freq: PeriodFreq,
}

#[cfg(feature = "columnar")]
impl Period {
    /// Creates a period.
    pub const fn new(ordinal: i64, freq: PeriodFreq) -> Self {
        Self { ordinal, freq }
    }

    /// Returns the instant the period starts at.
    ///
    /// # Errors
    /// Returns `WireError::OutOfRange` if the start is not representable
    /// as a nanosecond timestamp.
    pub fn to_timestamp(&self) -> Result<Timestamp> {
        let out_of_range = || WireError::out_of_range(format!("{:?}", self));

        if let Some(step) = self.freq.fixed_nanos() {
            return self
                .ordinal
                .checked_mul(step)
                .map(Timestamp)
                .ok_or_else(out_of_range);
        }

        let months = match self.freq {
            PeriodFreq::Annual => self.ordinal.checked_mul(12),
            PeriodFreq::Quarterly => self.ordinal.checked_mul(3),
            _ => Some(self.ordinal),
        }
        .ok_or_else(out_of_range)?;

        let year = i32::try_from(months.div_euclid(12) + 1970).map_err(|_| out_of_range())?;
        let month = months.rem_euclid(12) as u32 + 1;

        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|date| date.and_time(NaiveTime::MIN))
            .and_then(Timestamp::from_naive)
            .ok_or_else(out_of_range)
    }
}

/// Kind tag of a [`TemporalValue`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Naive datetime.
    DateTime,
    /// Datetime with a UTC offset.
    DateTimeTz,
    /// Native duration.
    TimeDelta,
    /// datetime64 element.
    Datetime64,
    /// timedelta64 element.
    Timedelta64,
    /// Nanosecond timestamp.
    #[cfg(feature = "columnar")]
    Timestamp,
    /// Nanosecond duration.
    #[cfg(feature = "columnar")]
    Timedelta,
    /// Calendar period.
    #[cfg(feature = "columnar")]
    Period,
    /// "Not a time" sentinel.
    #[cfg(feature = "columnar")]
    NaT,
}

/// Any date, time, datetime or duration value that can be put on the wire.
#[derive(Clone, Debug, PartialEq)]
pub enum TemporalValue {
    /// Calendar date (converted at midnight).
    Date(NaiveDate),
    /// Time of day (converted to milliseconds since midnight).
    Time(NaiveTime),
    /// Naive datetime, taken as UTC.
    DateTime(NaiveDateTime),
    /// Datetime with offset; the offset is dropped and the wall clock kept.
    DateTimeTz(DateTime<FixedOffset>),
    /// Native duration.
    TimeDelta(TimeDelta),
    /// datetime64 element.
    Datetime64(Datetime64),
    /// timedelta64 element.
    Timedelta64(Timedelta64),
    /// Nanosecond timestamp.
    #[cfg(feature = "columnar")]
    Timestamp(Timestamp),
    /// Nanosecond duration.
    #[cfg(feature = "columnar")]
    Timedelta(Timedelta),
    /// Calendar period.
    #[cfg(feature = "columnar")]
    Period(Period),
    /// "Not a time".
    #[cfg(feature = "columnar")]
    NaT,
}

impl TemporalValue {
    /// Returns the kind tag of this value.
    pub fn kind(&self) -> TemporalKind {
        match self {
            Self::Date(_) => TemporalKind::Date,
            Self::Time(_) => TemporalKind::Time,
            Self::DateTime(_) => TemporalKind::DateTime,
            Self::DateTimeTz(_) => TemporalKind::DateTimeTz,
            Self::TimeDelta(_) => TemporalKind::TimeDelta,
            Self::Datetime64(_) => TemporalKind::Datetime64,
            Self::Timedelta64(_) => TemporalKind::Timedelta64,
            #[cfg(feature = "columnar")]
            Self::Timestamp(_) => TemporalKind::Timestamp,
            #[cfg(feature = "columnar")]
            Self::Timedelta(_) => TemporalKind::Timedelta,
            #[cfg(feature = "columnar")]
            Self::Period(_) => TemporalKind::Period,
            #[cfg(feature = "columnar")]
            Self::NaT => TemporalKind::NaT,
        }
    }

    /// Returns true for any "not a time" value.
    pub fn is_nat(&self) -> bool {
        match self {
            Self::Datetime64(v) => v.is_nat(),
            Self::Timedelta64(v) => v.is_nat(),
            #[cfg(feature = "columnar")]
            Self::NaT => true,
            _ => false,
        }
    }

    /// Returns true for calendar dates and everything more precise than one
    /// (datetimes and timestamps).
    pub fn is_date(&self) -> bool {
        match self {
            Self::Date(_) | Self::DateTime(_) | Self::DateTimeTz(_) => true,
            #[cfg(feature = "columnar")]
            Self::Timestamp(_) => true,
            _ => false,
        }
    }
}

impl From<NaiveDate> for TemporalValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveTime> for TemporalValue {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<NaiveDateTime> for TemporalValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for TemporalValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTimeTz(v)
    }
}

impl From<TimeDelta> for TemporalValue {
    fn from(v: TimeDelta) -> Self {
        Self::TimeDelta(v)
    }
}

impl From<Datetime64> for TemporalValue {
    fn from(v: Datetime64) -> Self {
        Self::Datetime64(v)
    }
}

impl From<Timedelta64> for TemporalValue {
    fn from(v: Timedelta64) -> Self {
        Self::Timedelta64(v)
    }
}

#[cfg(feature = "columnar")]
impl From<Timestamp> for TemporalValue {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

#[cfg(feature = "columnar")]
impl From<Timedelta> for TemporalValue {
    fn from(v: Timedelta) -> Self {
        Self::Timedelta(v)
    }
}

#[cfg(feature = "columnar")]
impl From<Period> for TemporalValue {
    fn from(v: Period) -> Self {
        Self::Period(v)
    }
}
