//! Array-level temporal normalization.
//!
//! datetime64 and timedelta64 arrays become float64 milliseconds.
//! Object arrays that start with a date are converted on a best-effort
//! basis: if any element cannot be read as an instant the array is left
//! as it was.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use ndarray::ArrayD;
use tracing::debug;

use crate::array::{ArrayData, ArrayLike, NdArray, ObjectValue};
use crate::temporal::TemporalValue;

/// Why an object element could not be cast to an instant.
#[derive(Debug)]
struct CastError(String);

/// Normalizes the temporal content of an array.
///
/// Non-array input is returned unchanged.
///
/// ```rust
/// use arraywire::{normalize_array, ArrayLike, ObjectValue};
///
/// let scalar = ArrayLike::Scalar(ObjectValue::Int(7));
/// assert_eq!(normalize_array(scalar.clone()), scalar);
/// ```
pub fn normalize_array(value: ArrayLike) -> ArrayLike {
    match value {
        ArrayLike::Array(array) => ArrayLike::Array(normalize_ndarray(array)),
        other => other,
    }
}

/// Normalizes an [`NdArray`], carrying any mask through.
pub(crate) fn normalize_ndarray(array: NdArray) -> NdArray {
    let (data, mask) = array.into_parts();

    let data = match data {
        ArrayData::DateTime64(values, unit) | ArrayData::TimeDelta64(values, unit) => {
            ArrayData::Float64(values.mapv(|v| unit.to_millis_us_floor(v)))
        }
        ArrayData::Object(values) if starts_with_date(&values) => match cast_dates(&values) {
            Ok(millis) => ArrayData::Float64(millis),
            Err(CastError(reason)) => {
                debug!(reason = %reason, "Object array left unconverted");
                ArrayData::Object(values)
            }
        },
        other => other,
    };

    // Shapes are unchanged, so the mask stays valid
    NdArray::from_parts(data, mask)
}

fn starts_with_date(values: &ArrayD<ObjectValue>) -> bool {
    matches!(values.iter().next(), Some(ObjectValue::Temporal(t)) if t.is_date())
}

fn cast_dates(values: &ArrayD<ObjectValue>) -> Result<ArrayD<f64>, CastError> {
    let mut millis = Vec::with_capacity(values.len());
    for value in values.iter() {
        millis.push(element_millis(value)?);
    }
    ArrayD::from_shape_vec(values.raw_dim(), millis).map_err(|e| CastError(e.to_string()))
}

/// Milliseconds since the epoch, truncated to microseconds. Nulls are NaN.
fn element_millis(value: &ObjectValue) -> Result<f64, CastError> {
    let micros = match value {
        v if v.is_null() => return Ok(f64::NAN),
        ObjectValue::Temporal(TemporalValue::Date(date)) => {
            date.and_time(NaiveTime::MIN).and_utc().timestamp_micros()
        }
        ObjectValue::Temporal(TemporalValue::DateTime(dt)) => dt.and_utc().timestamp_micros(),
        ObjectValue::Temporal(TemporalValue::DateTimeTz(dt)) => dt.timestamp_micros(),
        ObjectValue::Temporal(TemporalValue::Datetime64(v)) => {
            return Ok(v.unit.to_millis_us_floor(v.value))
        }
        #[cfg(feature = "columnar")]
        ObjectValue::Temporal(TemporalValue::Timestamp(ts)) => ts.as_nanos().div_euclid(1000),
        ObjectValue::Str(s) => parse_instant(s)?.and_utc().timestamp_micros(),
        other => return Err(CastError(format!("{:?} is not an instant", other))),
    };
    Ok(micros as f64 / 1000.0)
}

fn parse_instant(s: &str) -> Result<NaiveDateTime, CastError> {
    s.parse::<NaiveDateTime>()
        .or_else(|_| s.parse::<NaiveDate>().map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|e| CastError(format!("cannot parse '{}': {}", s, e)))
}
