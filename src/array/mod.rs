//! Array transform pipeline.
//!
//! Turns arbitrary [`NdArray`]s into something the wire can carry:
//!
//! ```text
//! NdArray ─► normalize temporals ─► fill masked with NaN ─► C layout
//!                                                            │
//!                          binary-eligible? ── yes ─► BufferEnvelope
//!                                 │
//!                                 no ─► JSON list ("NaN"/"Infinity" strings)
//! ```
//!
//! Strict JSON has no NaN or Infinity tokens, so non-finite floats are sent
//! as the strings `"NaN"`, `"Infinity"` and `"-Infinity"`.

mod types;

pub use types::{ArrayData, ArrayLike, DType, DTypeKind, Element, NdArray, ObjectValue};

pub(crate) use types::{f16_to_f64, F16_NAN};

use ndarray::{ArrayD, ArrayViewD, Zip};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::buffer::{encode_buffer, is_binary_eligible, BufferEnvelope};
use crate::config::Config;
use crate::error::Result;
use crate::temporal::{self, is_timedelta_like};

/// Result of [`serialize_array`]: a buffer envelope or a plain JSON list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EncodedArray {
    /// Base64 buffer with dtype/shape/order metadata.
    Buffer(BufferEnvelope),
    /// Nested JSON list.
    List(Value),
}

impl EncodedArray {
    /// Returns true for the buffer variant.
    pub fn is_buffer(&self) -> bool {
        matches!(self, Self::Buffer(_))
    }
}

/// Converts an array into a serializable one.
///
/// - datetime64/timedelta64 data becomes float64 milliseconds
/// - masked positions become NaN and the mask is dropped (integer and bool
///   data is promoted to float64 first, object data gets `Float(NaN)`)
/// - non-C-contiguous data is copied into C layout
pub fn prepare_for_serialization(array: NdArray) -> NdArray {
    let (data, mask) = temporal::normalize_ndarray(array).into_parts();

    let data = match mask {
        Some(mask) => fill_masked(data, &mask),
        None => data,
    };

    NdArray::new(data.into_standard_layout())
}

fn fill_masked(data: ArrayData, mask: &ArrayD<bool>) -> ArrayData {
    fn fill<T: Clone>(mut values: ArrayD<T>, mask: &ArrayD<bool>, fill: T) -> ArrayD<T> {
        Zip::from(&mut values).and(mask).for_each(|v, &masked| {
            if masked {
                *v = fill.clone();
            }
        });
        values
    }

    match data {
        ArrayData::Float32(values) => ArrayData::Float32(fill(values, mask, f32::NAN)),
        ArrayData::Float64(values) => ArrayData::Float64(fill(values, mask, f64::NAN)),
        ArrayData::Float16(bits) => ArrayData::Float16(fill(bits, mask, F16_NAN)),
        ArrayData::Object(values) => {
            ArrayData::Object(fill(values, mask, ObjectValue::Float(f64::NAN)))
        }
        other => match other.to_float64() {
            Some(values) => ArrayData::Float64(fill(values, mask, f64::NAN)),
            None => other,
        },
    }
}

/// Converts an array into a nested JSON list.
///
/// Non-finite floats become `"NaN"`, `"Infinity"` or `"-Infinity"`; null
/// sentinels in object arrays become `"NaN"`. A zero-dimensional array
/// yields its single value. Masked arrays are prepared first, so masked
/// positions read `"NaN"`.
///
/// # Errors
/// Returns an error if an object element holds a temporal value that
/// cannot be converted (e.g. a period outside the timestamp range).
///
/// # Example
/// ```rust
/// use arraywire::{to_json_list, NdArray};
/// use serde_json::json;
///
/// let array = NdArray::from_vec(vec![1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
/// assert_eq!(
///     to_json_list(&array).unwrap(),
///     json!([1.0, "NaN", "Infinity", "-Infinity"])
/// );
/// ```
pub fn to_json_list(array: &NdArray) -> Result<Value> {
    if array.is_masked() {
        return to_json_list(&prepare_for_serialization(array.clone()));
    }

    match array.data() {
        ArrayData::Bool(a) => nest(a.view(), &|v| Ok(Value::Bool(*v))),
        ArrayData::Int8(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::UInt8(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::Int16(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::UInt16(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::Int32(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::UInt32(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::Int64(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::UInt64(a) => nest(a.view(), &|v| Ok(Value::from(*v))),
        ArrayData::Float16(a) => nest(a.view(), &|v| Ok(float_to_json(f16_to_f64(*v)))),
        ArrayData::Float32(a) => nest(a.view(), &|v| Ok(float_to_json(f64::from(*v)))),
        ArrayData::Float64(a) => nest(a.view(), &|v| Ok(float_to_json(*v))),
        ArrayData::DateTime64(a, unit) | ArrayData::TimeDelta64(a, unit) => {
            nest(a.view(), &|v| Ok(float_to_json(unit.to_millis_us_floor(*v))))
        }
        ArrayData::Object(a) => nest(a.view(), &object_to_json),
    }
}

/// Prepares an array and encodes it for the wire.
///
/// Binary-eligible arrays become a [`BufferEnvelope`] when
/// `config.binary_arrays` is set; everything else becomes a JSON list.
#[instrument(skip(array, config), fields(dtype = %array.dtype(), len = array.len()))]
pub fn serialize_array(array: NdArray, config: &Config) -> Result<EncodedArray> {
    let prepared = prepare_for_serialization(array);

    if config.binary_arrays && is_binary_eligible(&prepared) {
        Ok(EncodedArray::Buffer(encode_buffer(&prepared)?))
    } else {
        Ok(EncodedArray::List(to_json_list(&prepared)?))
    }
}

fn nest<T>(view: ArrayViewD<'_, T>, element: &dyn Fn(&T) -> Result<Value>) -> Result<Value> {
    if view.ndim() == 0 {
        return match view.iter().next() {
            Some(v) => element(v),
            None => Ok(Value::Null),
        };
    }
    view.outer_iter()
        .map(|sub| nest(sub, element))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn float_to_json(v: f64) -> Value {
    if v.is_nan() {
        Value::from("NaN")
    } else if v == f64::INFINITY {
        Value::from("Infinity")
    } else if v == f64::NEG_INFINITY {
        Value::from("-Infinity")
    } else {
        Value::from(v)
    }
}

fn object_to_json(value: &ObjectValue) -> Result<Value> {
    Ok(match value {
        ObjectValue::Null => Value::from("NaN"),
        ObjectValue::Bool(b) => Value::Bool(*b),
        ObjectValue::Int(i) => Value::from(*i),
        ObjectValue::Float(f) => float_to_json(*f),
        ObjectValue::Str(s) => Value::from(s.as_str()),
        ObjectValue::Temporal(t) if t.is_nat() => Value::from("NaN"),
        ObjectValue::Temporal(t) if is_timedelta_like(t) => {
            float_to_json(temporal::to_epoch_millis_duration(t)?)
        }
        ObjectValue::Temporal(t) => float_to_json(temporal::to_epoch_millis(t)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{TimeUnit, NAT};
    use ndarray::{arr2, IxDyn, ShapeBuilder};
    use serde_json::json;

    #[test]
    fn test_non_finite_substitution() {
        let array = NdArray::from_vec(vec![1.0f32, f32::NAN, f32::INFINITY, f32::NEG_INFINITY]);
        assert_eq!(
            to_json_list(&array).unwrap(),
            json!([1.0, "NaN", "Infinity", "-Infinity"])
        );
    }

    #[test]
    fn test_finite_list_is_plain() {
        let array = NdArray::from(arr2(&[[1i32, 2], [3, 4]]).into_dyn());
        assert_eq!(to_json_list(&array).unwrap(), json!([[1, 2], [3, 4]]));
    }

    #[test]
    fn test_zero_dim_is_scalar() {
        let array = NdArray::from_shape_vec(&[], vec![7u64]).unwrap();
        assert_eq!(to_json_list(&array).unwrap(), json!(7));
    }

    #[test]
    fn test_object_nulls_become_nan() {
        let array = NdArray::from_vec(vec![
            ObjectValue::from("a"),
            ObjectValue::Null,
            ObjectValue::Int(3),
            ObjectValue::Float(f64::NAN),
        ]);
        assert_eq!(to_json_list(&array).unwrap(), json!(["a", "NaN", 3, "NaN"]));
    }

    #[test]
    fn test_temporal_list_in_millis() {
        let values = ArrayD::from_shape_vec(IxDyn(&[2]), vec![3i64, NAT]).unwrap();
        let array = NdArray::datetime64(values, TimeUnit::Second);
        assert_eq!(to_json_list(&array).unwrap(), json!([3000.0, "NaN"]));
    }

    #[test]
    fn test_temporal_list_matches_serialized() {
        // Pre-epoch and sub-microsecond nanoseconds floor to microseconds
        let values = ArrayD::from_shape_vec(IxDyn(&[2]), vec![-1i64, 1999]).unwrap();
        let array = NdArray::datetime64(values, TimeUnit::Nanosecond);
        let lists_only = Config {
            binary_arrays: false,
            ..Default::default()
        };

        let direct = to_json_list(&array).unwrap();
        assert_eq!(direct, json!([-0.001, 0.001]));
        assert_eq!(
            serialize_array(array, &lists_only).unwrap(),
            EncodedArray::List(direct)
        );
    }

    #[test]
    fn test_prepare_fills_masked_floats() {
        let data = ArrayData::Float64(ArrayD::from_shape_vec(IxDyn(&[3]), vec![1.0, 2.0, 3.0]).unwrap());
        let mask = ArrayD::from_shape_vec(IxDyn(&[3]), vec![false, true, false]).unwrap();
        let prepared = prepare_for_serialization(NdArray::masked(data, mask).unwrap());

        assert!(!prepared.is_masked());
        assert!(prepared.is_c_contiguous());
        let values = prepared.as_array::<f64>().unwrap();
        assert_eq!(values[[0]], 1.0);
        assert!(values[[1]].is_nan());
    }

    #[test]
    fn test_prepare_promotes_masked_ints() {
        let data = ArrayData::Int16(ArrayD::from_shape_vec(IxDyn(&[2]), vec![4, 5]).unwrap());
        let mask = ArrayD::from_shape_vec(IxDyn(&[2]), vec![true, false]).unwrap();
        let prepared = prepare_for_serialization(NdArray::masked(data, mask).unwrap());

        assert_eq!(prepared.dtype(), DType::Float64);
        let values = prepared.as_array::<f64>().unwrap();
        assert!(values[[0]].is_nan());
        assert_eq!(values[[1]], 5.0);
    }

    #[test]
    fn test_prepare_makes_contiguous() {
        let mut fortran = ArrayD::<f32>::zeros(IxDyn(&[2, 2]).f());
        fortran[[0, 1]] = 1.0;
        let array = NdArray::from(fortran);
        assert!(!array.is_c_contiguous());

        let prepared = prepare_for_serialization(array);
        assert!(prepared.is_c_contiguous());
        assert_eq!(prepared.as_array::<f32>().unwrap()[[0, 1]], 1.0);
    }

    #[test]
    fn test_masked_list_reads_nan() {
        let data = ArrayData::UInt8(ArrayD::from_shape_vec(IxDyn(&[2]), vec![1, 2]).unwrap());
        let mask = ArrayD::from_shape_vec(IxDyn(&[2]), vec![false, true]).unwrap();
        let array = NdArray::masked(data, mask).unwrap();
        assert_eq!(to_json_list(&array).unwrap(), json!([1.0, "NaN"]));
    }

    #[test]
    fn test_serialize_array_picks_encoding() {
        let config = Config::default();

        let eligible = NdArray::from_vec(vec![1.0f64, 2.0]);
        assert!(serialize_array(eligible, &config).unwrap().is_buffer());

        let wide = NdArray::from_vec(vec![1i64, 2]);
        assert_eq!(
            serialize_array(wide, &config).unwrap(),
            EncodedArray::List(json!([1, 2]))
        );

        let lists_only = Config {
            binary_arrays: false,
            ..Default::default()
        };
        let eligible = NdArray::from_vec(vec![1u8]);
        assert!(!serialize_array(eligible, &lists_only).unwrap().is_buffer());
    }
}
