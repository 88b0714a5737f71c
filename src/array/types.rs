//! Typed n-dimensional arrays.
//!
//! An [`NdArray`] is one [`ArrayData`] variant (an `ndarray::ArrayD` of a
//! fixed element type) plus an optional validity mask. The variant fixes
//! the [`DType`]; temporal variants additionally carry their [`TimeUnit`].

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use ndarray::{Array1, ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result, WireError};
use crate::temporal::{TemporalValue, TimeUnit};

/// IEEE binary16 quiet NaN.
pub(crate) const F16_NAN: u16 = 0x7E00;

/// Broad element category of a [`DType`], with the usual one-letter codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DTypeKind {
    /// `b`
    Bool,
    /// `i`
    Int,
    /// `u`
    UInt,
    /// `f`
    Float,
    /// `M`
    DateTime,
    /// `m`
    TimeDelta,
    /// `O`
    Object,
}

impl DTypeKind {
    /// Returns the one-letter kind code.
    pub const fn code(&self) -> char {
        match self {
            Self::Bool => 'b',
            Self::Int => 'i',
            Self::UInt => 'u',
            Self::Float => 'f',
            Self::DateTime => 'M',
            Self::TimeDelta => 'm',
            Self::Object => 'O',
        }
    }

    /// Returns true for signed, unsigned and floating kinds.
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::UInt | Self::Float)
    }

    /// Returns true for datetime and timedelta kinds.
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime | Self::TimeDelta)
    }
}

/// Element type of an array.
///
/// Rendered and parsed as the usual tags (`float64`, `uint8`,
/// `datetime64[ms]`, `object`, ...), which is also its serde form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DType {
    /// `bool`
    Bool,
    /// `int8`
    Int8,
    /// `uint8`
    UInt8,
    /// `int16`
    Int16,
    /// `uint16`
    UInt16,
    /// `int32`
    Int32,
    /// `uint32`
    UInt32,
    /// `int64`
    Int64,
    /// `uint64`
    UInt64,
    /// `float16`
    Float16,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `datetime64[unit]`
    DateTime64(TimeUnit),
    /// `timedelta64[unit]`
    TimeDelta64(TimeUnit),
    /// `object`
    Object,
}

impl DType {
    /// Returns the element kind.
    pub const fn kind(&self) -> DTypeKind {
        match self {
            Self::Bool => DTypeKind::Bool,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 => DTypeKind::Int,
            Self::UInt8 | Self::UInt16 | Self::UInt32 | Self::UInt64 => DTypeKind::UInt,
            Self::Float16 | Self::Float32 | Self::Float64 => DTypeKind::Float,
            Self::DateTime64(_) => DTypeKind::DateTime,
            Self::TimeDelta64(_) => DTypeKind::TimeDelta,
            Self::Object => DTypeKind::Object,
        }
    }

    /// Returns the size of one element in bytes, or `None` for `object`.
    pub const fn item_size(&self) -> Option<usize> {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => Some(1),
            Self::Int16 | Self::UInt16 | Self::Float16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64
            | Self::UInt64
            | Self::Float64
            | Self::DateTime64(_)
            | Self::TimeDelta64(_) => Some(8),
            Self::Object => None,
        }
    }

    /// Returns true if arrays of this dtype may travel as binary buffers.
    pub fn is_binary_eligible(&self) -> bool {
        crate::buffer::BINARY_ARRAY_TYPES.contains(self)
    }

    /// Returns true for datetime64 and timedelta64 dtypes.
    pub const fn is_temporal(&self) -> bool {
        self.kind().is_temporal()
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int8 => f.write_str("int8"),
            Self::UInt8 => f.write_str("uint8"),
            Self::Int16 => f.write_str("int16"),
            Self::UInt16 => f.write_str("uint16"),
            Self::Int32 => f.write_str("int32"),
            Self::UInt32 => f.write_str("uint32"),
            Self::Int64 => f.write_str("int64"),
            Self::UInt64 => f.write_str("uint64"),
            Self::Float16 => f.write_str("float16"),
            Self::Float32 => f.write_str("float32"),
            Self::Float64 => f.write_str("float64"),
            Self::DateTime64(unit) => write!(f, "datetime64[{}]", unit),
            Self::TimeDelta64(unit) => write!(f, "timedelta64[{}]", unit),
            Self::Object => f.write_str("object"),
        }
    }
}

impl FromStr for DType {
    type Err = DecodeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let unit_of = |prefix: &str| {
            s.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('['))
                .and_then(|rest| rest.strip_suffix(']'))
                .and_then(TimeUnit::from_tag)
        };

        Ok(match s {
            "bool" => Self::Bool,
            "int8" => Self::Int8,
            "uint8" => Self::UInt8,
            "int16" => Self::Int16,
            "uint16" => Self::UInt16,
            "int32" => Self::Int32,
            "uint32" => Self::UInt32,
            "int64" => Self::Int64,
            "uint64" => Self::UInt64,
            "float16" => Self::Float16,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "object" => Self::Object,
            _ => {
                if let Some(unit) = unit_of("datetime64") {
                    Self::DateTime64(unit)
                } else if let Some(unit) = unit_of("timedelta64") {
                    Self::TimeDelta64(unit)
                } else {
                    return Err(DecodeError::unknown_dtype(s));
                }
            }
        })
    }
}

impl From<DType> for String {
    fn from(dtype: DType) -> Self {
        dtype.to_string()
    }
}

impl TryFrom<String> for DType {
    type Error = DecodeError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Element of an `object` array.
///
/// `Null`, NaN floats and "not a time" temporals count as null.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ObjectValue {
    /// Missing value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// String.
    Str(String),
    /// Date, time or duration.
    Temporal(TemporalValue),
}

impl ObjectValue {
    /// Returns true for null sentinels.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float(f) => f.is_nan(),
            Self::Temporal(t) => t.is_nat(),
            _ => false,
        }
    }
}

impl From<bool> for ObjectValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ObjectValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ObjectValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ObjectValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ObjectValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<TemporalValue> for ObjectValue {
    fn from(v: TemporalValue) -> Self {
        Self::Temporal(v)
    }
}

impl From<NaiveDate> for ObjectValue {
    fn from(v: NaiveDate) -> Self {
        Self::Temporal(v.into())
    }
}

impl From<NaiveDateTime> for ObjectValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::Temporal(v.into())
    }
}

/// Storage of an [`NdArray`], one variant per element type.
///
/// `float16` is kept as raw IEEE binary16 bits.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    /// `bool`
    Bool(ArrayD<bool>),
    /// `int8`
    Int8(ArrayD<i8>),
    /// `uint8`
    UInt8(ArrayD<u8>),
    /// `int16`
    Int16(ArrayD<i16>),
    /// `uint16`
    UInt16(ArrayD<u16>),
    /// `int32`
    Int32(ArrayD<i32>),
    /// `uint32`
    UInt32(ArrayD<u32>),
    /// `int64`
    Int64(ArrayD<i64>),
    /// `uint64`
    UInt64(ArrayD<u64>),
    /// `float16` bit patterns
    Float16(ArrayD<u16>),
    /// `float32`
    Float32(ArrayD<f32>),
    /// `float64`
    Float64(ArrayD<f64>),
    /// `datetime64[unit]`, units since the epoch
    DateTime64(ArrayD<i64>, TimeUnit),
    /// `timedelta64[unit]`
    TimeDelta64(ArrayD<i64>, TimeUnit),
    /// `object`
    Object(ArrayD<ObjectValue>),
}

/// Applies `$body` to the inner array of any variant, rebuilding the same
/// variant from the result.
macro_rules! map_data {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ArrayData::Bool($a) => ArrayData::Bool($body),
            ArrayData::Int8($a) => ArrayData::Int8($body),
            ArrayData::UInt8($a) => ArrayData::UInt8($body),
            ArrayData::Int16($a) => ArrayData::Int16($body),
            ArrayData::UInt16($a) => ArrayData::UInt16($body),
            ArrayData::Int32($a) => ArrayData::Int32($body),
            ArrayData::UInt32($a) => ArrayData::UInt32($body),
            ArrayData::Int64($a) => ArrayData::Int64($body),
            ArrayData::UInt64($a) => ArrayData::UInt64($body),
            ArrayData::Float16($a) => ArrayData::Float16($body),
            ArrayData::Float32($a) => ArrayData::Float32($body),
            ArrayData::Float64($a) => ArrayData::Float64($body),
            ArrayData::DateTime64($a, unit) => ArrayData::DateTime64($body, unit),
            ArrayData::TimeDelta64($a, unit) => ArrayData::TimeDelta64($body, unit),
            ArrayData::Object($a) => ArrayData::Object($body),
        }
    };
}

/// Evaluates `$body` with the inner array of any variant bound to `$a`.
macro_rules! with_data {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ArrayData::Bool($a) => $body,
            ArrayData::Int8($a) => $body,
            ArrayData::UInt8($a) => $body,
            ArrayData::Int16($a) => $body,
            ArrayData::UInt16($a) => $body,
            ArrayData::Int32($a) => $body,
            ArrayData::UInt32($a) => $body,
            ArrayData::Int64($a) => $body,
            ArrayData::UInt64($a) => $body,
            ArrayData::Float16($a) => $body,
            ArrayData::Float32($a) => $body,
            ArrayData::Float64($a) => $body,
            ArrayData::DateTime64($a, _) => $body,
            ArrayData::TimeDelta64($a, _) => $body,
            ArrayData::Object($a) => $body,
        }
    };
}

impl ArrayData {
    /// Returns the element type.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::Int8(_) => DType::Int8,
            Self::UInt8(_) => DType::UInt8,
            Self::Int16(_) => DType::Int16,
            Self::UInt16(_) => DType::UInt16,
            Self::Int32(_) => DType::Int32,
            Self::UInt32(_) => DType::UInt32,
            Self::Int64(_) => DType::Int64,
            Self::UInt64(_) => DType::UInt64,
            Self::Float16(_) => DType::Float16,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
            Self::DateTime64(_, unit) => DType::DateTime64(*unit),
            Self::TimeDelta64(_, unit) => DType::TimeDelta64(*unit),
            Self::Object(_) => DType::Object,
        }
    }

    /// Returns the array shape.
    pub fn shape(&self) -> &[usize] {
        with_data!(self, a => a.shape())
    }

    /// Returns the total number of elements.
    pub fn len(&self) -> usize {
        with_data!(self, a => a.len())
    }

    /// Returns true if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if elements are laid out in row-major (C) order.
    pub fn is_standard_layout(&self) -> bool {
        with_data!(self, a => a.is_standard_layout())
    }

    /// Returns the same data in row-major (C) layout, copying only if needed.
    pub fn into_standard_layout(self) -> Self {
        map_data!(self, a => if a.is_standard_layout() {
            a
        } else {
            a.as_standard_layout().into_owned()
        })
    }

    /// Converts numeric, bool and temporal data to float64.
    ///
    /// Temporal data becomes milliseconds at microsecond resolution.
    /// Returns `None` for `object`.
    pub fn to_float64(&self) -> Option<ArrayD<f64>> {
        Some(match self {
            Self::Bool(a) => a.mapv(|v| if v { 1.0 } else { 0.0 }),
            Self::Int8(a) => a.mapv(f64::from),
            Self::UInt8(a) => a.mapv(f64::from),
            Self::Int16(a) => a.mapv(f64::from),
            Self::UInt16(a) => a.mapv(f64::from),
            Self::Int32(a) => a.mapv(f64::from),
            Self::UInt32(a) => a.mapv(f64::from),
            Self::Int64(a) => a.mapv(|v| v as f64),
            Self::UInt64(a) => a.mapv(|v| v as f64),
            Self::Float16(a) => a.mapv(f16_to_f64),
            Self::Float32(a) => a.mapv(f64::from),
            Self::Float64(a) => a.clone(),
            Self::DateTime64(a, unit) | Self::TimeDelta64(a, unit) => {
                a.mapv(|v| unit.to_millis_us_floor(v))
            }
            Self::Object(_) => return None,
        })
    }
}

/// Rust element types with a direct [`ArrayData`] variant.
pub trait Element: Clone {
    /// Element type of arrays of `Self`.
    const DTYPE: DType;

    /// Wraps an array into its variant.
    fn wrap(array: ArrayD<Self>) -> ArrayData;

    /// Borrows the inner array if `data` holds `Self` elements.
    fn unwrap_ref(data: &ArrayData) -> Option<&ArrayD<Self>>;
}

macro_rules! impl_element {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$variant;

                fn wrap(array: ArrayD<Self>) -> ArrayData {
                    ArrayData::$variant(array)
                }

                fn unwrap_ref(data: &ArrayData) -> Option<&ArrayD<Self>> {
                    match data {
                        ArrayData::$variant(a) => Some(a),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_element!(
    bool => Bool,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    ObjectValue => Object,
);

/// An n-dimensional typed array with an optional validity mask.
///
/// Mask entries set to `true` mark missing elements.
///
/// # Example
/// ```
/// use arraywire::{DType, NdArray};
///
/// let array = NdArray::from_shape_vec(&[2, 2], vec![1.0f32, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(array.dtype(), DType::Float32);
/// assert_eq!(array.shape(), &[2, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    data: ArrayData,
    mask: Option<ArrayD<bool>>,
}

impl NdArray {
    /// Creates an unmasked array.
    pub fn new(data: ArrayData) -> Self {
        Self { data, mask: None }
    }

    /// Creates a masked array.
    ///
    /// # Errors
    /// Returns `WireError::InvalidArray` if the mask shape differs from the
    /// data shape.
    pub fn masked(data: ArrayData, mask: ArrayD<bool>) -> Result<Self> {
        if mask.shape() != data.shape() {
            return Err(WireError::invalid_array(format!(
                "mask shape {:?} does not match data shape {:?}",
                mask.shape(),
                data.shape()
            )));
        }
        Ok(Self {
            data,
            mask: Some(mask),
        })
    }

    /// Reassembles an array from parts whose shapes are known to agree.
    pub(crate) fn from_parts(data: ArrayData, mask: Option<ArrayD<bool>>) -> Self {
        Self { data, mask }
    }

    /// Creates a one-dimensional array.
    pub fn from_vec<T: Element>(values: Vec<T>) -> Self {
        Self::new(T::wrap(Array1::from(values).into_dyn()))
    }

    /// Creates an array of the given shape from row-major values.
    ///
    /// # Errors
    /// Returns `WireError::InvalidArray` if `values` does not fill `shape`.
    pub fn from_shape_vec<T: Element>(shape: &[usize], values: Vec<T>) -> Result<Self> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), values)
            .map_err(|e| WireError::invalid_array(e.to_string()))?;
        Ok(Self::new(T::wrap(array)))
    }

    /// Creates a datetime64 array of `unit` counts since the epoch.
    pub fn datetime64(values: ArrayD<i64>, unit: TimeUnit) -> Self {
        Self::new(ArrayData::DateTime64(values, unit))
    }

    /// Creates a timedelta64 array of `unit` counts.
    pub fn timedelta64(values: ArrayD<i64>, unit: TimeUnit) -> Self {
        Self::new(ArrayData::TimeDelta64(values, unit))
    }

    /// Creates a float16 array from IEEE binary16 bit patterns.
    pub fn float16_bits(bits: ArrayD<u16>) -> Self {
        Self::new(ArrayData::Float16(bits))
    }

    /// Returns the element storage.
    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Returns the validity mask, if any.
    pub fn mask(&self) -> Option<&ArrayD<bool>> {
        self.mask.as_ref()
    }

    /// Returns true if the array carries a mask.
    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    /// Splits the array into its storage and mask.
    pub fn into_parts(self) -> (ArrayData, Option<ArrayD<bool>>) {
        (self.data, self.mask)
    }

    /// Borrows the inner array if it holds `T` elements.
    pub fn as_array<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::unwrap_ref(&self.data)
    }

    /// Returns the element type.
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    /// Returns the array shape.
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Returns the total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns true if elements are laid out in row-major (C) order.
    pub fn is_c_contiguous(&self) -> bool {
        self.data.is_standard_layout()
    }
}

impl From<ArrayData> for NdArray {
    fn from(data: ArrayData) -> Self {
        Self::new(data)
    }
}

impl<T: Element> From<ArrayD<T>> for NdArray {
    fn from(array: ArrayD<T>) -> Self {
        Self::new(T::wrap(array))
    }
}

/// Either an array or a single non-array value.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayLike {
    /// A typed array.
    Array(NdArray),
    /// Anything that is not an array.
    Scalar(ObjectValue),
}

impl ArrayLike {
    /// Returns true for the array variant.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns the array, if this is one.
    pub fn into_array(self) -> Option<NdArray> {
        match self {
            Self::Array(array) => Some(array),
            Self::Scalar(_) => None,
        }
    }
}

impl From<NdArray> for ArrayLike {
    fn from(array: NdArray) -> Self {
        Self::Array(array)
    }
}

impl From<ObjectValue> for ArrayLike {
    fn from(value: ObjectValue) -> Self {
        Self::Scalar(value)
    }
}

/// Decodes an IEEE binary16 bit pattern.
pub(crate) fn f16_to_f64(bits: u16) -> f64 {
    let sign = if bits & 0x8000 != 0 { -1.0 } else { 1.0 };
    let exponent = i32::from((bits >> 10) & 0x1f);
    let fraction = f64::from(bits & 0x3ff);

    let magnitude = match exponent {
        0 => fraction * 2f64.powi(-24),
        0x1f if fraction == 0.0 => f64::INFINITY,
        0x1f => f64::NAN,
        _ => (1.0 + fraction / 1024.0) * 2f64.powi(exponent - 15),
    };
    sign * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ShapeBuilder;

    #[test]
    fn test_dtype_tags_roundtrip() {
        for dtype in [
            DType::Bool,
            DType::Int8,
            DType::UInt64,
            DType::Float16,
            DType::Float64,
            DType::DateTime64(TimeUnit::Millisecond),
            DType::TimeDelta64(TimeUnit::Nanosecond),
            DType::Object,
        ] {
            assert_eq!(dtype.to_string().parse::<DType>().unwrap(), dtype);
        }
        assert_eq!(
            DType::DateTime64(TimeUnit::Microsecond).to_string(),
            "datetime64[us]"
        );
    }

    #[test]
    fn test_dtype_parse_rejects_unknown() {
        assert!("complex128".parse::<DType>().is_err());
        assert!("datetime64[weeks]".parse::<DType>().is_err());
        assert!("datetime64".parse::<DType>().is_err());
    }

    #[test]
    fn test_dtype_serde_as_string() {
        let json = serde_json::to_string(&DType::UInt16).unwrap();
        assert_eq!(json, "\"uint16\"");
        let restored: DType = serde_json::from_str("\"timedelta64[s]\"").unwrap();
        assert_eq!(restored, DType::TimeDelta64(TimeUnit::Second));
    }

    #[test]
    fn test_dtype_kinds() {
        assert_eq!(DType::UInt8.kind().code(), 'u');
        assert_eq!(DType::DateTime64(TimeUnit::Day).kind().code(), 'M');
        assert!(DType::Float16.kind().is_numeric());
        assert!(!DType::Bool.kind().is_numeric());
        assert_eq!(DType::Object.item_size(), None);
        assert_eq!(DType::Float16.item_size(), Some(2));
    }

    #[test]
    fn test_masked_shape_must_match() {
        let data = ArrayData::Float64(ArrayD::zeros(IxDyn(&[3])));
        let mask = ArrayD::from_elem(IxDyn(&[2]), false);
        assert!(NdArray::masked(data, mask).is_err());
    }

    #[test]
    fn test_standard_layout_copy() {
        let fortran = ArrayD::<i32>::zeros(IxDyn(&[2, 3]).f());
        let data = ArrayData::Int32(fortran);
        assert!(!data.is_standard_layout());
        assert!(data.into_standard_layout().is_standard_layout());
    }

    #[test]
    fn test_object_null_sentinels() {
        assert!(ObjectValue::Null.is_null());
        assert!(ObjectValue::Float(f64::NAN).is_null());
        assert!(!ObjectValue::Float(f64::INFINITY).is_null());
        assert!(!ObjectValue::from("NaN").is_null());
    }

    #[test]
    fn test_f16_decoding() {
        assert_eq!(f16_to_f64(0x3C00), 1.0);
        assert_eq!(f16_to_f64(0xC000), -2.0);
        assert_eq!(f16_to_f64(0x7C00), f64::INFINITY);
        assert!(f16_to_f64(F16_NAN).is_nan());
        assert_eq!(f16_to_f64(0x0001), 2f64.powi(-24));
    }

    #[test]
    fn test_as_array() {
        let array = NdArray::from_vec(vec![1u8, 2, 3]);
        assert!(array.as_array::<u8>().is_some());
        assert!(array.as_array::<i8>().is_none());
        assert_eq!(array.len(), 3);
        assert_eq!(array.ndim(), 1);
    }
}
