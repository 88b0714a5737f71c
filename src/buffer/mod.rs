//! Binary buffer codec.
//!
//! Arrays whose dtype is in [`BINARY_ARRAY_TYPES`] can skip JSON-list
//! conversion and travel as raw element bytes, base64-encoded inside a
//! [`BufferEnvelope`] that also records shape, dtype and byte order.
//! Every other dtype (float16, 64-bit integers, bool, object, temporal)
//! must go through [`to_json_list`](crate::to_json_list).
//!
//! # Example
//!
//! ```rust
//! use arraywire::{decode_buffer, encode_buffer, NdArray};
//!
//! let array = NdArray::from_vec(vec![1.5f64, -2.0, 8.25]);
//! let envelope = encode_buffer(&array)?;
//! assert_eq!(decode_buffer(&envelope)?, array);
//! # Ok::<(), arraywire::WireError>(())
//! ```

mod types;

pub use types::{BufferData, BufferEnvelope, BufferRef, ByteOrder};

use base64::prelude::*;
use ndarray::{Array1, ArrayD, IxDyn};
use tracing::{debug, instrument};

use crate::array::{ArrayData, DType, NdArray};
use crate::error::{DecodeError, Result, WireError};

/// dtypes that may be sent as binary buffers.
pub const BINARY_ARRAY_TYPES: [DType; 8] = [
    DType::Float32,
    DType::Float64,
    DType::UInt8,
    DType::Int8,
    DType::UInt16,
    DType::Int16,
    DType::UInt32,
    DType::Int32,
];

/// Returns true if the array's dtype is in [`BINARY_ARRAY_TYPES`].
pub fn is_binary_eligible(array: &NdArray) -> bool {
    array.dtype().is_binary_eligible()
}

/// Encodes an eligible array as a buffer envelope.
///
/// Elements are written in row-major order using the machine's byte order,
/// whatever the array's memory layout.
///
/// # Errors
/// - `WireError::NotBinaryEligible` if the dtype is not whitelisted
/// - `WireError::InvalidArray` if the array still carries a mask (run
///   [`prepare_for_serialization`](crate::prepare_for_serialization) first)
#[instrument(skip(array), fields(dtype = %array.dtype(), shape = ?array.shape()))]
pub fn encode_buffer(array: &NdArray) -> Result<BufferEnvelope> {
    if array.is_masked() {
        return Err(WireError::invalid_array(
            "masked arrays must be prepared before binary encoding",
        ));
    }

    let bytes = match array.data() {
        ArrayData::Float32(a) => native_bytes(a, f32::to_ne_bytes),
        ArrayData::Float64(a) => native_bytes(a, f64::to_ne_bytes),
        ArrayData::UInt8(a) => native_bytes(a, u8::to_ne_bytes),
        ArrayData::Int8(a) => native_bytes(a, i8::to_ne_bytes),
        ArrayData::UInt16(a) => native_bytes(a, u16::to_ne_bytes),
        ArrayData::Int16(a) => native_bytes(a, i16::to_ne_bytes),
        ArrayData::UInt32(a) => native_bytes(a, u32::to_ne_bytes),
        ArrayData::Int32(a) => native_bytes(a, i32::to_ne_bytes),
        other => return Err(WireError::not_binary_eligible(other.dtype())),
    };

    Ok(BufferEnvelope {
        array: BufferData::Inline(BASE64_STANDARD.encode(bytes)),
        shape: array.shape().to_vec(),
        dtype: array.dtype().to_string(),
        order: ByteOrder::native(),
    })
}

/// Decodes a buffer envelope into an owned array.
///
/// Any fixed-width dtype is accepted, not only the binary whitelist, and
/// the envelope's `order` is honored. The shape is applied only when it
/// has more than one dimension; otherwise the result is a flat array.
///
/// # Errors
/// - `WireError::UnsupportedReference` for `{"$ref": ...}` payloads
/// - `WireError::Decode` for bad base64, unknown or `object` dtypes, a
///   payload that is not a whole number of elements, or a shape that does
///   not match the element count
#[instrument(skip(envelope), fields(dtype = %envelope.dtype, shape = ?envelope.shape))]
pub fn decode_buffer(envelope: &BufferEnvelope) -> Result<NdArray> {
    let encoded = match &envelope.array {
        BufferData::Inline(encoded) => encoded,
        BufferData::Reference(r) => return Err(WireError::unsupported_reference(&r.id)),
    };

    let dtype: DType = envelope.dtype.parse()?;
    let item_size = dtype
        .item_size()
        .ok_or_else(|| DecodeError::unknown_dtype(&envelope.dtype))?;

    let bytes = BASE64_STANDARD.decode(encoded).map_err(DecodeError::from)?;
    if bytes.len() % item_size != 0 {
        return Err(DecodeError::length_mismatch(bytes.len(), item_size).into());
    }
    debug!(len = bytes.len() / item_size, "Decoded buffer payload");

    let order = envelope.order;
    let shape = envelope.shape.as_slice();

    macro_rules! elements {
        ($t:ty) => {
            shaped(
                read_elements(&bytes, order, <$t>::from_le_bytes, <$t>::from_be_bytes),
                shape,
            )?
        };
    }

    let data = match dtype {
        DType::Bool => ArrayData::Bool(shaped(bytes.iter().map(|b| *b != 0).collect(), shape)?),
        DType::Int8 => ArrayData::Int8(elements!(i8)),
        DType::UInt8 => ArrayData::UInt8(elements!(u8)),
        DType::Int16 => ArrayData::Int16(elements!(i16)),
        DType::UInt16 => ArrayData::UInt16(elements!(u16)),
        DType::Int32 => ArrayData::Int32(elements!(i32)),
        DType::UInt32 => ArrayData::UInt32(elements!(u32)),
        DType::Int64 => ArrayData::Int64(elements!(i64)),
        DType::UInt64 => ArrayData::UInt64(elements!(u64)),
        DType::Float16 => ArrayData::Float16(elements!(u16)),
        DType::Float32 => ArrayData::Float32(elements!(f32)),
        DType::Float64 => ArrayData::Float64(elements!(f64)),
        DType::DateTime64(unit) => ArrayData::DateTime64(elements!(i64), unit),
        DType::TimeDelta64(unit) => ArrayData::TimeDelta64(elements!(i64), unit),
        DType::Object => return Err(DecodeError::unknown_dtype(&envelope.dtype).into()),
    };

    Ok(NdArray::new(data))
}

fn native_bytes<T: Copy, const N: usize>(values: &ArrayD<T>, to_bytes: fn(T) -> [u8; N]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * N);
    for v in values.iter() {
        out.extend_from_slice(&to_bytes(*v));
    }
    out
}

fn read_elements<T, const N: usize>(
    bytes: &[u8],
    order: ByteOrder,
    from_le: fn([u8; N]) -> T,
    from_be: fn([u8; N]) -> T,
) -> Vec<T> {
    let from = match order {
        ByteOrder::Little => from_le,
        ByteOrder::Big => from_be,
    };
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from(raw)
        })
        .collect()
}

fn shaped<T>(values: Vec<T>, shape: &[usize]) -> Result<ArrayD<T>> {
    if shape.len() <= 1 {
        return Ok(Array1::from(values).into_dyn());
    }
    let count = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values)
        .map_err(|_| DecodeError::shape_mismatch(shape, count).into())
}
