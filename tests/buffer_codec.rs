//! Integration tests for the binary buffer codec.
//!
//! Round-trips every binary-eligible dtype and checks the JSON envelope
//! format, byte-order handling and the rejection paths.

use arraywire::{
    decode_buffer, encode_buffer, is_binary_eligible, BufferData, BufferEnvelope, ByteOrder,
    DType, Element, NdArray, TimeUnit, BINARY_ARRAY_TYPES,
};
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use proptest::prelude::*;
use serde_json::json;

fn roundtrip<T: Element + PartialEq + std::fmt::Debug>(values: Vec<T>, shape: &[usize]) {
    let array = NdArray::from_shape_vec(shape, values).unwrap();
    let envelope = encode_buffer(&array).unwrap();
    assert_eq!(envelope.dtype, T::DTYPE.to_string());
    assert_eq!(envelope.shape, shape);

    let decoded = decode_buffer(&envelope).unwrap();
    assert_eq!(decoded, array);
}

// ============================================================================
// Eligibility
// ============================================================================

#[test]
fn test_whitelist_contents() {
    let tags: Vec<String> = BINARY_ARRAY_TYPES.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        tags,
        ["float32", "float64", "uint8", "int8", "uint16", "int16", "uint32", "int32"]
    );
}

#[test]
fn test_eligibility() {
    assert!(is_binary_eligible(&NdArray::from_vec(vec![0u8])));
    assert!(is_binary_eligible(&NdArray::from_vec(vec![0i32])));
    assert!(is_binary_eligible(&NdArray::from_vec(vec![0.0f64])));

    assert!(!is_binary_eligible(&NdArray::float16_bits(
        ArrayD::zeros(IxDyn(&[1]))
    )));
    assert!(!is_binary_eligible(&NdArray::from_vec(vec![0i64])));
    assert!(!is_binary_eligible(&NdArray::from_vec(vec![false])));
    assert!(!is_binary_eligible(&NdArray::datetime64(
        ArrayD::zeros(IxDyn(&[1])),
        TimeUnit::Nanosecond
    )));
}

#[test]
fn test_ineligible_encode_fails() {
    let err = encode_buffer(&NdArray::from_vec(vec![1u64])).unwrap_err();
    assert_eq!(err.to_string(), "dtype 'uint64' cannot be binary encoded");
}

// ============================================================================
// Round-trips
// ============================================================================

#[test]
fn test_roundtrip_each_whitelisted_dtype() {
    roundtrip(vec![1.5f32, -0.25, f32::MAX], &[3]);
    roundtrip(vec![1e300f64, -2.0, 0.0, 7.5], &[2, 2]);
    roundtrip(vec![0u8, 255, 17], &[3]);
    roundtrip(vec![i8::MIN, 0, i8::MAX], &[3, 1]);
    roundtrip(vec![0u16, u16::MAX], &[2]);
    roundtrip(vec![i16::MIN, -1, 1, i16::MAX], &[1, 4]);
    roundtrip(vec![u32::MAX, 1], &[2]);
    roundtrip(vec![i32::MIN, 42, i32::MAX, 0, 1, 2], &[2, 3]);
}

#[test]
fn test_nan_survives_roundtrip() {
    let envelope = encode_buffer(&NdArray::from_vec(vec![f64::NAN])).unwrap();
    let decoded = decode_buffer(&envelope).unwrap();
    assert!(decoded.as_array::<f64>().unwrap()[[0]].is_nan());
}

#[test]
fn test_fortran_layout_encodes_row_major() {
    let mut values = ArrayD::<i32>::zeros(IxDyn(&[2, 2]).f());
    values[[0, 1]] = 1;
    values[[1, 0]] = 2;
    let envelope = encode_buffer(&NdArray::from(values.clone())).unwrap();

    let decoded = decode_buffer(&envelope).unwrap();
    assert_eq!(decoded.as_array::<i32>().unwrap(), &values);
    assert!(decoded.is_c_contiguous());
}

proptest! {
    #[test]
    fn prop_float32_roundtrip(values in prop::collection::vec(any::<f32>().prop_filter("nan", |v| !v.is_nan()), 0..64)) {
        let array = NdArray::from_vec(values);
        let decoded = decode_buffer(&encode_buffer(&array).unwrap()).unwrap();
        prop_assert_eq!(decoded, array);
    }

    #[test]
    fn prop_int16_matrix_roundtrip(rows in 2usize..6, cols in 2usize..6, seed in any::<i16>()) {
        let values: Vec<i16> = (0..rows * cols).map(|i| seed.wrapping_add(i as i16)).collect();
        let array = NdArray::from_shape_vec(&[rows, cols], values).unwrap();
        let decoded = decode_buffer(&encode_buffer(&array).unwrap()).unwrap();
        prop_assert_eq!(decoded.shape(), &[rows, cols]);
        prop_assert_eq!(decoded, array);
    }
}

// ============================================================================
// Envelope wire format
// ============================================================================

#[test]
fn test_envelope_json_decodes() {
    // uint16 [1, 256] big-endian
    let envelope: BufferEnvelope = serde_json::from_value(json!({
        "array": "AAEBAA==",
        "shape": [2],
        "dtype": "uint16",
        "order": "big"
    }))
    .unwrap();

    let decoded = decode_buffer(&envelope).unwrap();
    assert_eq!(decoded.dtype(), DType::UInt16);
    assert_eq!(
        decoded.as_array::<u16>().unwrap().as_slice().unwrap(),
        &[1, 256]
    );
}

#[test]
fn test_envelope_json_encodes() {
    let envelope = encode_buffer(&NdArray::from_vec(vec![1u8, 2, 3])).unwrap();
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["array"], json!("AQID"));
    assert_eq!(value["shape"], json!([3]));
    assert_eq!(value["dtype"], json!("uint8"));
    assert!(value["order"] == json!("little") || value["order"] == json!("big"));
}

#[test]
fn test_reference_envelope_rejected() {
    let envelope: BufferEnvelope = serde_json::from_value(json!({
        "array": {"$ref": "1001"},
        "shape": [2],
        "dtype": "float64",
        "order": "little"
    }))
    .unwrap();
    assert!(matches!(envelope.array, BufferData::Reference(_)));

    let err = decode_buffer(&envelope).unwrap_err();
    assert!(err.is_unsupported_reference());
}

#[test]
fn test_decode_rejects_truncated_payload() {
    let envelope = BufferEnvelope {
        array: BufferData::Inline("AAEC".into()),
        shape: vec![1],
        dtype: "int32".into(),
        order: ByteOrder::Little,
    };
    assert!(decode_buffer(&envelope).unwrap_err().is_decode());
}
