//! Fuzz target for buffer envelope decoding.
//!
//! Untrusted envelopes must decode or fail with an error, never panic.

#![no_main]

use arraywire::{decode_buffer, encode_buffer, is_binary_eligible, BufferData, BufferEnvelope, ByteOrder};
use base64::prelude::*;
use libfuzzer_sys::fuzz_target;

const DTYPES: [&str; 16] = [
    "bool", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
    "float16", "float32", "float64", "datetime64[ms]", "timedelta64[ns]", "object", "bogus",
];

fuzz_target!(|data: &[u8]| {
    // Whole input as a JSON envelope
    if let Ok(envelope) = serde_json::from_slice::<BufferEnvelope>(data) {
        let _ = decode_buffer(&envelope);
    }

    // Header bytes pick dtype, order and shape; the rest is the payload
    if data.len() < 3 {
        return;
    }
    let dtype = DTYPES[data[0] as usize % DTYPES.len()];
    let order = if data[1] & 1 == 0 { ByteOrder::Little } else { ByteOrder::Big };
    let shape: Vec<usize> = match data[2] % 3 {
        0 => vec![],
        1 => vec![usize::from(data[2])],
        _ => vec![usize::from(data[2] >> 4), usize::from(data[2] & 0x0f)],
    };
    let envelope = BufferEnvelope {
        array: BufferData::Inline(BASE64_STANDARD.encode(&data[3..])),
        shape,
        dtype: dtype.to_string(),
        order,
    };

    if let Ok(array) = decode_buffer(&envelope) {
        // Whitelisted, native-order arrays must re-encode to the same payload
        if is_binary_eligible(&array) && order == ByteOrder::native() {
            let again = encode_buffer(&array).expect("eligible array encodes");
            assert_eq!(again.array, envelope.array);
        }
    }
});
