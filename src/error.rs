//! Error types for arraywire.
//!
//! arraywire uses a small hierarchical error system:
//! - `WireError` is the top-level error returned by all public APIs
//! - `DecodeError` details why a buffer envelope could not be decoded
//!
//! # Error Handling Pattern
//! ```rust
//! use arraywire::{decode_buffer, BufferEnvelope, Result};
//!
//! fn load(json: &str) -> Result<usize> {
//!     let envelope: BufferEnvelope = serde_json::from_str(json)?;
//!     let array = decode_buffer(&envelope)?;
//!     Ok(array.len())
//! }
//! ```

use thiserror::Error;

/// Result type alias for arraywire operations.
pub type Result<T> = std::result::Result<T, WireError>;

/// Top-level error enum for all arraywire operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum WireError {
    /// A temporal conversion received a value outside the variants it accepts.
    #[error("Unrecognized {expected} value: {found}")]
    UnrecognizedValue {
        /// What the conversion accepts ("datetime", "timedelta").
        expected: &'static str,
        /// Debug rendering of the rejected value.
        found: String,
    },

    /// A buffer envelope referenced its data instead of carrying it inline.
    #[error("Buffer references are not supported (ref: {id})")]
    UnsupportedReference {
        /// Opaque reference id from the envelope.
        id: String,
    },

    /// Binary encoding was requested for a dtype outside the whitelist.
    #[error("dtype '{dtype}' cannot be binary encoded")]
    NotBinaryEligible {
        /// Tag of the rejected dtype.
        dtype: String,
    },

    /// An array was constructed or used with inconsistent parts.
    #[error("Invalid array: {0}")]
    InvalidArray(String),

    /// Calendar or unit arithmetic left the representable range.
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Buffer envelope decoding error.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of what's wrong with the configuration.
        reason: String,
    },

    /// Malformed JSON wire payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WireError {
    /// Creates an unrecognized-value error from anything debuggable.
    pub fn unrecognized(expected: &'static str, found: impl std::fmt::Debug) -> Self {
        Self::UnrecognizedValue {
            expected,
            found: format!("{:?}", found),
        }
    }

    /// Creates an unsupported-reference error for the given id.
    pub fn unsupported_reference(id: impl Into<String>) -> Self {
        Self::UnsupportedReference { id: id.into() }
    }

    /// Creates a not-binary-eligible error for the given dtype tag.
    pub fn not_binary_eligible(dtype: impl ToString) -> Self {
        Self::NotBinaryEligible {
            dtype: dtype.to_string(),
        }
    }

    /// Creates an invalid-array error with the given message.
    pub fn invalid_array(msg: impl Into<String>) -> Self {
        Self::InvalidArray(msg.into())
    }

    /// Creates an out-of-range error with the given message.
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Creates a configuration error with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true if this is an unrecognized-value error.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::UnrecognizedValue { .. })
    }

    /// Returns true if this is an unsupported-reference error.
    pub fn is_unsupported_reference(&self) -> bool {
        matches!(self, Self::UnsupportedReference { .. })
    }

    /// Returns true if this is a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Errors raised while decoding a buffer envelope.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The `array` field is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The `dtype` tag is unknown or has no fixed-width byte layout.
    #[error("Unknown dtype: {0}")]
    UnknownDtype(String),

    /// Payload size is not a whole number of elements.
    #[error("Payload of {len} bytes is not a multiple of item size {item_size}")]
    LengthMismatch {
        /// Decoded payload length in bytes.
        len: usize,
        /// Item size of the declared dtype.
        item_size: usize,
    },

    /// The declared shape does not match the element count.
    #[error("Shape {shape:?} does not match {count} elements")]
    ShapeMismatch {
        /// Declared shape.
        shape: Vec<usize>,
        /// Number of decoded elements.
        count: usize,
    },
}

impl DecodeError {
    /// Creates an unknown dtype error.
    pub fn unknown_dtype(tag: impl Into<String>) -> Self {
        Self::UnknownDtype(tag.into())
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(len: usize, item_size: usize) -> Self {
        Self::LengthMismatch { len, item_size }
    }

    /// Creates a shape mismatch error.
    pub fn shape_mismatch(shape: &[usize], count: usize) -> Self {
        Self::ShapeMismatch {
            shape: shape.to_vec(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WireError::config("ARRAYWIRE_SIMPLE_IDS must be boolean-like");
        assert_eq!(
            err.to_string(),
            "Configuration error: ARRAYWIRE_SIMPLE_IDS must be boolean-like"
        );
    }

    #[test]
    fn test_unrecognized_display() {
        let err = WireError::unrecognized("datetime", "abc");
        assert_eq!(err.to_string(), "Unrecognized datetime value: \"abc\"");
        assert!(err.is_unrecognized());
        assert!(!err.is_decode());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::length_mismatch(7, 4);
        assert_eq!(
            err.to_string(),
            "Payload of 7 bytes is not a multiple of item size 4"
        );
    }

    #[test]
    fn test_unsupported_reference() {
        let err = WireError::unsupported_reference("p1002");
        assert_eq!(
            err.to_string(),
            "Buffer references are not supported (ref: p1002)"
        );
        assert!(err.is_unsupported_reference());
    }

    #[test]
    fn test_error_conversion_chain() {
        fn inner() -> Result<()> {
            Err(DecodeError::unknown_dtype("complex128"))?
        }

        let result = inner();
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn test_json_error_converts() {
        fn parse(json: &str) -> Result<crate::buffer::BufferEnvelope> {
            Ok(serde_json::from_str(json)?)
        }

        let err = parse(r#"{"array": "AAE=", "shape": [2]"#).unwrap_err();
        assert!(matches!(err, WireError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }
}
