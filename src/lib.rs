//! # arraywire
//!
//! Wire-serialization support for numeric arrays and temporal values.
//!
//! arraywire turns n-dimensional arrays, dates, times and durations into
//! JSON-safe payloads: temporal values become float64 epoch milliseconds,
//! masked and non-finite elements become `"NaN"`/`"Infinity"` markers, and
//! arrays of common numeric dtypes can travel as base64 binary buffers.
//!
//! ## Quick Start
//!
//! ```rust
//! use arraywire::{serialize_array, Config, EncodedArray, NdArray};
//!
//! let config = Config::default();
//!
//! // float64 is binary-eligible: sent as a base64 buffer
//! let prices = NdArray::from_vec(vec![1.5f64, 2.25, f64::NAN]);
//! assert!(serialize_array(prices, &config)?.is_buffer());
//!
//! // int64 is not: sent as a JSON list
//! let counts = NdArray::from_vec(vec![1i64, 2, 3]);
//! assert_eq!(
//!     serialize_array(counts, &config)?,
//!     EncodedArray::List(serde_json::json!([1, 2, 3]))
//! );
//! # Ok::<(), arraywire::WireError>(())
//! ```
//!
//! ## Key Concepts
//!
//! ### Epoch milliseconds
//!
//! Every datetime-like value is sent as a float64 count of milliseconds
//! since 1970-01-01T00:00:00 UTC, every timedelta-like value as its length
//! in milliseconds. "Not a time" becomes NaN.
//!
//! ### Buffer envelopes
//!
//! Arrays of `float32`, `float64`, `uint8`, `int8`, `uint16`, `int16`,
//! `uint32` and `int32` may be sent as a [`BufferEnvelope`]: the raw
//! element bytes in base64 plus shape, dtype and byte order.
//!
//! ### Identifiers
//!
//! Wire objects are tagged with an [`Identifier`]: a short counter-based
//! string in simple mode, a random UUID otherwise.
//!
//! ## Features
//!
//! - `columnar` (default) - nanosecond `Timestamp`/`Timedelta`, `Period`,
//!   NaT, and the `Series`/`Index` adapter
//!
//! ## Thread Safety
//!
//! All transforms are pure functions. [`IdAllocator`] is `Send + Sync` and
//! hands out distinct IDs across threads.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod error;
mod id;

/// Temporal value recognition and epoch-millisecond conversion.
pub mod temporal;

// Array pipeline
mod array;
mod buffer;

#[cfg(feature = "columnar")]
mod series;

// ============================================================================
// Public API re-exports
// ============================================================================

// Configuration
pub use config::{parse_bool_like, Config, EnvSettings, IdMode, IdSettings, SIMPLE_IDS_ENV};

// Error handling
pub use error::{DecodeError, Result, WireError};

// Identifiers
pub use id::{new_globally_unique_id, IdAllocator, Identifier};

// Temporal values
pub use temporal::{
    is_datetime_like, is_timedelta_like, normalize_array, recognized_datetime_kinds,
    to_epoch_millis, to_epoch_millis_duration, Datetime64, TemporalKind, TemporalValue,
    Timedelta64, TimeUnit, NAT,
};

#[cfg(feature = "columnar")]
pub use temporal::{Period, PeriodFreq, Timedelta, Timestamp};

// Arrays
pub use array::{
    prepare_for_serialization, serialize_array, to_json_list, ArrayData, ArrayLike, DType,
    DTypeKind, Element, EncodedArray, NdArray, ObjectValue,
};

// Binary buffers
pub use buffer::{
    decode_buffer, encode_buffer, is_binary_eligible, BufferData, BufferEnvelope, BufferRef,
    ByteOrder, BINARY_ARRAY_TYPES,
};

// Columnar containers
#[cfg(feature = "columnar")]
pub use series::{extract_values, Columnar, Index, PeriodIndex, Series};

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common arraywire usage.
///
/// ```rust
/// use arraywire::prelude::*;
/// ```
pub mod prelude {
    pub use crate::array::{serialize_array, to_json_list, EncodedArray, NdArray, ObjectValue};
    pub use crate::buffer::{decode_buffer, encode_buffer, BufferEnvelope};
    pub use crate::config::Config;
    pub use crate::error::{Result, WireError};
    pub use crate::id::{IdAllocator, Identifier};
    pub use crate::temporal::{to_epoch_millis, TemporalValue};
}
