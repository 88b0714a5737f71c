//! Configuration types for arraywire.
//!
//! The [`Config`] struct controls:
//! - Identifier mode (simple counter IDs or globally unique UUIDs)
//! - Whether eligible arrays are sent as binary buffers
//!
//! Identifier mode is read through the [`IdSettings`] trait on every
//! generation call, so a provider backed by the environment
//! ([`EnvSettings`]) picks up changes without restarting.
//!
//! # Example
//! ```rust
//! use arraywire::{Config, IdMode};
//!
//! let config = Config {
//!     id_mode: IdMode::Global,
//!     ..Default::default()
//! };
//! assert!(config.binary_arrays);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, WireError};

/// Environment variable selecting simple (`yes`) or global (`no`) IDs.
pub const SIMPLE_IDS_ENV: &str = "ARRAYWIRE_SIMPLE_IDS";

/// Serialization configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How new identifiers are generated.
    pub id_mode: IdMode,

    /// Send binary-eligible arrays as base64 buffers instead of JSON lists.
    ///
    /// Default: true
    pub binary_arrays: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_mode: IdMode::Simple,
            binary_arrays: true,
        }
    }
}

impl Config {
    /// Creates a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a Config from the process environment.
    ///
    /// # Errors
    /// Returns `WireError::Config` if `ARRAYWIRE_SIMPLE_IDS` is set to
    /// something that is not boolean-like.
    pub fn from_env() -> Result<Self> {
        let id_mode = match std::env::var(SIMPLE_IDS_ENV) {
            Ok(raw) => match parse_bool_like(&raw) {
                Some(simple) => IdMode::from_simple(simple),
                None => {
                    return Err(WireError::config(format!(
                        "{} must be boolean-like, got '{}'",
                        SIMPLE_IDS_ENV, raw
                    )))
                }
            },
            Err(_) => IdMode::Simple,
        };

        Ok(Self {
            id_mode,
            ..Default::default()
        })
    }
}

/// Identifier generation mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdMode {
    /// Monotonically increasing decimal IDs, unique within this process.
    #[default]
    Simple,

    /// Random UUID v4 IDs, unique across processes.
    Global,
}

impl IdMode {
    fn from_simple(simple: bool) -> Self {
        if simple {
            Self::Simple
        } else {
            Self::Global
        }
    }

    /// Returns true for simple (counter) mode.
    pub fn is_simple(&self) -> bool {
        matches!(self, Self::Simple)
    }
}

/// Provider of the simple-vs-global identifier setting.
///
/// Consulted once per [`IdAllocator::new_id`](crate::IdAllocator::new_id)
/// call; implementations must not cache on behalf of the caller.
pub trait IdSettings: Send + Sync {
    /// Returns true when simple counter IDs should be generated.
    fn simple_ids(&self) -> bool;
}

impl IdSettings for Config {
    fn simple_ids(&self) -> bool {
        self.id_mode.is_simple()
    }
}

impl IdSettings for IdMode {
    fn simple_ids(&self) -> bool {
        self.is_simple()
    }
}

/// Settings provider reading `ARRAYWIRE_SIMPLE_IDS` on every call.
///
/// Unset means simple IDs. Unparseable values fall back to simple IDs
/// and log a warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnvSettings;

impl IdSettings for EnvSettings {
    fn simple_ids(&self) -> bool {
        match std::env::var(SIMPLE_IDS_ENV) {
            Ok(raw) => parse_bool_like(&raw).unwrap_or_else(|| {
                warn!(var = SIMPLE_IDS_ENV, value = %raw, "Ignoring non-boolean setting");
                true
            }),
            Err(_) => true,
        }
    }
}

/// Parses a boolean-like setting value (`yes`/`no`, `true`/`false`,
/// `on`/`off`, `1`/`0`), case-insensitively.
pub fn parse_bool_like(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}
