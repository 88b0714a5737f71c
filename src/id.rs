//! Identifier generation for wire objects.
//!
//! Two flavors of [`Identifier`] exist:
//! - **Simple** IDs are decimal strings from a per-allocator counter. They
//!   are unique only within one process and start at `1000`, so generated
//!   IDs are easy to tell apart from hand-authored ones.
//! - **Global** IDs are random UUID v4 strings, unique across processes
//!   with overwhelming probability.
//!
//! Switching modes mid-process does not guard against collisions with
//! simple IDs issued earlier.

use std::fmt;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::config::IdSettings;

/// Counter value before the first simple ID is issued.
const SIMPLE_ID_SEED: u64 = 999;

/// Opaque wire identifier.
///
/// Serializes as a bare JSON string.
///
/// # Example
/// ```
/// use arraywire::IdAllocator;
///
/// let ids = IdAllocator::new();
/// assert_eq!(ids.next_simple().as_str(), "1000");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Wraps an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// Issues [`Identifier`]s.
///
/// Construct one per process (or per document) and share it by reference
/// or `Arc`. The counter read-modify-write happens under a single mutex,
/// so concurrent callers never receive the same simple ID.
#[derive(Debug)]
pub struct IdAllocator {
    counter: Mutex<u64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Creates an allocator whose first simple ID is `"1000"`.
    pub fn new() -> Self {
        Self::starting_after(SIMPLE_ID_SEED)
    }

    /// Creates an allocator whose first simple ID is `last + 1`.
    pub fn starting_after(last: u64) -> Self {
        Self {
            counter: Mutex::new(last),
        }
    }

    /// Process-wide allocator for callers that cannot have one injected.
    pub fn global() -> &'static IdAllocator {
        static GLOBAL: OnceLock<IdAllocator> = OnceLock::new();
        GLOBAL.get_or_init(IdAllocator::new)
    }

    /// Returns a new ID in the mode the settings provider selects.
    ///
    /// The provider is consulted on every call.
    pub fn new_id(&self, settings: &dyn IdSettings) -> Identifier {
        if settings.simple_ids() {
            self.next_simple()
        } else {
            self.next_global()
        }
    }

    /// Increments the counter and returns its decimal form.
    ///
    /// Once the counter reaches `u64::MAX` it stops advancing and every
    /// further call returns a UUID instead, so IDs stay distinct.
    pub fn next_simple(&self) -> Identifier {
        // The counter is a plain integer; a panic elsewhere cannot leave it torn.
        let mut counter = self.counter.lock().unwrap_or_else(|e| e.into_inner());
        match counter.checked_add(1) {
            Some(next) => {
                *counter = next;
                Identifier(next.to_string())
            }
            None => {
                warn!("Simple ID counter exhausted, issuing a UUID");
                new_globally_unique_id()
            }
        }
    }

    /// Returns a random UUID v4 identifier.
    pub fn next_global(&self) -> Identifier {
        new_globally_unique_id()
    }

    /// Returns the most recently issued simple ID value.
    pub fn last_simple(&self) -> u64 {
        *self.counter.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Returns a random UUID v4 identifier, regardless of configured mode.
///
/// Used where global uniqueness is always required, such as element ids
/// embedded into shared HTML pages.
pub fn new_globally_unique_id() -> Identifier {
    Identifier(Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdMode;

    #[test]
    fn test_first_simple_id_is_1000() {
        let ids = IdAllocator::new();
        assert_eq!(ids.next_simple().as_str(), "1000");
        assert_eq!(ids.next_simple().as_str(), "1001");
        assert_eq!(ids.last_simple(), 1001);
    }

    #[test]
    fn test_starting_after() {
        let ids = IdAllocator::starting_after(41);
        assert_eq!(ids.next_simple().as_str(), "42");
    }

    #[test]
    fn test_exhausted_counter_issues_uuids() {
        let ids = IdAllocator::starting_after(u64::MAX - 1);
        assert_eq!(ids.next_simple().as_str(), u64::MAX.to_string());

        let a = ids.next_simple();
        let b = ids.next_simple();
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_ne!(a, b);
        assert_eq!(ids.last_simple(), u64::MAX);
    }

    #[test]
    fn test_new_id_follows_settings() {
        let ids = IdAllocator::new();
        assert_eq!(ids.new_id(&IdMode::Simple).as_str(), "1000");

        let global = ids.new_id(&IdMode::Global);
        assert!(Uuid::parse_str(global.as_str()).is_ok());

        // The global path does not consume counter values
        assert_eq!(ids.last_simple(), 1000);
    }

    #[test]
    fn test_globally_unique_ids_differ() {
        let a = new_globally_unique_id();
        let b = new_globally_unique_id();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_identifier_serializes_as_string() {
        let id = Identifier::new("1234");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1234\"");
        assert_eq!(format!("{}", id), "1234");
    }
}
