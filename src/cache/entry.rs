//! Cache Entry Module
//!
//! Defines the record persisted for each key and its JSON encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry as stored on disk.
///
/// Encoded as `{"value": ..., "expires_at": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored value; `None` when the field is missing or null
    #[serde(default)]
    pub value: Option<Value>,
    /// Expiration timestamp (Unix seconds), None = no expiration
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` from now, or never.
    pub fn new(value: Value, ttl_seconds: Option<i64>) -> Self {
        let expires_at = ttl_seconds.map(|ttl| current_timestamp().saturating_add(ttl));

        Self {
            value: Some(value),
            expires_at,
        }
    }

    // == Decode ==
    /// Parses an entry file. Anything that is not a JSON object with the
    /// expected field types yields `None`.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let raw: Value = serde_json::from_slice(bytes).ok()?;
        if !raw.is_object() {
            return None;
        }
        serde_json::from_value(raw).ok()
    }

    // == Is Expired ==
    /// An entry is expired once its expiry is strictly before `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|expires| expires < now)
    }

    /// Checks expiry against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp())
    }

    // == Time To Live ==
    /// Returns remaining TTL in seconds (0 once elapsed), or None if no expiration is set.
    pub fn ttl_remaining(&self) -> Option<i64> {
        let now = current_timestamp();
        self.expires_at
            .map(|expires| expires.saturating_sub(now).max(0))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}
