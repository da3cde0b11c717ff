//! Cache Capability
//!
//! The synchronous key-value contract implemented by `FileCache`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::cache::Ttl;
use crate::error::Result;

/// Synchronous key-value cache.
///
/// Every key-taking method fails with `CacheError::InvalidKey` for an
/// invalid key. All storage failures are soft: reads fall back to the
/// supplied default, writes and deletes return `false`.
///
/// Batch methods apply the single-key operation in order and are not
/// atomic. A failed key does not roll back earlier keys, and an invalid
/// key aborts the batch at that point.
pub trait Cache: Send + Sync {
    /// Returns the stored value, or `default` on a miss, an expired entry
    /// or an unreadable entry.
    fn get(&self, key: &str, default: Value) -> Result<Value>;

    /// Stores `value` under `key`. `None` means the entry never expires.
    fn set(&self, key: &str, value: Value, ttl: Option<Ttl>) -> Result<bool>;

    /// Removes the entry. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<bool>;

    /// Removes every entry. Returns `false` only when the entries could not be enumerated.
    fn clear(&self) -> bool;

    /// Whether `key` currently holds a non-null value.
    ///
    /// An entry whose stored value is null reads the same as a missing key.
    fn has(&self, key: &str) -> Result<bool> {
        Ok(!self.get(key, Value::Null)?.is_null())
    }

    /// Adds `delta` to the integer stored under `key` and returns the new value.
    fn increment(&self, key: &str, delta: i64) -> Result<i64>;

    /// Subtracts `delta`; shorthand for `increment(key, -delta)`.
    fn decrement(&self, key: &str, delta: i64) -> Result<i64> {
        self.increment(key, delta.wrapping_neg())
    }

    fn get_multiple(&self, keys: &[&str], default: Value) -> Result<HashMap<String, Value>> {
        let mut values = HashMap::with_capacity(keys.len());
        for key in keys {
            let value = self.get(key, default.clone())?;
            values.insert((*key).to_string(), value);
        }
        Ok(values)
    }

    fn set_multiple(&self, values: Vec<(String, Value)>, ttl: Option<Ttl>) -> Result<bool> {
        let mut success = true;
        for (key, value) in values {
            if !self.set(&key, value, ttl)? {
                warn!("Batch set failed for key '{}'", key);
                success = false;
            }
        }
        Ok(success)
    }

    fn delete_multiple(&self, keys: &[&str]) -> Result<bool> {
        let mut success = true;
        for key in keys {
            if !self.delete(key)? {
                warn!("Batch delete failed for key '{}'", key);
                success = false;
            }
        }
        Ok(success)
    }
}
