//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cache::Ttl;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in seconds (no expiration if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// TTL in the form the cache expects.
    pub fn ttl(&self) -> Option<Ttl> {
        self.ttl.map(Ttl::Seconds)
    }
}

/// Request body for PUT /mset
#[derive(Debug, Clone, Deserialize)]
pub struct SetMultipleRequest {
    /// Key-value pairs to store
    pub values: Map<String, Value>,
    /// Optional TTL in seconds shared by every pair
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetMultipleRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.values.is_empty() {
            return Some("At least one value is required".to_string());
        }
        None
    }

    /// TTL in the form the cache expects.
    pub fn ttl(&self) -> Option<Ttl> {
        self.ttl.map(Ttl::Seconds)
    }
}

/// Request body for POST /mget and POST /mdel
#[derive(Debug, Clone, Deserialize)]
pub struct KeysRequest {
    /// Keys to operate on
    pub keys: Vec<String>,
    /// Value returned for keys that miss (mget only)
    #[serde(default)]
    pub default: Value,
}

impl KeysRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.keys.is_empty() {
            return Some("At least one key is required".to_string());
        }
        None
    }

    /// Borrowed view of the keys.
    pub fn key_refs(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }
}

/// Optional request body for POST /incr/:key and POST /decr/:key
#[derive(Debug, Clone, Deserialize)]
pub struct CounterRequest {
    /// Amount to add or subtract
    #[serde(default = "default_delta")]
    pub delta: i64,
}

impl Default for CounterRequest {
    fn default() -> Self {
        Self {
            delta: default_delta(),
        }
    }
}

fn default_delta() -> i64 {
    1
}
