//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /set
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
    /// Seconds until the entry expires; absent for entries that never expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, expires_in: Option<i64>) -> Self {
        let key = key.into();
        let message = match expires_in {
            Some(seconds) => format!("Cached '{}' for {}s", key, seconds),
            None => format!("Cached '{}' with no expiry", key),
        };
        Self {
            message,
            key,
            expires_in,
        }
    }
}

/// Response body for DELETE /del/:key
///
/// Deleting a key that has no entry file is reported the same way.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("No entry file remains for '{}'", key),
            key,
        }
    }
}

/// Response body for GET /has/:key
#[derive(Debug, Clone, Serialize)]
pub struct HasResponse {
    pub key: String,
    pub exists: bool,
}

/// Response body for POST /incr/:key and POST /decr/:key
#[derive(Debug, Clone, Serialize)]
pub struct CounterResponse {
    pub key: String,
    /// Counter value after the update
    pub value: i64,
}

/// Response body for POST /mget
#[derive(Debug, Clone, Serialize)]
pub struct GetMultipleResponse {
    pub values: Map<String, Value>,
}

/// Response body for PUT /mset, POST /mdel and DELETE /clear
#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub success: bool,
}

/// Response body for GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Directory holding the entry files
    pub cache_dir: String,
    /// RFC 3339 server time
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(cache_dir: &Path) -> Self {
        Self {
            status: "healthy".to_string(),
            cache_dir: cache_dir.display().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"a": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"key": "test_key", "value": {"a": 1}}));
    }

    #[test]
    fn test_set_response_with_ttl() {
        let json = serde_json::to_value(SetResponse::new("session", Some(90))).unwrap();
        assert_eq!(json["key"], "session");
        assert_eq!(json["expires_in"], 90);
        assert_eq!(json["message"], "Cached 'session' for 90s");
    }

    #[test]
    fn test_set_response_without_ttl_omits_expiry() {
        let json = serde_json::to_value(SetResponse::new("config", None)).unwrap();
        assert!(json.get("expires_in").is_none());
        assert!(json["message"].as_str().unwrap().contains("no expiry"));
    }

    #[test]
    fn test_delete_response_names_key() {
        let json = serde_json::to_value(DeleteResponse::new("old")).unwrap();
        assert_eq!(json["key"], "old");
        assert!(json["message"].as_str().unwrap().contains("'old'"));
    }

    #[test]
    fn test_health_response_reports_directory() {
        let resp = HealthResponse::healthy(Path::new("/var/cache/app"));
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.cache_dir, "/var/cache/app");
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.timestamp).is_ok());
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("bad key")).unwrap();
        assert_eq!(json, json!({"error": "bad key"}));
    }
}
