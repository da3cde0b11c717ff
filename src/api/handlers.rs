//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. Cache calls block
//! on filesystem I/O, so each one runs on the blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, FileCache};
use crate::error::{CacheError, Result};
use crate::models::{
    BatchResponse, CounterRequest, CounterResponse, DeleteResponse, GetMultipleResponse,
    GetResponse, HasResponse, HealthResponse, KeysRequest, SetMultipleRequest, SetRequest,
    SetResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The file cache; it carries no in-memory state, so no lock is needed
    pub cache: Arc<FileCache>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: FileCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(FileCache::from_config(config))
    }
}

/// Runs a cache operation on the blocking pool.
async fn with_cache<T, F>(state: &AppState, op: F) -> Result<T>
where
    F: FnOnce(&FileCache) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let cache = Arc::clone(&state.cache);
    tokio::task::spawn_blocking(move || op(&cache))
        .await
        .map_err(|e| CacheError::Internal(format!("Cache task failed: {}", e)))?
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    let key = req.key.clone();
    let ttl = req.ttl();
    let stored = with_cache(&state, move |cache| cache.set(&req.key, req.value, ttl)).await?;

    if !stored {
        return Err(CacheError::Storage(format!("Failed to write key '{}'", key)));
    }
    Ok(Json(SetResponse::new(key, ttl.map(|t| t.as_seconds()))))
}

/// Handler for GET /get/:key
///
/// A missing key and a stored null are both reported as not found.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let lookup = key.clone();
    let value = with_cache(&state, move |cache| cache.get(&lookup, Value::Null)).await?;

    if value.is_null() {
        return Err(CacheError::NotFound(key));
    }
    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<HasResponse>> {
    let lookup = key.clone();
    let exists = with_cache(&state, move |cache| cache.has(&lookup)).await?;

    Ok(Json(HasResponse { key, exists }))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let target = key.clone();
    let deleted = with_cache(&state, move |cache| cache.delete(&target)).await?;

    if !deleted {
        return Err(CacheError::Storage(format!("Failed to delete key '{}'", key)));
    }
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /incr/:key
pub async fn increment_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Option<Json<CounterRequest>>,
) -> Result<Json<CounterResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let target = key.clone();
    let value = with_cache(&state, move |cache| cache.increment(&target, req.delta)).await?;

    Ok(Json(CounterResponse { key, value }))
}

/// Handler for POST /decr/:key
pub async fn decrement_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Option<Json<CounterRequest>>,
) -> Result<Json<CounterResponse>> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let target = key.clone();
    let value = with_cache(&state, move |cache| cache.decrement(&target, req.delta)).await?;

    Ok(Json(CounterResponse { key, value }))
}

/// Handler for POST /mget
pub async fn get_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<GetMultipleResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let values = with_cache(&state, move |cache| {
        cache.get_multiple(&req.key_refs(), req.default.clone())
    })
    .await?;

    Ok(Json(GetMultipleResponse {
        values: values.into_iter().collect(),
    }))
}

/// Handler for PUT /mset
pub async fn set_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<SetMultipleRequest>,
) -> Result<Json<BatchResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    let values: Vec<(String, Value)> = req.values.into_iter().collect();
    let success = with_cache(&state, move |cache| cache.set_multiple(values, ttl)).await?;

    if !success {
        return Err(CacheError::Storage("One or more keys failed to write".to_string()));
    }
    Ok(Json(BatchResponse { success }))
}

/// Handler for POST /mdel
pub async fn delete_multiple_handler(
    State(state): State<AppState>,
    Json(req): Json<KeysRequest>,
) -> Result<Json<BatchResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let success = with_cache(&state, move |cache| cache.delete_multiple(&req.key_refs())).await?;

    if !success {
        return Err(CacheError::Storage("One or more keys failed to delete".to_string()));
    }
    Ok(Json(BatchResponse { success }))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<BatchResponse>> {
    let success = with_cache(&state, |cache| Ok(cache.clear())).await?;

    if !success {
        return Err(CacheError::Storage("Failed to enumerate cache entries".to_string()));
    }
    Ok(Json(BatchResponse { success }))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.directory()))
}
