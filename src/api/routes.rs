//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, decrement_handler, delete_handler, delete_multiple_handler,
    get_handler, get_multiple_handler, has_handler, health_handler, increment_handler,
    set_handler, set_multiple_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a key-value pair
/// - `GET /get/:key` - Retrieve a value by key
/// - `GET /has/:key` - Check whether a key holds a value
/// - `DELETE /del/:key` - Delete a key
/// - `POST /incr/:key`, `POST /decr/:key` - Adjust an integer counter
/// - `POST /mget`, `PUT /mset`, `POST /mdel` - Batch variants
/// - `DELETE /clear` - Remove every entry
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/has/:key", get(has_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/incr/:key", post(increment_handler))
        .route("/decr/:key", post(decrement_handler))
        .route("/mget", post(get_multiple_handler))
        .route("/mset", put(set_multiple_handler))
        .route("/mdel", post(delete_multiple_handler))
        .route("/clear", delete(clear_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
