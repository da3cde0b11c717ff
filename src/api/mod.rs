//! API Module
//!
//! HTTP handlers and routing that expose the file cache over REST.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Check whether a key holds a value
//! - `DELETE /del/:key` - Delete a key
//! - `POST /incr/:key`, `POST /decr/:key` - Counter helpers
//! - `POST /mget`, `PUT /mset`, `POST /mdel` - Batch operations
//! - `DELETE /clear` - Remove every entry
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
