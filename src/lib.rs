//! File Cache - A file-backed key-value cache
//!
//! Stores one JSON file per key with per-entry TTL, atomic
//! write-then-rename updates and lazy expiry on read.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, FileCache, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
