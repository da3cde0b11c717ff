//! Cache Module
//!
//! File-backed key-value storage with per-entry TTL and atomic writes.
//! Each key lives in its own `<sha256-of-key>.cache` file inside a single
//! flat directory.

mod entry;
mod key;
mod store;
mod traits;
mod ttl;


// Re-export public types
pub use entry::{current_timestamp, CacheEntry};
pub use key::{entry_file_name, validate_key};
pub use store::FileCache;
pub use traits::Cache;
pub use ttl::Ttl;

// == Public Constants ==
/// File extension carried by every entry file
pub const CACHE_EXTENSION: &str = "cache";

/// Characters that may not appear in a cache key
pub const RESERVED_CHARACTERS: &str = "{}()/\\@:";

/// TTL applied by `increment`/`decrement` when the entry has no expiry to carry over
pub const DEFAULT_COUNTER_TTL_SECS: i64 = 3600;

/// Default cache directory when none is configured
pub const DEFAULT_CACHE_DIR: &str = "storage/cache";
