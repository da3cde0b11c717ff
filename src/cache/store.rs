//! File Cache Store Module
//!
//! One JSON file per key, written through a locked temporary file and an
//! atomic rename so readers only ever see a complete entry.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{
    entry_file_name, validate_key, Cache, CacheEntry, Ttl, CACHE_EXTENSION,
    DEFAULT_COUNTER_TTL_SECS,
};
use crate::config::Config;
use crate::error::Result;

/// Prefix of in-flight temporary files; they never carry the cache extension.
const TEMP_PREFIX: &str = ".tmp-";

// == File Cache ==
/// File-backed cache rooted at a single directory.
///
/// The instance owns every `*.cache` file in its directory. Operations
/// block on filesystem I/O and take no in-process locks.
#[derive(Debug, Clone)]
pub struct FileCache {
    /// Directory holding the entry files
    directory: PathBuf,
}

impl FileCache {
    // == Constructor ==
    /// Creates a cache rooted at `directory`, creating it (and its parents) if needed.
    ///
    /// A directory that cannot be created is not fatal: it is retried before every write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        if let Err(e) = fs::create_dir_all(&directory) {
            warn!(
                "Failed to create cache directory {}: {}",
                directory.display(),
                e
            );
        }

        Self { directory }
    }

    /// Creates a cache from the configured directory.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.cache_dir)
    }

    /// Returns the cache directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    // == Entry Path ==
    /// Validates `key` and returns the file its entry is stored in.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.directory.join(entry_file_name(key)))
    }

    // == Typed Access ==
    /// Reads a value and decodes it as `T`. Misses, null values and values
    /// that do not decode as `T` all return `None`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let value = self.get(key, Value::Null)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(serde_json::from_value(value).ok())
    }

    /// Serializes `value` to JSON and stores it.
    pub fn set_as<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Ttl>) -> Result<bool> {
        validate_key(key)?;
        match serde_json::to_value(value) {
            Ok(value) => self.set(key, value, ttl),
            Err(e) => {
                warn!("Failed to serialize value for key '{}': {}", key, e);
                Ok(false)
            }
        }
    }

    // == Remaining TTL ==
    /// Seconds left on the entry's expiry, floored at 1, or None when the
    /// entry is missing, unreadable or never expires.
    fn remaining_ttl(&self, path: &Path) -> Option<i64> {
        self.read_entry(path)
            .and_then(|entry| entry.ttl_remaining())
            .map(|seconds| seconds.max(1))
    }

    // == File Helpers ==
    fn read_entry(&self, path: &Path) -> Option<CacheEntry> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        let entry = CacheEntry::decode(&bytes);
        if entry.is_none() {
            warn!("Ignoring undecodable cache entry {}", path.display());
        }
        entry
    }

    /// Writes `contents` to a locked temp file in the cache directory, then
    /// renames it over `path`. The existing entry is untouched unless the
    /// rename succeeds.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> bool {
        if let Err(e) = fs::create_dir_all(&self.directory) {
            warn!(
                "Failed to create cache directory {}: {}",
                self.directory.display(),
                e
            );
            return false;
        }

        let mut temp = match tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(&self.directory)
        {
            Ok(temp) => temp,
            Err(e) => {
                warn!("Failed to create temporary cache file: {}", e);
                return false;
            }
        };

        let written = FileExt::lock_exclusive(temp.as_file())
            .and_then(|_| temp.write_all(contents))
            .and_then(|_| temp.flush())
            .and_then(|_| temp.as_file().sync_all())
            .and_then(|_| FileExt::unlock(temp.as_file()));
        if let Err(e) = written {
            warn!(
                "Failed to write temporary cache file {}: {}",
                temp.path().display(),
                e
            );
            return false;
        }

        match temp.persist(path) {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    "Failed to move cache entry into place at {}: {}",
                    path.display(),
                    e.error
                );
                false
            }
        }
    }

    /// Removes a file; a file that is already gone counts as removed.
    fn remove_file(&self, path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => {
                warn!("Failed to remove cache file {}: {}", path.display(), e);
                false
            }
        }
    }

    fn entry_glob(&self) -> String {
        let escaped = glob::Pattern::escape(&self.directory.to_string_lossy());
        Path::new(&escaped)
            .join(format!("*.{}", CACHE_EXTENSION))
            .to_string_lossy()
            .into_owned()
    }
}

impl Cache for FileCache {
    fn get(&self, key: &str, default: Value) -> Result<Value> {
        let path = self.entry_path(key)?;

        let Some(entry) = self.read_entry(&path) else {
            debug!("Cache miss for key '{}'", key);
            return Ok(default);
        };

        if entry.is_expired() {
            debug!("Cache entry for key '{}' expired, removing", key);
            self.remove_file(&path);
            return Ok(default);
        }

        debug!("Cache hit for key '{}'", key);
        Ok(entry.value.unwrap_or(default))
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Ttl>) -> Result<bool> {
        let path = self.entry_path(key)?;
        let entry = CacheEntry::new(value, ttl.map(|ttl| ttl.as_seconds()));

        let contents = match serde_json::to_vec(&entry) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to encode cache entry for key '{}': {}", key, e);
                return Ok(false);
            }
        };

        let stored = self.write_atomic(&path, &contents);
        if stored {
            debug!("Stored key '{}' (expires_at={:?})", key, entry.expires_at);
        }
        Ok(stored)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(true);
        }
        Ok(self.remove_file(&path))
    }

    fn clear(&self) -> bool {
        let paths = match glob::glob(&self.entry_glob()) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(
                    "Failed to enumerate cache directory {}: {}",
                    self.directory.display(),
                    e
                );
                return false;
            }
        };

        let mut removed = 0usize;
        for path in paths {
            match path {
                Ok(path) => {
                    if self.remove_file(&path) {
                        removed += 1;
                    }
                }
                Err(e) => warn!("Skipping unreadable cache path: {}", e),
            }
        }

        debug!("Cleared {} cache entries", removed);
        true
    }

    /// Reads, adds and writes back without any lock. Two concurrent
    /// increments of the same key can lose an update.
    ///
    /// The rewritten entry expires after the time the old entry had left
    /// (at least one second), or after an hour when the old entry had no
    /// expiry.
    fn increment(&self, key: &str, delta: i64) -> Result<i64> {
        let current = coerce_to_integer(&self.get(key, Value::from(0))?);
        let next = current.wrapping_add(delta);

        let path = self.entry_path(key)?;
        let ttl = self
            .remaining_ttl(&path)
            .unwrap_or(DEFAULT_COUNTER_TTL_SECS);

        if !self.set(key, Value::from(next), Some(Ttl::Seconds(ttl)))? {
            warn!("Failed to persist counter '{}'", key);
        }
        Ok(next)
    }
}

// == Integer Coercion ==
/// Interprets a stored value as an integer for counter arithmetic.
fn coerce_to_integer(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(flag) => i64::from(*flag),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|n| i64::try_from(n).unwrap_or(i64::MAX)))
            .or_else(|| number.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(text) => leading_integer(text),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(_) => 1,
    }
}

/// Parses the optionally signed run of digits at the start of `text`.
fn leading_integer(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return 0;
    }

    let number = &trimmed[..sign_len + digits_len];
    number.parse().unwrap_or(if number.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    })
}
