//! Key Module
//!
//! Key validation and the key-to-filename mapping.

use sha2::{Digest, Sha256};

use crate::cache::{CACHE_EXTENSION, RESERVED_CHARACTERS};
use crate::error::{CacheError, Result};

// == Validate Key ==
/// Rejects empty keys and keys containing any of `{}()/\@:`.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }

    if let Some(reserved) = key.chars().find(|c| RESERVED_CHARACTERS.contains(*c)) {
        return Err(CacheError::InvalidKey(format!(
            "'{}' contains reserved character '{}'",
            key, reserved
        )));
    }

    Ok(())
}

// == Entry File Name ==
/// Maps a key to its entry file name: the hex SHA-256 digest plus the cache extension.
///
/// The mapping is one-way, so keys cannot be listed back from the directory.
pub fn entry_file_name(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}.{}", hasher.finalize(), CACHE_EXTENSION)
}
