//! Common utilities

use sha1::{Digest, Sha1};

/// Compute the SHA-1 fingerprint of a cache key as lowercase hex
pub fn fingerprint(key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}
