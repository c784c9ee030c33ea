//! Cache module - Persistent key/value store addressed by key fingerprint
//!
//! Provides:
//! - The [`KeyValueStore`] interface used by the pipeline and the generator
//! - A filesystem-backed store (one file per entry, named by SHA-1 of the key)
//! - An in-memory store with the same semantics

#[cfg(test)]
pub mod memory;
pub mod store;

#[cfg(test)]
pub use memory::MemoryStore;
pub use store::FileStore;

use crate::error::StorageError;

/// Reserved key holding the last observed configuration version
pub const CONFIG_VERSION_KEY: &str = "config_version";

/// Minimal string key/value store
///
/// Keys are opaque to the store. A write replaces any previous payload for
/// the same key in full; `clear` removes every entry.
pub trait KeyValueStore {
    /// Read the payload stored under `key`, `None` if nothing was written
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `payload` under `key`, replacing any prior payload
    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Remove every entry
    fn clear(&mut self) -> Result<(), StorageError>;
}
