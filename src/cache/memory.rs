//! In-memory store with the same addressing as [`FileStore`](super::FileStore)

use std::collections::BTreeMap;

use crate::cache::KeyValueStore;
use crate::core::util::fingerprint;
use crate::error::StorageError;

/// Store backed by a map of fingerprint to payload
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(&fingerprint(key)).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        self.entries.insert(fingerprint(key), payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        store.write("x", "hello").unwrap();
        assert_eq!(store.read("x").unwrap().as_deref(), Some("hello"));
        assert!(store.read("y").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let mut store = MemoryStore::new();
        store.write("x", "1").unwrap();
        store.write("x", "2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("x").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        store.write("x", "1").unwrap();
        store.write("y", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(store.read("x").unwrap().is_none());
    }
}
