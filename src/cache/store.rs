//! Cache store - One file per entry under the cache directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::cache::KeyValueStore;
use crate::core::util::fingerprint;
use crate::error::StorageError;

/// Filesystem-backed store
///
/// Each entry lives in `<dir>/<sha1(key)>` with the raw payload as content.
/// There is no manifest and no in-memory layer: every call hits the disk.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the directory (recursively) if absent
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|e| StorageError::directory_creation(&dir, e))?;
            debug!(dir = %dir.display(), "created cache directory");
        }
        Ok(Self { dir })
    }

    /// Cache directory this store owns
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(fingerprint(key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(payload) => {
                trace!(key, "cache hit");
                Ok(Some(payload))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(key, "cache miss");
                Ok(None)
            }
            Err(e) => Err(StorageError::read(&path, e)),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key);
        fs::write(&path, payload).map_err(|e| StorageError::write(&path, e))?;
        trace!(key, bytes = payload.len(), "cache write");
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::delete(&self.dir, e))?;

        let mut removed = 0usize;
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::delete(&self.dir, e))?;
            let path = entry.path();
            // Subdirectories are not ours to touch
            if !path.is_file() {
                continue;
            }
            fs::remove_file(&path).map_err(|e| StorageError::delete(&path, e))?;
            removed += 1;
        }

        debug!(dir = %self.dir.display(), removed, "cache cleared");
        Ok(())
    }
}
