//! Path resolution utilities

use std::path::{Path, PathBuf};

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Normalize a path to use '/' as separator (stable cache keys across platforms)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
