//! Source lists - Fetch name lists, memoized in the cache

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cache::KeyValueStore;
use crate::config::Config;
use crate::core::paths::normalize_path;
use crate::error::GenerationError;

/// Cache key under which a fetched source is memoized
pub fn source_key(resolved: &Path) -> String {
    format!("source:{}", normalize_path(resolved))
}

/// Split source text into names: one per line, trimmed, `#` comments skipped
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Fetch the names of one source, consulting the cache first
pub fn fetch<S: KeyValueStore>(
    config: &Config,
    cache: &mut S,
    source: &Path,
) -> Result<Vec<String>, GenerationError> {
    let resolved = config.resolve_source(source);
    let key = source_key(&resolved);

    let cached = cache.read(&key).map_err(|e| {
        GenerationError::with_source(format!("Could not look up the source: {}", source.display()), e)
    })?;

    let text = match cached {
        Some(text) => text,
        None => {
            debug!(source = %resolved.display(), "fetching source");
            let text = fs::read_to_string(&resolved).map_err(|e| {
                GenerationError::with_source(
                    format!("Could not fetch the source: {}", resolved.display()),
                    e,
                )
            })?;
            cache.write(&key, &text).map_err(|e| {
                GenerationError::with_source(
                    format!("Could not cache the source: {}", source.display()),
                    e,
                )
            })?;
            text
        }
    };

    Ok(parse_names(&text))
}

/// Fetch several sources and concatenate their names, dropping duplicates
pub fn fetch_all<S: KeyValueStore>(
    config: &Config,
    cache: &mut S,
    sources: &[impl AsRef<Path>],
) -> Result<Vec<String>, GenerationError> {
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for source in sources {
        for name in fetch(config, cache, source.as_ref())? {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    Ok(names)
}
