//! Configuration - Loads `config.json` from the configuration directory
//!
//! The configuration names a version (used to detect stale caches), the
//! cache directory, and the generation profiles.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::paths::resolve_against;
use crate::error::ConfigError;

/// Name of the configuration file inside the configuration directory
pub const CONFIG_FILE: &str = "config.json";

/// Cache directory used when the configuration does not name one
pub const DEFAULT_CACHE_DIRECTORY: &str = "cache";

fn default_separator() -> String {
    " ".to_string()
}

/// Validity rules shared by every profile kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Rules {
    /// Minimum length in characters
    #[serde(default)]
    pub min_length: Option<usize>,

    /// Maximum length in characters
    #[serde(default)]
    pub max_length: Option<usize>,

    /// Names that are never produced (case-insensitive)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Regex every produced name must match
    #[serde(default)]
    pub pattern: Option<String>,
}

/// How a profile turns its sources into names
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileKind {
    /// Every line of every source is a code name
    List { sources: Vec<PathBuf> },

    /// A name is one draw from each part, joined by `separator`
    Compound {
        parts: Vec<Vec<PathBuf>>,
        #[serde(default = "default_separator")]
        separator: String,
    },
}

/// A named generation context
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub kind: ProfileKind,

    #[serde(flatten)]
    pub rules: Rules,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    version: String,
    #[serde(default)]
    cache_directory: Option<PathBuf>,
    #[serde(default)]
    profiles: BTreeMap<String, Profile>,
}

/// Loaded configuration
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    version: String,
    cache_directory: PathBuf,
    profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load `config.json` from the configuration directory `root`
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        if !root.is_dir() {
            return Err(ConfigError::new(format!(
                "The configuration directory does not exist: {}",
                root.display()
            )));
        }

        let file_path = root.join(CONFIG_FILE);
        let content = fs::read_to_string(&file_path).map_err(|e| {
            ConfigError::with_source(
                format!("Could not read the configuration file: {}", file_path.display()),
                e,
            )
        })?;

        Self::parse(root, &content).map_err(|e| {
            ConfigError::with_source(
                format!("Could not parse the configuration file: {}", file_path.display()),
                e,
            )
        })
    }

    /// Parse configuration text; relative paths resolve against `root`
    pub fn parse(root: &Path, content: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(content)?;
        let cache_directory = file
            .cache_directory
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIRECTORY));

        Ok(Self {
            root: root.to_path_buf(),
            version: file.version,
            cache_directory: resolve_against(root, &cache_directory),
            profiles: file.profiles,
        })
    }

    /// Configuration version string
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Resolved cache directory
    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }

    /// Profile names in sorted order
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    /// Resolve a profile source path against the configuration directory
    pub fn resolve_source(&self, source: &Path) -> PathBuf {
        resolve_against(&self.root, source)
    }
}
