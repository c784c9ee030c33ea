//! Error taxonomy - one error type per failure domain
//!
//! The pipeline has three independent failure domains. Each has its own
//! error type carrying a message and an optional wrapped cause, and
//! [`PipelineError`] tags them so the binary can map each to an exit code.

use std::error::Error as StdError;
use std::io;
use std::path::Path;

use thiserror::Error;

/// Boxed underlying cause
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// Configuration could not be found, read, or parsed
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
    #[source]
    source: Option<Cause>,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Which cache operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    DirectoryCreation,
    Read,
    Write,
    Delete,
}

/// A cache operation failed
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
    #[source]
    source: Option<io::Error>,
}

impl StorageError {
    pub fn directory_creation(path: &Path, source: io::Error) -> Self {
        Self::io(
            StorageErrorKind::DirectoryCreation,
            format!("Could not create the cache directory: {}", path.display()),
            source,
        )
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::io(
            StorageErrorKind::Read,
            format!("Could not read from the file: {}", path.display()),
            source,
        )
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::io(
            StorageErrorKind::Write,
            format!("Could not write to the file: {}", path.display()),
            source,
        )
    }

    pub fn delete(path: &Path, source: io::Error) -> Self {
        Self::io(
            StorageErrorKind::Delete,
            format!("Could not delete the file: {}", path.display()),
            source,
        )
    }

    fn io(kind: StorageErrorKind, message: String, source: io::Error) -> Self {
        Self {
            kind,
            message,
            source: Some(source),
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }
}

/// Generation failed (unknown profile, unreachable source, exhausted retries)
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GenerationError {
    message: String,
    #[source]
    source: Option<Cause>,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Terminal failure of the pipeline, tagged by domain
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    /// Process exit code for this failure domain
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Configuration(_) => 1,
            PipelineError::Storage(_) => 2,
            PipelineError::Generation(_) => 3,
        }
    }

    /// The wrapped underlying cause, if any
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.source()
    }
}
