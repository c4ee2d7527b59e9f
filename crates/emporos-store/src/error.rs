//! # Store Error Types
//!
//! Error types for the flat-file persistence layer.
//!
//! Flow: `std::io::Error` / `serde_json::Error` are wrapped with context
//! here; the presentation layer above decides what the user sees.

use std::path::PathBuf;

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's contents could not be encoded or decoded.
    #[error("Invalid store file {path}: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A requested record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn encoding(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Encoding {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
