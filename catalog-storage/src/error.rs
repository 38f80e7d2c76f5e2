//! Error types for catalog persistence.

use catalog_registry::CatalogError;
use serde_json::Error as SerdeError;
use thiserror::Error;

/// Errors emitted by storage backends and persistent sessions.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure while reading or writing the catalog file.
    #[error("i/o error: {source}")]
    Io {
        /// Source [`std::io::Error`].
        #[from]
        source: std::io::Error,
    },
    /// Catalog file is not a JSON array of declarations.
    #[error("serialization error: {source}")]
    Serialization {
        /// Source [`serde_json::Error`].
        #[from]
        source: SerdeError,
    },
    /// The catalog rejected the operation.
    #[error(transparent)]
    Catalog {
        /// Source [`CatalogError`].
        #[from]
        source: CatalogError,
    },
    /// Backend refused to persist the catalog.
    #[error("catalog backend unavailable: {reason}")]
    Unavailable {
        /// Human-readable reason describing the failure.
        reason: String,
    },
}

impl StorageError {
    /// Helper to construct unavailable errors from string-like values.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns the catalog error wrapped by this error, if any.
    #[must_use]
    pub fn as_catalog(&self) -> Option<&CatalogError> {
        match self {
            Self::Catalog { source } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
