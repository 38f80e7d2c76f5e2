//! Errors produced by catalog operations.

use thiserror::Error;

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors produced by declaration validation, the store, and the façade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Declaration was malformed or self-referential.
    #[error("invalid tool declaration `{name}`: {}", .problems.join("; "))]
    Validation {
        /// Declared name, or `<unnamed>` when the name was missing.
        name: String,
        /// Every problem found, in field order.
        problems: Vec<String>,
    },

    /// Tool name collided with an existing registration.
    #[error("tool `{name}` is already registered")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },

    /// A pair query named the same tool twice.
    #[error("cannot check tool `{name}` against itself")]
    SelfComparison {
        /// The repeated name.
        name: String,
    },

    /// Requested tool does not exist.
    #[error("tool `{name}` is not registered")]
    ToolNotFound {
        /// Name of the missing tool.
        name: String,
    },
}

impl CatalogError {
    /// Creates a not-found error for the supplied name.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound { name: name.into() }
    }

    /// Stable machine-readable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::DuplicateTool { .. } => "duplicate_tool",
            Self::SelfComparison { .. } => "self_comparison",
            Self::ToolNotFound { .. } => "tool_not_found",
        }
    }
}
