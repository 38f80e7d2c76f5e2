//! Shared error definitions for catalog primitives.

use thiserror::Error;

/// Result alias used throughout the catalog crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing catalog primitive types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An identifier (tool name, type tag, capability tag) failed validation.
    #[error("invalid {kind} `{value}`: {reason}")]
    InvalidIdentifier {
        /// Which kind of identifier was rejected.
        kind: &'static str,
        /// The offending value.
        value: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Execution mode was neither `sync` nor `async`.
    #[error("invalid execution mode `{value}`: expected `sync` or `async`")]
    InvalidExecutionMode {
        /// The offending value.
        value: String,
    },

    /// Compatibility entry could not be parsed.
    #[error("invalid compatibility token `{token}`: {reason}")]
    InvalidToken {
        /// The raw token text.
        token: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
