//! Core shared types for the tool catalog.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod mode;
mod name;
mod token;

/// Error type and result alias shared across the catalog crates.
pub use error::{Error, Result};
/// Declared execution model of a tool.
pub use mode::ExecutionMode;
/// Validated identifiers used by tool declarations.
pub use name::{CapabilityTag, ToolName, ToolType};
/// Parsed compatibility entries.
pub use token::{CompatToken, TYPE_PREFIX};
