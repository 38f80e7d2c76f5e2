//! Tool catalog SDK facade.
//!
//! Bundles the catalog crates behind feature flags so front ends can pull in
//! only what they need. The registry core is always available.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use catalog_primitives as primitives;

/// Declarations, validation, store, resolver, and query façade.
pub use catalog_registry as registry;

/// Catalog persistence (enabled by `storage` feature).
#[cfg(feature = "storage")]
pub use catalog_storage as storage;

/// Settings and requirement checks (enabled by `config` feature).
#[cfg(feature = "config")]
pub use catalog_config as config;

pub use catalog_registry::{
    CatalogError, CatalogResult, ToolCatalog, ToolDeclaration, ToolFilter, ToolRecord, Verdict,
};
