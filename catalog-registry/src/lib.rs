//! Tool catalog core: declaration validation, the catalog store, and the
//! compatibility resolver.
//!
//! Callers normally go through [`ToolCatalog`], which composes the store and
//! the resolver. The individual pieces are public so that other front ends
//! can reuse them directly.

#![warn(missing_docs, clippy::pedantic)]

pub mod catalog;
pub mod declaration;
pub mod error;
pub mod record;
pub mod resolver;
pub mod store;
pub mod validate;

pub use catalog::{ConfigRequirement, ToolCatalog};
pub use declaration::ToolDeclaration;
pub use error::{CatalogError, CatalogResult};
pub use record::ToolRecord;
pub use resolver::{PairVerdict, PipelineVerdict, Reason, Verdict};
pub use store::{CatalogStore, ToolFilter};
pub use validate::validate;
