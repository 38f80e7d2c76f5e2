//! Query façade composing the store and the resolver.

use catalog_primitives::ToolName;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::info;

use crate::declaration::ToolDeclaration;
use crate::error::{CatalogError, CatalogResult};
use crate::record::ToolRecord;
use crate::resolver::{self, PipelineVerdict, Verdict};
use crate::store::{CatalogStore, ToolFilter};
use crate::validate::validate;

/// A configuration key some tool needs, as surfaced to the config layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigRequirement<'a> {
    /// Tool that declares the requirement.
    pub tool: &'a ToolName,
    /// Configuration key name.
    pub key: &'a str,
}

/// Entry point for front ends: validates declarations, owns the store, and
/// answers compatibility queries.
#[derive(Clone, Debug, Default)]
pub struct ToolCatalog {
    store: CatalogStore,
}

impl ToolCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a declaration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Validation`] for malformed declarations
    /// and [`crate::CatalogError::DuplicateTool`] when the name is taken.
    pub fn register(&mut self, declaration: &ToolDeclaration) -> CatalogResult<&ToolRecord> {
        let record = validate(declaration)?;
        let record = self.store.add(record)?;
        info!(tool = %record.name(), tool_type = %record.tool_type(), "tool registered");
        Ok(record)
    }

    /// Replaces an existing tool's definition with a new declaration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Validation`] for malformed declarations
    /// and [`crate::CatalogError::ToolNotFound`] when there is nothing to
    /// replace.
    pub fn update(&mut self, declaration: &ToolDeclaration) -> CatalogResult<&ToolRecord> {
        let record = validate(declaration)?;
        let name = record.name().clone();
        self.store.replace(record)?;
        info!(tool = %name, "tool updated");
        self.store.get(name.as_str())
    }

    /// Removes a tool and returns its last definition.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::ToolNotFound`] when the name is absent.
    pub fn unregister(&mut self, name: &str) -> CatalogResult<ToolRecord> {
        let record = self.store.remove(name)?;
        info!(tool = %name, "tool removed");
        Ok(record)
    }

    /// Looks up a tool by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::ToolNotFound`] when the name is absent.
    pub fn get(&self, name: &str) -> CatalogResult<&ToolRecord> {
        self.store.get(name)
    }

    /// Lists tools matching `filter`, in registration order.
    #[must_use]
    pub fn list_tools(&self, filter: &ToolFilter) -> Vec<&ToolRecord> {
        self.store.list(filter)
    }

    /// Resolves two named tools against each other.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::SelfComparison`] when both names are the
    /// same, and [`crate::CatalogError::ToolNotFound`] if either name is
    /// absent.
    pub fn check_compat(&self, first: &str, second: &str) -> CatalogResult<Verdict> {
        if first == second {
            return Err(CatalogError::SelfComparison {
                name: first.to_owned(),
            });
        }
        let a = self.store.get(first)?;
        let b = self.store.get(second)?;
        Ok(resolver::resolve(a, b))
    }

    /// Checks a whole set of tools pairwise. Repeated names are checked once.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::ToolNotFound`] for the first unknown
    /// name, before anything is resolved.
    pub fn check_all<S: AsRef<str>>(&self, names: &[S]) -> CatalogResult<PipelineVerdict> {
        let unique: IndexSet<&str> = names.iter().map(|name| name.as_ref()).collect();
        let records = unique
            .into_iter()
            .map(|name| self.store.get(name))
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(resolver::check_all(&records))
    }

    /// Finds every tool compatible with `name`, optionally restricted to one
    /// `tool_type`. The target itself is never included.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::ToolNotFound`] when `name` is absent.
    pub fn find_compatible(
        &self,
        name: &str,
        tool_type: Option<&str>,
    ) -> CatalogResult<Vec<&ToolRecord>> {
        let target = self.store.get(name)?;
        let filter = ToolFilter::new(tool_type.map(str::to_owned), None);
        Ok(resolver::find_compatible(
            target,
            self.store.list(&filter),
        ))
    }

    /// Every `(tool, key)` configuration requirement, in registration order.
    #[must_use]
    pub fn required_config(&self) -> Vec<ConfigRequirement<'_>> {
        self.store
            .iter()
            .flat_map(|record| {
                record
                    .required_config()
                    .iter()
                    .map(move |key| ConfigRequirement {
                        tool: record.name(),
                        key: key.as_str(),
                    })
            })
            .collect()
    }

    /// Iterates over every record in registration order.
    pub fn records(&self) -> impl Iterator<Item = &ToolRecord> {
        self.store.iter()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true when the catalog holds no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
