//! In-memory catalog store keyed by tool name.

use catalog_primitives::ToolName;
use indexmap::IndexMap;

use crate::error::{CatalogError, CatalogResult};
use crate::record::ToolRecord;

/// Predicates applied by [`CatalogStore::list`]. Filters compose with AND; an
/// unset filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolFilter {
    tool_type: Option<String>,
    capability: Option<String>,
}

impl ToolFilter {
    /// Filter that matches every tool.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Builds a filter from optional type and capability predicates.
    #[must_use]
    pub fn new(tool_type: Option<String>, capability: Option<String>) -> Self {
        Self {
            tool_type,
            capability,
        }
    }

    /// Restricts to tools whose `tool_type` equals `tool_type` exactly.
    #[must_use]
    pub fn with_tool_type(mut self, tool_type: impl Into<String>) -> Self {
        self.tool_type = Some(tool_type.into());
        self
    }

    /// Restricts to tools that advertise `capability`.
    #[must_use]
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    /// Returns true when `record` satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, record: &ToolRecord) -> bool {
        self.tool_type
            .as_deref()
            .is_none_or(|expected| record.tool_type() == expected)
            && self
                .capability
                .as_deref()
                .is_none_or(|capability| record.has_capability(capability))
    }
}

/// Owns the mapping from tool name to record, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    tools: IndexMap<ToolName, ToolRecord>,
}

impl CatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateTool`] if the name is already present;
    /// the store is left untouched.
    pub fn add(&mut self, record: ToolRecord) -> CatalogResult<&ToolRecord> {
        if self.tools.contains_key(record.name()) {
            return Err(CatalogError::DuplicateTool {
                name: record.name().to_string(),
            });
        }

        let (index, _) = self.tools.insert_full(record.name().clone(), record);
        Ok(&self.tools[index])
    }

    /// Removes and returns the record registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ToolNotFound`] if the name is absent, however
    /// many times it is asked.
    pub fn remove(&mut self, name: &str) -> CatalogResult<ToolRecord> {
        self.tools
            .shift_remove(name)
            .ok_or_else(|| CatalogError::not_found(name))
    }

    /// Replaces an existing record: remove followed by add, so the new
    /// definition moves to the end of the listing order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ToolNotFound`] if no record with the same name
    /// exists.
    pub fn replace(&mut self, record: ToolRecord) -> CatalogResult<ToolRecord> {
        let previous = self.remove(record.name().as_str())?;
        self.add(record)?;
        Ok(previous)
    }

    /// Looks up a record by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ToolNotFound`] if the name is absent.
    pub fn get(&self, name: &str) -> CatalogResult<&ToolRecord> {
        self.tools
            .get(name)
            .ok_or_else(|| CatalogError::not_found(name))
    }

    /// Returns true when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Lists the records matching `filter`, in insertion order.
    #[must_use]
    pub fn list(&self, filter: &ToolFilter) -> Vec<&ToolRecord> {
        self.iter().filter(|record| filter.matches(record)).collect()
    }

    /// Iterates over every record in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolRecord> {
        self.tools.values()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true when no tool is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
