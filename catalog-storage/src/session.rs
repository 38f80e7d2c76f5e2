//! Write-through catalog sessions.

use catalog_registry::{CatalogResult, ToolCatalog, ToolDeclaration, ToolRecord};
use tracing::{info, warn};

use crate::backend::CatalogBackend;
use crate::error::StorageResult;

/// A [`ToolCatalog`] bound to a backend.
///
/// The backend is read once in [`PersistentCatalog::open`]. Each mutation is
/// applied to a copy of the catalog, saved, and only then committed, so a
/// failed save leaves the session exactly as it was.
#[derive(Debug)]
pub struct PersistentCatalog<B> {
    backend: B,
    catalog: ToolCatalog,
}

impl<B: CatalogBackend> PersistentCatalog<B> {
    /// Loads the backend into a fresh catalog.
    ///
    /// Declarations that fail validation, or repeat a name seen earlier in
    /// the file, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Propagates backend read and decode failures.
    pub fn open(backend: B) -> StorageResult<Self> {
        let declarations = backend.load()?;
        let total = declarations.len();

        let mut catalog = ToolCatalog::new();
        for declaration in &declarations {
            if let Err(err) = catalog.register(declaration) {
                warn!(
                    tool = declaration.name.as_deref().unwrap_or("<unnamed>"),
                    error = %err,
                    "skipping stored declaration"
                );
            }
        }

        info!(loaded = catalog.len(), skipped = total - catalog.len(), "catalog opened");
        Ok(Self { backend, catalog })
    }

    /// Read-only access to the catalog for queries.
    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Returns the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Registers a declaration and saves the catalog.
    ///
    /// # Errors
    ///
    /// Returns the catalog's validation or duplicate error, or the backend's
    /// save error; in every case nothing is committed.
    pub fn register(&mut self, declaration: &ToolDeclaration) -> StorageResult<ToolRecord> {
        self.commit(|catalog| catalog.register(declaration).cloned())
    }

    /// Replaces an existing definition and saves the catalog.
    ///
    /// # Errors
    ///
    /// Returns the catalog's validation or not-found error, or the backend's
    /// save error; in every case nothing is committed.
    pub fn update(&mut self, declaration: &ToolDeclaration) -> StorageResult<ToolRecord> {
        self.commit(|catalog| catalog.update(declaration).cloned())
    }

    /// Removes a tool and saves the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`catalog_registry::CatalogError::ToolNotFound`] for unknown
    /// names, or the backend's save error; in every case nothing is committed.
    pub fn unregister(&mut self, name: &str) -> StorageResult<ToolRecord> {
        self.commit(|catalog| catalog.unregister(name))
    }

    fn commit<T>(
        &mut self,
        mutate: impl FnOnce(&mut ToolCatalog) -> CatalogResult<T>,
    ) -> StorageResult<T> {
        let mut next = self.catalog.clone();
        let outcome = mutate(&mut next)?;
        let records: Vec<&ToolRecord> = next.records().collect();
        self.backend.save(&records)?;
        self.catalog = next;
        Ok(outcome)
    }

    /// Consumes the session, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use catalog_registry::{CatalogError, ToolFilter};

    use crate::backend::MemoryBackend;
    use crate::error::StorageError;

    fn parser() -> ToolDeclaration {
        ToolDeclaration::new("beautifulsoup4", "parser")
            .with_compatibilities(["type:browser", "type:http_client"])
    }

    fn browser() -> ToolDeclaration {
        ToolDeclaration::new("selenium", "browser")
    }

    #[test]
    fn open_skips_invalid_and_duplicate_declarations() {
        let backend = MemoryBackend::with_declarations(vec![
            parser(),
            ToolDeclaration::new("", "parser"),
            ToolDeclaration::new("beautifulsoup4", "browser"),
            browser(),
        ]);

        let session = PersistentCatalog::open(&backend).unwrap();
        let names: Vec<String> = session
            .catalog()
            .list_tools(&ToolFilter::any())
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, ["beautifulsoup4", "selenium"]);
        assert_eq!(session.catalog().get("beautifulsoup4").unwrap().tool_type(), "parser");
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn mutations_write_through() {
        let backend = MemoryBackend::new();
        let mut session = PersistentCatalog::open(&backend).unwrap();

        session.register(&parser()).unwrap();
        session.register(&browser()).unwrap();
        assert_eq!(backend.save_count(), 2);
        assert_eq!(backend.declarations().len(), 2);

        session.unregister("selenium").unwrap();
        assert_eq!(backend.save_count(), 3);
        assert_eq!(backend.declarations().len(), 1);

        let reopened = PersistentCatalog::open(&backend).unwrap();
        assert!(reopened.catalog().get("beautifulsoup4").is_ok());
        assert!(reopened.catalog().get("selenium").is_err());
    }

    #[test]
    fn rejected_mutations_do_not_save() {
        let backend = MemoryBackend::new();
        let mut session = PersistentCatalog::open(&backend).unwrap();
        session.register(&parser()).unwrap();

        let err = session.register(&parser()).expect_err("duplicate");
        assert!(matches!(
            err.as_catalog(),
            Some(CatalogError::DuplicateTool { name }) if name == "beautifulsoup4"
        ));

        let err = session.unregister("selenium").expect_err("unknown");
        assert!(matches!(err.as_catalog(), Some(CatalogError::ToolNotFound { .. })));
        assert_eq!(backend.save_count(), 1);
    }

    #[test]
    fn failed_save_rolls_back() {
        let backend = MemoryBackend::new();
        let mut session = PersistentCatalog::open(&backend).unwrap();
        session.register(&parser()).unwrap();

        backend.set_read_only(true);
        let err = session.register(&browser()).expect_err("save fails");
        assert!(matches!(err, StorageError::Unavailable { .. }));
        assert!(session.catalog().get("selenium").is_err());

        let err = session.unregister("beautifulsoup4").expect_err("save fails");
        assert!(matches!(err, StorageError::Unavailable { .. }));
        assert!(session.catalog().get("beautifulsoup4").is_ok());
    }

    #[test]
    fn update_moves_tool_to_end() {
        let backend = MemoryBackend::new();
        let mut session = PersistentCatalog::open(&backend).unwrap();
        session.register(&parser()).unwrap();
        session.register(&browser()).unwrap();

        let updated = session
            .update(&parser().with_capabilities(["html_parsing"]))
            .unwrap();
        assert!(updated.has_capability("html_parsing"));

        let stored: Vec<Option<String>> =
            backend.declarations().into_iter().map(|d| d.name).collect();
        assert_eq!(
            stored,
            [Some("selenium".to_owned()), Some("beautifulsoup4".to_owned())]
        );
    }
}
