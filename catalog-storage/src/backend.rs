//! Storage backends for catalog declarations.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use catalog_registry::{ToolDeclaration, ToolRecord};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// Source and sink of catalog contents.
pub trait CatalogBackend {
    /// Reads every stored declaration, in stored order.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing store cannot be read or
    /// decoded.
    fn load(&self) -> StorageResult<Vec<ToolDeclaration>>;

    /// Replaces the stored catalog with `records`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the catalog cannot be written.
    fn save(&self, records: &[&ToolRecord]) -> StorageResult<()>;
}

/// Catalog stored as a pretty-printed JSON array in a single file.
///
/// Saves go to a temporary sibling file which is then renamed over the
/// target, so readers see either the old or the new catalog.
#[derive(Clone, Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend for the file at `path`. Nothing is touched until the
    /// first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogBackend for JsonFileBackend {
    fn load(&self) -> StorageResult<Vec<ToolDeclaration>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "catalog file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, records: &[&ToolRecord]) -> StorageResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(&mut file, records)?;
        file.write_all(b"\n")?;
        file.flush()?;
        file.persist(&self.path).map_err(|err| err.error)?;

        debug!(path = %self.path.display(), tools = records.len(), "catalog saved");
        Ok(())
    }
}

/// Backend keeping declarations in memory; used when a session must not touch
/// the filesystem.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    declarations: RefCell<Vec<ToolDeclaration>>,
    saves: Cell<usize>,
    read_only: Cell<bool>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `declarations`.
    #[must_use]
    pub fn with_declarations(declarations: Vec<ToolDeclaration>) -> Self {
        Self {
            declarations: RefCell::new(declarations),
            ..Self::default()
        }
    }

    /// Makes subsequent saves fail with [`StorageError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Returns a copy of the currently stored declarations.
    #[must_use]
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.declarations.borrow().clone()
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CatalogBackend for MemoryBackend {
    fn load(&self) -> StorageResult<Vec<ToolDeclaration>> {
        Ok(self.declarations())
    }

    fn save(&self, records: &[&ToolRecord]) -> StorageResult<()> {
        if self.read_only.get() {
            return Err(StorageError::unavailable("memory backend is read-only"));
        }

        *self.declarations.borrow_mut() = records
            .iter()
            .map(|record| ToolDeclaration::from(*record))
            .collect();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

impl<B: CatalogBackend + ?Sized> CatalogBackend for &B {
    fn load(&self) -> StorageResult<Vec<ToolDeclaration>> {
        (**self).load()
    }

    fn save(&self, records: &[&ToolRecord]) -> StorageResult<()> {
        (**self).save(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use catalog_registry::validate;

    fn records() -> Vec<ToolRecord> {
        vec![
            validate(
                &ToolDeclaration::new("playwright", "browser")
                    .with_execution_mode("async")
                    .with_compatibilities(["type:parser"])
                    .with_incompatible_with(["selenium"]),
            )
            .unwrap(),
            validate(&ToolDeclaration::new("lxml", "parser")).unwrap(),
        ]
    }

    #[test]
    fn missing_and_empty_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("tools.json"));
        assert!(backend.load().unwrap().is_empty());

        fs::write(backend.path(), "  \n").unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("tools.json"));
        fs::write(backend.path(), "{ not json").unwrap();

        let err = backend.load().expect_err("malformed json");
        assert!(matches!(err, StorageError::Serialization { .. }));
    }

    #[test]
    fn save_creates_parent_directories_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("config").join("tools.json"));
        let records = records();
        let refs: Vec<&ToolRecord> = records.iter().collect();

        backend.save(&refs).unwrap();
        let loaded = backend.load().unwrap();

        let revalidated: Vec<ToolRecord> = loaded.iter().map(|d| validate(d).unwrap()).collect();
        assert_eq!(revalidated, records);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("tools.json"));
        let records = records();

        backend.save(&records.iter().collect::<Vec<_>>()).unwrap();
        backend.save(&[&records[1]]).unwrap();

        let loaded = backend.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name.as_deref(), Some("lxml"));
    }

    #[test]
    fn memory_backend_tracks_saves() {
        let backend = MemoryBackend::new();
        let records = records();
        backend.save(&[&records[0]]).unwrap();
        assert_eq!(backend.save_count(), 1);
        assert_eq!(backend.declarations()[0].name.as_deref(), Some("playwright"));

        backend.set_read_only(true);
        let err = backend.save(&[]).expect_err("read-only");
        assert!(matches!(err, StorageError::Unavailable { .. }));
        assert_eq!(backend.save_count(), 1);
    }
}
