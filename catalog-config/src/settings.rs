//! Catalog location settings.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the catalog file location.
pub const CATALOG_PATH_ENV: &str = "TOOL_CATALOG_PATH";

/// Errors raised while resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No explicit path was given and the home directory is unknown.
    #[error("cannot locate the home directory; set TOOL_CATALOG_PATH or pass --catalog")]
    NoHomeDirectory,
}

/// Result alias for settings resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where the catalog path came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSource {
    /// Explicit command-line flag.
    Flag,
    /// The [`CATALOG_PATH_ENV`] variable.
    Environment,
    /// `<home>/.thebrain/config/tools.json`.
    Default,
}

/// Resolved catalog settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    catalog_path: PathBuf,
    source: PathSource,
}

impl CatalogSettings {
    /// Resolves settings from an optional flag value and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] when neither the flag nor the
    /// environment supply a path and no home directory can be found.
    pub fn resolve(flag: Option<PathBuf>) -> ConfigResult<Self> {
        Self::resolve_with(flag, |key| std::env::var_os(key), dirs::home_dir)
    }

    /// Resolves settings with explicit environment and home lookups.
    ///
    /// Precedence is flag, then environment, then the default under home.
    /// An empty environment value counts as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDirectory`] when the default is needed
    /// and `home` returns `None`.
    pub fn resolve_with(
        flag: Option<PathBuf>,
        env: impl Fn(&str) -> Option<OsString>,
        home: impl FnOnce() -> Option<PathBuf>,
    ) -> ConfigResult<Self> {
        let settings = if let Some(path) = flag {
            Self::new(path, PathSource::Flag)
        } else if let Some(path) = env(CATALOG_PATH_ENV).filter(|value| !value.is_empty()) {
            Self::new(path, PathSource::Environment)
        } else {
            let home = home().ok_or(ConfigError::NoHomeDirectory)?;
            Self::new(default_catalog_path(&home), PathSource::Default)
        };

        debug!(
            path = %settings.catalog_path.display(),
            source = ?settings.source,
            "catalog settings resolved"
        );
        Ok(settings)
    }

    fn new(path: impl Into<PathBuf>, source: PathSource) -> Self {
        Self {
            catalog_path: path.into(),
            source,
        }
    }

    /// Location of the catalog file.
    #[must_use]
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Where [`Self::catalog_path`] came from.
    #[must_use]
    pub fn source(&self) -> PathSource {
        self.source
    }
}

/// Default catalog location beneath `home`.
#[must_use]
pub fn default_catalog_path(home: &Path) -> PathBuf {
    home.join(".thebrain").join("config").join("tools.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    fn home() -> Option<PathBuf> {
        Some(PathBuf::from("/home/scraper"))
    }

    #[test]
    fn flag_wins_over_environment() {
        let settings = CatalogSettings::resolve_with(
            Some(PathBuf::from("catalog.json")),
            |_| Some(OsString::from("/env/tools.json")),
            home,
        )
        .unwrap();
        assert_eq!(settings.catalog_path(), Path::new("catalog.json"));
        assert_eq!(settings.source(), PathSource::Flag);
    }

    #[test]
    fn environment_wins_over_default() {
        let settings = CatalogSettings::resolve_with(
            None,
            |key| (key == CATALOG_PATH_ENV).then(|| OsString::from("/env/tools.json")),
            home,
        )
        .unwrap();
        assert_eq!(settings.catalog_path(), Path::new("/env/tools.json"));
        assert_eq!(settings.source(), PathSource::Environment);
    }

    #[test]
    fn empty_environment_value_falls_back_to_default() {
        let settings =
            CatalogSettings::resolve_with(None, |_| Some(OsString::new()), home).unwrap();
        assert_eq!(
            settings.catalog_path(),
            Path::new("/home/scraper/.thebrain/config/tools.json")
        );
        assert_eq!(settings.source(), PathSource::Default);
    }

    #[test]
    fn missing_home_is_an_error() {
        let err = CatalogSettings::resolve_with(None, no_env, || None).expect_err("no home");
        assert!(matches!(err, ConfigError::NoHomeDirectory));
    }

    #[test]
    fn settings_serialize_for_display() {
        let settings = CatalogSettings::resolve_with(None, no_env, home).unwrap();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["source"], "default");
    }
}
