//! Configuration management for the tool catalog.
//!
//! [`settings`] decides where the catalog file lives; [`requirements`] checks
//! which of the keys declared by tools are present in the environment. Tool
//! configuration values themselves are never read into the catalog.

#![warn(missing_docs, clippy::pedantic)]

pub mod requirements;
pub mod settings;

pub use requirements::{RequirementStatus, check_requirements};
pub use settings::{CATALOG_PATH_ENV, CatalogSettings, ConfigError, ConfigResult, PathSource};
