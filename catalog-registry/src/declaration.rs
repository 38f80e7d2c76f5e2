//! Raw, unvalidated tool declarations as read from JSON.

use serde::{Deserialize, Serialize};

use crate::record::ToolRecord;

/// A tool declaration exactly as supplied by a catalog file or a caller.
///
/// Every field is optional at this level so that missing keys surface as
/// validation problems rather than deserialization failures. Unknown keys are
/// ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Unique tool name (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category tag (required).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    /// Installable package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Command that installs the tool and its extras.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_install_command: Option<String>,
    /// `sync` or `async`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<String>,
    /// Capability tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    /// Tool names or `type:<tag>` tokens this tool works with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compatibilities: Vec<String>,
    /// Tool names or `type:<tag>` tokens this tool cannot share a pipeline
    /// with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incompatible_with: Vec<String>,
    /// Configuration keys needed at run time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_config: Vec<String>,
}

impl ToolDeclaration {
    /// Starts a declaration carrying the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, tool_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            tool_type: Some(tool_type.into()),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the package name.
    #[must_use]
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    /// Sets the install command.
    #[must_use]
    pub fn with_pip_install_command(mut self, command: impl Into<String>) -> Self {
        self.pip_install_command = Some(command.into());
        self
    }

    /// Sets the execution mode text.
    #[must_use]
    pub fn with_execution_mode(mut self, mode: impl Into<String>) -> Self {
        self.execution_mode = Some(mode.into());
        self
    }

    /// Replaces the capability tags.
    #[must_use]
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the compatibility entries.
    #[must_use]
    pub fn with_compatibilities<I, S>(mut self, compatibilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compatibilities = compatibilities.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the veto list.
    #[must_use]
    pub fn with_incompatible_with<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.incompatible_with = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the required configuration keys.
    #[must_use]
    pub fn with_required_config<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_config = keys.into_iter().map(Into::into).collect();
        self
    }
}

impl From<&ToolRecord> for ToolDeclaration {
    fn from(record: &ToolRecord) -> Self {
        Self {
            name: Some(record.name().to_string()),
            description: record.description().map(str::to_owned),
            tool_type: Some(record.tool_type().to_string()),
            package_name: record.package_name().map(str::to_owned),
            pip_install_command: record.pip_install_command().map(str::to_owned),
            execution_mode: Some(record.execution_mode().to_string()),
            capabilities: record.capabilities().iter().map(ToString::to_string).collect(),
            compatibilities: record
                .compatibilities()
                .iter()
                .map(ToString::to_string)
                .collect(),
            incompatible_with: record
                .incompatible_with()
                .iter()
                .map(ToString::to_string)
                .collect(),
            required_config: record.required_config().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_unknown_keys_deserialize() {
        let declaration: ToolDeclaration = serde_json::from_str(
            r#"{
                "name": "playwright",
                "homepage": "https://playwright.dev",
                "compatibilities": ["type:parser"]
            }"#,
        )
        .unwrap();

        assert_eq!(declaration.name.as_deref(), Some("playwright"));
        assert_eq!(declaration.tool_type, None);
        assert_eq!(declaration.compatibilities, ["type:parser"]);
        assert!(declaration.capabilities.is_empty());
    }

    #[test]
    fn record_converts_back_to_an_equivalent_declaration() {
        let declaration = ToolDeclaration::new("parsel", "parser")
            .with_execution_mode("sync")
            .with_capabilities(["css_selectors", "xpath"])
            .with_compatibilities(["type:http_client", "scrapy"]);
        let record = crate::validate(&declaration).unwrap();

        assert_eq!(ToolDeclaration::from(&record), declaration);
    }
}
