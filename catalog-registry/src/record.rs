//! Validated tool records held by the catalog store.

use catalog_primitives::{CapabilityTag, CompatToken, ExecutionMode, ToolName, ToolType};
use indexmap::IndexSet;
use serde::Serialize;

/// A validated tool registration.
///
/// Records are only produced by [`crate::validate`]; their serialized form is
/// the declaration format, so a saved record validates back to itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ToolRecord {
    pub(crate) name: ToolName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    pub(crate) tool_type: ToolType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pip_install_command: Option<String>,
    pub(crate) execution_mode: ExecutionMode,
    pub(crate) capabilities: IndexSet<CapabilityTag>,
    pub(crate) compatibilities: Vec<CompatToken>,
    pub(crate) incompatible_with: IndexSet<CompatToken>,
    pub(crate) required_config: Vec<String>,
}

impl ToolRecord {
    /// Returns the unique tool name.
    #[must_use]
    pub fn name(&self) -> &ToolName {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category tag.
    #[must_use]
    pub fn tool_type(&self) -> &ToolType {
        &self.tool_type
    }

    /// Returns the optional package name.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    /// Returns the install command, defaulting to `pip install <package_name>`
    /// when only the package name was declared.
    #[must_use]
    pub fn pip_install_command(&self) -> Option<&str> {
        self.pip_install_command.as_deref()
    }

    /// Returns the declared execution mode.
    #[must_use]
    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    /// Returns the capability set, in declaration order.
    #[must_use]
    pub fn capabilities(&self) -> &IndexSet<CapabilityTag> {
        &self.capabilities
    }

    /// Returns true when the tool advertises `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns the de-duplicated compatibility tokens, in declaration order.
    #[must_use]
    pub fn compatibilities(&self) -> &[CompatToken] {
        &self.compatibilities
    }

    /// Returns the tools and `type:<tag>` groups this tool vetoes.
    #[must_use]
    pub fn incompatible_with(&self) -> &IndexSet<CompatToken> {
        &self.incompatible_with
    }

    /// Returns the configuration keys the tool needs at run time.
    #[must_use]
    pub fn required_config(&self) -> &[String] {
        &self.required_config
    }
}
