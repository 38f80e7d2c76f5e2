//! Checks of tool configuration requirements against an environment.

use catalog_registry::ConfigRequirement;
use serde::Serialize;

/// Whether one required key is available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequirementStatus<'a> {
    /// The requirement being checked.
    #[serde(flatten)]
    pub requirement: ConfigRequirement<'a>,
    /// True when the key has a non-empty value.
    pub present: bool,
}

/// Checks every requirement with `lookup`, keeping input order.
pub fn check_requirements<'a, F>(
    requirements: &[ConfigRequirement<'a>],
    lookup: F,
) -> Vec<RequirementStatus<'a>>
where
    F: Fn(&str) -> Option<String>,
{
    requirements
        .iter()
        .map(|requirement| RequirementStatus {
            requirement: *requirement,
            present: lookup(requirement.key).is_some_and(|value| !value.is_empty()),
        })
        .collect()
}
