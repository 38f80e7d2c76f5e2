//! Compatibility tokens: either a literal tool name or a `type:<tag>` entry.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::name::{ToolName, ToolType};

/// Prefix that marks a compatibility entry as a type token.
pub const TYPE_PREFIX: &str = "type:";

/// One entry of a tool's `compatibilities` or `incompatible_with` list,
/// parsed once at validation.
///
/// Entries starting with `type:` always parse as [`CompatToken::ByType`], so a
/// tool whose name carries that prefix can only be matched through its type.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompatToken {
    /// Matches exactly the tool with this name.
    ByName(ToolName),
    /// Matches every tool whose `tool_type` equals this tag.
    ByType(ToolType),
}

impl CompatToken {
    /// Parses a raw compatibility entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] for blank entries or a `type:` prefix
    /// with no tag after it.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some(tag) = raw.strip_prefix(TYPE_PREFIX) {
            return ToolType::new(tag)
                .map(Self::ByType)
                .map_err(|_| Error::InvalidToken {
                    token: raw.to_owned(),
                    reason: "type token is missing its tag".into(),
                });
        }

        ToolName::new(raw)
            .map(Self::ByName)
            .map_err(|err| Error::InvalidToken {
                token: raw.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Returns true when the token selects the tool described by `name` and
    /// `tool_type`.
    #[must_use]
    pub fn matches(&self, name: &ToolName, tool_type: &ToolType) -> bool {
        match self {
            Self::ByName(expected) => expected == name,
            Self::ByType(expected) => expected == tool_type,
        }
    }

    /// Returns true when the token names `name` literally.
    #[must_use]
    pub fn names(&self, name: &ToolName) -> bool {
        matches!(self, Self::ByName(expected) if expected == name)
    }
}

impl Display for CompatToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByName(name) => write!(f, "{name}"),
            Self::ByType(tag) => write!(f, "{TYPE_PREFIX}{tag}"),
        }
    }
}

impl FromStr for CompatToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CompatToken {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CompatToken> for String {
    fn from(value: CompatToken) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> ToolName {
        ToolName::new(raw).unwrap()
    }

    fn tag(raw: &str) -> ToolType {
        ToolType::new(raw).unwrap()
    }

    #[test]
    fn parses_both_variants() {
        assert_eq!(
            CompatToken::parse("type:browser").unwrap(),
            CompatToken::ByType(tag("browser"))
        );
        assert_eq!(
            CompatToken::parse("selenium").unwrap(),
            CompatToken::ByName(name("selenium"))
        );
    }

    #[test]
    fn empty_type_tag_is_rejected() {
        let err = CompatToken::parse("type:").expect_err("missing tag");
        assert!(matches!(err, Error::InvalidToken { token, .. } if token == "type:"));
        assert!(CompatToken::parse("").is_err());
    }

    #[test]
    fn display_round_trips_the_declared_text() {
        for raw in ["type:http_client", "httpx"] {
            assert_eq!(CompatToken::parse(raw).unwrap().to_string(), raw);
        }
    }

    #[test]
    fn matching_is_exact() {
        let by_type = CompatToken::parse("type:parser").unwrap();
        assert!(by_type.matches(&name("parsel"), &tag("parser")));
        assert!(!by_type.matches(&name("parsel"), &tag("Parser")));

        let by_name = CompatToken::parse("parsel").unwrap();
        assert!(by_name.matches(&name("parsel"), &tag("anything")));
        assert!(by_name.names(&name("parsel")));
        assert!(!by_type.names(&name("parsel")));
    }
}
