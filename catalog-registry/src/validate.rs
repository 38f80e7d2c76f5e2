//! Declaration validation.

use catalog_primitives::{CapabilityTag, CompatToken, ExecutionMode, ToolName, ToolType};
use indexmap::IndexSet;

use crate::declaration::ToolDeclaration;
use crate::error::{CatalogError, CatalogResult};
use crate::record::ToolRecord;

/// Accumulates problems so a declaration reports all of them at once.
#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn check<T>(&mut self, field: &str, result: catalog_primitives::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(format!("{field}: {err}"));
                None
            }
        }
    }

    fn push(&mut self, problem: impl Into<String>) {
        self.0.push(problem.into());
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses one token list, dropping repeats and rejecting references to the
/// declaring tool itself.
fn tokens(
    problems: &mut Problems,
    field: &str,
    entries: &[String],
    own_name: Option<&ToolName>,
) -> IndexSet<CompatToken> {
    let mut parsed = IndexSet::with_capacity(entries.len());
    for raw in entries {
        let Some(token) = problems.check(field, CompatToken::parse(raw)) else {
            continue;
        };
        if own_name.is_some_and(|own| token.names(own)) {
            problems.push(format!("{field}: tool cannot list itself (`{raw}`)"));
            continue;
        }
        parsed.insert(token);
    }
    parsed
}

/// Validates a raw declaration into a [`ToolRecord`].
///
/// Capabilities and vetoes become sets, compatibilities become an ordered
/// token list with the first occurrence of each duplicate kept. A missing
/// `execution_mode` defaults to `sync`, and a missing `pip_install_command`
/// to `pip install <package_name>`.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] listing every problem found: missing
/// or blank `name`/`tool_type`, unknown execution modes, blank list entries,
/// malformed type tokens, and self-references.
pub fn validate(declaration: &ToolDeclaration) -> CatalogResult<ToolRecord> {
    let mut problems = Problems::default();

    let name = match declaration.name.as_deref() {
        Some(raw) => problems.check("name", ToolName::new(raw)),
        None => {
            problems.push("missing required field `name`");
            None
        }
    };

    let tool_type = match declaration.tool_type.as_deref() {
        Some(raw) => problems.check("tool_type", ToolType::new(raw)),
        None => {
            problems.push("missing required field `tool_type`");
            None
        }
    };

    let execution_mode = declaration
        .execution_mode
        .as_deref()
        .and_then(|raw| problems.check("execution_mode", raw.parse::<ExecutionMode>()))
        .unwrap_or_default();

    let mut capabilities = IndexSet::with_capacity(declaration.capabilities.len());
    for raw in &declaration.capabilities {
        if let Some(tag) = problems.check("capabilities", CapabilityTag::new(raw.as_str())) {
            capabilities.insert(tag);
        }
    }

    let compatibilities = tokens(
        &mut problems,
        "compatibilities",
        &declaration.compatibilities,
        name.as_ref(),
    );
    let incompatible_with = tokens(
        &mut problems,
        "incompatible_with",
        &declaration.incompatible_with,
        name.as_ref(),
    );

    let mut required_config = IndexSet::with_capacity(declaration.required_config.len());
    for raw in &declaration.required_config {
        if raw.trim().is_empty() {
            problems.push("required_config: key cannot be empty or whitespace");
        } else {
            required_config.insert(raw.clone());
        }
    }

    let pip_install_command = declaration
        .pip_install_command
        .clone()
        .filter(|command| !command.trim().is_empty())
        .or_else(|| {
            declaration
                .package_name
                .as_deref()
                .map(|package| format!("pip install {package}"))
        });

    match (name, tool_type) {
        (Some(name), Some(tool_type)) if problems.is_empty() => Ok(ToolRecord {
            name,
            description: declaration.description.clone(),
            tool_type,
            package_name: declaration.package_name.clone(),
            pip_install_command,
            execution_mode,
            capabilities,
            compatibilities: compatibilities.into_iter().collect(),
            incompatible_with,
            required_config: required_config.into_iter().collect(),
        }),
        _ => Err(CatalogError::Validation {
            name: declaration
                .name
                .clone()
                .unwrap_or_else(|| "<unnamed>".into()),
            problems: problems.0,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problems_of(declaration: &ToolDeclaration) -> Vec<String> {
        match validate(declaration).expect_err("declaration should be rejected") {
            CatalogError::Validation { problems, .. } => problems,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_full_declaration() {
        let declaration = ToolDeclaration::new("playwright", "browser")
            .with_description("Browser automation")
            .with_package_name("playwright")
            .with_execution_mode("async")
            .with_capabilities(["javascript_rendering", "headless_mode"])
            .with_compatibilities(["type:parser", "type:captcha_solver"])
            .with_incompatible_with(["selenium"]);

        let record = validate(&declaration).unwrap();
        assert_eq!(record.name(), "playwright");
        assert_eq!(record.tool_type(), "browser");
        assert_eq!(record.execution_mode(), ExecutionMode::Async);
        assert!(record.has_capability("headless_mode"));
        assert_eq!(record.compatibilities().len(), 2);
        assert!(
            record
                .incompatible_with()
                .contains(&CompatToken::parse("selenium").unwrap())
        );
    }

    #[test]
    fn missing_required_fields_are_reported_together() {
        let problems = problems_of(&ToolDeclaration::default());
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("`name`"));
        assert!(problems[1].contains("`tool_type`"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = validate(&ToolDeclaration::new("   ", "parser")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref name, .. } if name == "   "));
    }

    #[test]
    fn self_references_are_rejected() {
        let declaration = ToolDeclaration::new("httpx", "http_client")
            .with_compatibilities(["httpx", "type:parser"])
            .with_incompatible_with(["httpx"]);

        let problems = problems_of(&declaration);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("compatibilities"));
        assert!(problems[1].starts_with("incompatible_with"));
    }

    #[test]
    fn own_type_token_is_not_a_self_reference() {
        let declaration =
            ToolDeclaration::new("parsel", "parser").with_compatibilities(["type:parser"]);
        assert!(validate(&declaration).is_ok());
    }

    #[test]
    fn compatibilities_keep_first_occurrence() {
        let declaration = ToolDeclaration::new("beautifulsoup4", "parser").with_compatibilities([
            "type:browser",
            "lxml",
            "type:browser",
            "type:http_client",
            "lxml",
        ]);

        let record = validate(&declaration).unwrap();
        let rendered: Vec<String> = record
            .compatibilities()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered, ["type:browser", "lxml", "type:http_client"]);
    }

    #[test]
    fn required_config_keeps_first_occurrence() {
        let declaration = ToolDeclaration::new("scraperapi", "anti_bot_service")
            .with_required_config(["API_KEY", "REGION", "API_KEY", "PROXY_URL", "REGION"]);

        let record = validate(&declaration).unwrap();
        assert_eq!(record.required_config(), ["API_KEY", "REGION", "PROXY_URL"]);
    }

    #[test]
    fn sets_ignore_order_and_duplicates() {
        let first = ToolDeclaration::new("scrapy", "framework")
            .with_capabilities(["crawling", "pipelines", "crawling"])
            .with_incompatible_with(["selenium", "playwright"]);
        let second = ToolDeclaration::new("scrapy", "framework")
            .with_capabilities(["pipelines", "crawling"])
            .with_incompatible_with(["playwright", "selenium", "playwright"]);

        assert_eq!(validate(&first).unwrap(), validate(&second).unwrap());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        let declaration = ToolDeclaration::new("requests", "http_client")
            .with_execution_mode("threaded")
            .with_capabilities([" "])
            .with_compatibilities(["type:"])
            .with_incompatible_with([" "])
            .with_required_config([""]);

        let problems = problems_of(&declaration);
        assert_eq!(problems.len(), 5);
    }

    #[test]
    fn type_vetoes_are_accepted() {
        let declaration = ToolDeclaration::new("requests", "http_client")
            .with_incompatible_with(["type:browser", "type:browser", "selenium"]);

        let record = validate(&declaration).unwrap();
        let vetoes: Vec<String> = record
            .incompatible_with()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(vetoes, ["type:browser", "selenium"]);
    }

    #[test]
    fn pip_install_command_defaults_from_package_name() {
        let record = validate(
            &ToolDeclaration::new("beautifulsoup4", "parser").with_package_name("beautifulsoup4"),
        )
        .unwrap();
        assert_eq!(
            record.pip_install_command(),
            Some("pip install beautifulsoup4")
        );

        let record = validate(
            &ToolDeclaration::new("beautifulsoup4", "parser")
                .with_package_name("beautifulsoup4")
                .with_pip_install_command("pip install beautifulsoup4[lxml]"),
        )
        .unwrap();
        assert_eq!(
            record.pip_install_command(),
            Some("pip install beautifulsoup4[lxml]")
        );

        let record = validate(&ToolDeclaration::new("lxml", "parser")).unwrap();
        assert_eq!(record.pip_install_command(), None);
    }

    #[test]
    fn execution_mode_defaults_to_sync() {
        let record = validate(&ToolDeclaration::new("lxml", "parser")).unwrap();
        assert_eq!(record.execution_mode(), ExecutionMode::Sync);
    }

    #[test]
    fn serialized_record_validates_back_to_itself() {
        let declaration = ToolDeclaration::new("scraperapi", "anti_bot_service")
            .with_package_name("scraperapi-sdk")
            .with_pip_install_command("pip install scraperapi-sdk==1.5.3")
            .with_capabilities(["proxy_rotation"])
            .with_compatibilities(["type:parser", "httpx"])
            .with_required_config(["SCRAPERAPI_KEY"]);
        let record = validate(&declaration).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let reparsed: ToolDeclaration = serde_json::from_str(&json).unwrap();
        assert_eq!(
            reparsed.pip_install_command.as_deref(),
            Some("pip install scraperapi-sdk==1.5.3")
        );
        assert_eq!(validate(&reparsed).unwrap(), record);
    }
}
