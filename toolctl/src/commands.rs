//! Command handlers.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use console::style;
use tool_catalog::config::{CatalogSettings, check_requirements};
use tool_catalog::storage::{JsonFileBackend, PersistentCatalog};
use tool_catalog::{ToolDeclaration, ToolFilter, ToolRecord};
use tracing::{debug, warn};

use crate::cli::Command;
use crate::render;

type Session = PersistentCatalog<JsonFileBackend>;

/// Runs one command against the catalog located by `settings`.
pub fn run(command: Command, settings: &CatalogSettings) -> Result<ExitCode> {
    if let Command::Config = command {
        return show_config(settings);
    }

    let path = settings.catalog_path();
    debug!(path = %path.display(), source = ?settings.source(), "opening catalog");
    let mut session = PersistentCatalog::open(JsonFileBackend::new(path))
        .with_context(|| format!("failed to open catalog {}", path.display()))?;

    match command {
        Command::Add { file, overwrite } => add(&mut session, &file, overwrite),
        Command::Import { dir, overwrite } => {
            import(&mut session, &dir, overwrite).map(exit_code)
        }
        Command::List {
            tool_type,
            capability,
            json,
        } => list(&session, ToolFilter::new(tool_type, capability), json),
        Command::Show { name, json } => show(&session, &name, json),
        Command::Remove { name } => remove(&mut session, &name),
        Command::CheckCompat { names, json } => {
            check_compat(&session, &names, json).map(exit_code)
        }
        Command::FindCompatible {
            name,
            tool_type,
            json,
        } => find_compatible(&session, &name, tool_type.as_deref(), json),
        Command::Requirements { check_env, json } => requirements(&session, check_env, json),
        Command::Config => show_config(settings),
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn show_config(settings: &CatalogSettings) -> Result<ExitCode> {
    render::print_json(settings)?;
    Ok(ExitCode::SUCCESS)
}

fn read_declaration(file: &Path) -> Result<ToolDeclaration> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a tool declaration", file.display()))
}

fn register(
    session: &mut Session,
    declaration: &ToolDeclaration,
    overwrite: bool,
) -> Result<ToolRecord> {
    let exists = declaration
        .name
        .as_deref()
        .is_some_and(|name| session.catalog().get(name).is_ok());

    let record = if overwrite && exists {
        session.update(declaration)?
    } else {
        session.register(declaration)?
    };
    Ok(record)
}

fn add(session: &mut Session, file: &Path, overwrite: bool) -> Result<ExitCode> {
    let declaration = read_declaration(file)?;
    let record = register(session, &declaration, overwrite)?;
    println!("{} {}", style("Registered").green().bold(), record.name());
    Ok(ExitCode::SUCCESS)
}

fn declaration_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Registers every declaration file in `dir`; returns false if any failed.
fn import(session: &mut Session, dir: &Path, overwrite: bool) -> Result<bool> {
    let files = declaration_files(dir)?;
    let mut failed = 0usize;

    for file in &files {
        let outcome = read_declaration(file)
            .and_then(|declaration| register(session, &declaration, overwrite));
        match outcome {
            Ok(record) => println!("{} {}", style("✓").green(), record.name()),
            Err(err) => {
                failed += 1;
                warn!(file = %file.display(), error = %err, "import failed");
                println!("{} {}: {err:#}", style("✗").red(), file.display());
            }
        }
    }

    println!(
        "Imported {} of {} declaration(s)",
        files.len() - failed,
        files.len()
    );
    Ok(failed == 0)
}

fn list(session: &Session, filter: ToolFilter, json: bool) -> Result<ExitCode> {
    let records = session.catalog().list_tools(&filter);
    if json {
        render::print_json(&records)?;
    } else if records.is_empty() {
        println!("No tools found");
    } else {
        print!("{}", render::tools_table(&records));
    }
    Ok(ExitCode::SUCCESS)
}

fn show(session: &Session, name: &str, json: bool) -> Result<ExitCode> {
    let record = session.catalog().get(name)?;
    if json {
        render::print_json(record)?;
    } else {
        print!("{}", render::tool_details(record));
    }
    Ok(ExitCode::SUCCESS)
}

fn remove(session: &mut Session, name: &str) -> Result<ExitCode> {
    let record = session.unregister(name)?;
    println!("{} {}", style("Removed").yellow().bold(), record.name());
    Ok(ExitCode::SUCCESS)
}

fn check_compat(session: &Session, names: &[String], json: bool) -> Result<bool> {
    let distinct: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    if distinct.len() < 2 {
        bail!("check-compat needs at least two different tool names");
    }

    let verdict = session.catalog().check_all(names)?;
    if json {
        render::print_json(&verdict)?;
    } else {
        print!("{}", render::pipeline_verdict(&verdict));
    }
    Ok(verdict.is_compatible())
}

fn find_compatible(
    session: &Session,
    name: &str,
    tool_type: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let records = session.catalog().find_compatible(name, tool_type)?;
    if json {
        render::print_json(&records)?;
    } else if records.is_empty() {
        println!("No tools compatible with {name}");
    } else {
        print!("{}", render::tools_table(&records));
    }
    Ok(ExitCode::SUCCESS)
}

fn requirements(session: &Session, check_env: bool, json: bool) -> Result<ExitCode> {
    let requirements = session.catalog().required_config();

    if check_env {
        let statuses = check_requirements(&requirements, |key| std::env::var(key).ok());
        if json {
            render::print_json(&statuses)?;
        } else if !statuses.is_empty() {
            print!("{}", render::requirement_status_table(&statuses));
        }
        let missing = statuses.iter().filter(|status| !status.present).count();
        if missing > 0 {
            eprintln!("{missing} required key(s) missing from the environment");
            return Ok(ExitCode::FAILURE);
        }
    } else if json {
        render::print_json(&requirements)?;
    } else if requirements.is_empty() {
        println!("No configuration required");
    } else {
        print!("{}", render::requirements_table(&requirements));
    }
    Ok(ExitCode::SUCCESS)
}
