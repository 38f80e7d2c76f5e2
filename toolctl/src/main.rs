//! `toolctl`: command-line front end for the tool catalog.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tool_catalog::config::CatalogSettings;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod render;

use cli::Cli;

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = CatalogSettings::resolve(cli.catalog)?;
    commands::run(cli.command, &settings)
}
