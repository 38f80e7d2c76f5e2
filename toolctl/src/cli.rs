//! Command-line definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "toolctl", version)]
#[command(about = "Manage the pipeline tool catalog and check tool compatibility", long_about = None)]
pub struct Cli {
    /// Catalog file (overrides TOOL_CATALOG_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a tool from a JSON declaration file
    Add {
        /// Declaration file
        file: PathBuf,
        /// Replace the tool if it is already registered
        #[arg(long)]
        overwrite: bool,
    },
    /// Register every *.json declaration in a directory
    Import {
        /// Directory holding one declaration per file
        dir: PathBuf,
        /// Replace tools that are already registered
        #[arg(long)]
        overwrite: bool,
    },
    /// List registered tools
    List {
        /// Only tools of this type
        #[arg(short = 't', long = "type")]
        tool_type: Option<String>,
        /// Only tools with this capability
        #[arg(short, long)]
        capability: Option<String>,
        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },
    /// Show one tool's full declaration
    Show {
        /// Tool name
        name: String,
        /// Print JSON instead of text
        #[arg(short, long)]
        json: bool,
    },
    /// Remove a tool
    Remove {
        /// Tool name
        name: String,
    },
    /// Check whether tools can share a pipeline
    CheckCompat {
        /// Two or more tool names
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,
        /// Print JSON instead of text
        #[arg(short, long)]
        json: bool,
    },
    /// Find tools compatible with a given tool
    FindCompatible {
        /// Tool name
        name: String,
        /// Only candidates of this type
        #[arg(short = 't', long = "type")]
        tool_type: Option<String>,
        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },
    /// List configuration keys required by registered tools
    Requirements {
        /// Mark keys that are missing from the environment
        #[arg(long)]
        check_env: bool,
        /// Print JSON instead of a table
        #[arg(short, long)]
        json: bool,
    },
    /// Print the resolved settings
    Config,
}
