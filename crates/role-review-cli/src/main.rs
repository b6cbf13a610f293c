//! role-review CLI tool.
//!
//! Usage:
//! ```bash
//! role-review check [OPTIONS] [PATHS]...
//! role-review list-roles
//! role-review init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discover;

/// Role-based review of Python changes
#[derive(Parser)]
#[command(name = "role-review")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review files (default: files staged in git)
    Check {
        /// Files or directories to review instead of the staged files
        paths: Vec<PathBuf>,

        /// Review every file in the working tree
        #[arg(long, conflicts_with = "paths")]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific roles (comma-separated)
        #[arg(long)]
        roles: Option<String>,
    },

    /// List available roles
    ListRoles,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for review results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-issue compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            all,
            format,
            roles,
        } => {
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            let target = if all {
                discover::Target::WorkingTree
            } else if paths.is_empty() {
                discover::Target::Staged
            } else {
                discover::Target::Paths(paths)
            };
            commands::check::run(target, format, roles.as_deref(), &source)
        }
        Commands::ListRoles => {
            commands::list_roles::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
