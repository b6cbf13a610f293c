//! Check command implementation.

use anyhow::{bail, Context, Result};
use role_review_core::{Analyzer, Config, Role, RoleConfig};
use role_review_py::PythonParser;
use role_review_rules::{default_registry, registry_for};

use crate::config_resolver::ConfigSource;
use crate::discover::{self, Target};
use crate::OutputFormat;

/// Exit status when candidate files could not be listed.
const EXIT_ENUMERATION_FAILED: i32 = 2;

/// Runs the check command.
pub fn run(
    target: Target,
    format: OutputFormat,
    roles_filter: Option<&str>,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load().map_err(|e| {
        let report = miette::Report::new(e);
        anyhow::anyhow!("{report:?}")
    })?;

    let registry = match roles_filter {
        Some(filter) => {
            let roles = parse_roles(filter);
            if roles.is_empty() {
                bail!("No known roles in --roles {filter:?}");
            }
            enable(&mut config, &roles);
            registry_for(&roles, &config)?
        }
        None => default_registry(&config)?,
    };

    let analyzer = Analyzer::builder()
        .parser(PythonParser::new())
        .registry(registry)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    let candidates = match discover::candidates(&target) {
        Ok(files) => files,
        Err(e) => {
            tracing::error!("Could not list files to review: {e:#}");
            std::process::exit(EXIT_ENUMERATION_FAILED);
        }
    };

    let files = analyzer.select(&candidates);
    if files.is_empty() {
        tracing::info!("No Python files to review");
        return Ok(());
    }

    let result = analyzer.analyze(&files);

    super::output::print(&result, format)?;

    if !result.passed() {
        std::process::exit(1);
    }

    Ok(())
}

/// Parses a comma-separated role list, keeping first occurrences.
fn parse_roles(filter: &str) -> Vec<Role> {
    let mut roles = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match Role::from_tag(name) {
            Some(role) if !roles.contains(&role) => roles.push(role),
            Some(_) => {}
            None => tracing::warn!("Unknown role: {}", name),
        }
    }

    roles
}

/// Roles requested on the command line run even if the config disables them.
fn enable(config: &mut Config, roles: &[Role]) {
    for role in roles {
        config
            .roles
            .insert(role.as_str().to_string(), RoleConfig { enabled: true });
    }
}
