//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# role-review configuration

[analyzer]
# Glob patterns to exclude from review
exclude = [
    "**/migrations/**",
    "**/.venv/**",
]

# Limits; a check fires when a count is strictly greater
[thresholds]
max_file_lines = 200
max_function_lines = 30
max_function_args = 5
max_class_methods = 10
max_imports = 15
max_classes_per_file = 2

# Every role is enabled unless switched off here
# [roles.reviewer]
# enabled = false

# Route files must ship an OpenAPI document at their package root
[architecture]
package_markers = ["pyproject.toml"]
packages_dir = "packages"
openapi_files = ["openapi.yaml", "openapi.json", "openapi.yml"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("role-review.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created role-review.toml");
    println!("\nNext steps:");
    println!("  1. Adjust thresholds and roles in role-review.toml");
    println!("  2. Stage some changes and run: role-review check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use role_review_core::{Config, Thresholds};

    #[test]
    fn default_config_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.exclude_patterns().len(), 2);
        assert!(config.roles.is_empty());
    }
}
