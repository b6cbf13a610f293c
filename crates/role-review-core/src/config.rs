//! Configuration types for role-review.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::Role;

/// Top-level configuration for role-review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Numeric limits used by the size-based roles.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Per-role switches, keyed by role tag.
    #[serde(default)]
    pub roles: BTreeMap<String, RoleConfig>,

    /// Settings for the architect's API documentation check.
    #[serde(default)]
    pub architecture: ArchitectureConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks config consistency.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.analyzer.exclude {
            glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }

        if let Some(tag) = self.roles.keys().find(|k| Role::from_tag(k).is_none()) {
            return Err(ConfigError::UnknownRole(tag.clone()));
        }

        if self.architecture.openapi_files.is_empty() {
            return Err(ConfigError::Validation(
                "architecture.openapi_files must name at least one file".to_string(),
            ));
        }

        if self.architecture.packages_dir.is_empty() {
            return Err(ConfigError::Validation(
                "architecture.packages_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Checks if a role is enabled.
    #[must_use]
    pub fn is_role_enabled(&self, role: Role) -> bool {
        self.roles.get(role.as_str()).map_or(true, |c| c.enabled)
    }

    /// Compiled exclude patterns.
    ///
    /// Invalid patterns are rejected by [`Config::validate`] and skipped here.
    #[must_use]
    pub fn exclude_patterns(&self) -> Vec<glob::Pattern> {
        self.analyzer
            .exclude
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .collect()
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Glob patterns to exclude from review.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Default file-length limit.
pub const DEFAULT_MAX_FILE_LINES: usize = 200;
/// Default function-length limit.
pub const DEFAULT_MAX_FUNCTION_LINES: usize = 30;
/// Default positional-parameter limit.
pub const DEFAULT_MAX_FUNCTION_ARGS: usize = 5;
/// Default methods-per-class limit.
pub const DEFAULT_MAX_CLASS_METHODS: usize = 10;
/// Default import-count limit.
pub const DEFAULT_MAX_IMPORTS: usize = 15;
/// Default classes-per-file limit.
pub const DEFAULT_MAX_CLASSES_PER_FILE: usize = 2;

/// Numeric limits. A value is exceeded when the measured count is strictly
/// greater than the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Maximum lines per file.
    pub max_file_lines: usize,
    /// Maximum lines per function.
    pub max_function_lines: usize,
    /// Maximum positional parameters per function.
    pub max_function_args: usize,
    /// Maximum methods per class.
    pub max_class_methods: usize,
    /// Maximum import statements per file.
    pub max_imports: usize,
    /// Maximum classes per file.
    pub max_classes_per_file: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_file_lines: DEFAULT_MAX_FILE_LINES,
            max_function_lines: DEFAULT_MAX_FUNCTION_LINES,
            max_function_args: DEFAULT_MAX_FUNCTION_ARGS,
            max_class_methods: DEFAULT_MAX_CLASS_METHODS,
            max_imports: DEFAULT_MAX_IMPORTS,
            max_classes_per_file: DEFAULT_MAX_CLASSES_PER_FILE,
        }
    }
}

/// Per-role configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Whether the role runs (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Settings for locating package roots and their API specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureConfig {
    /// File names that mark a directory as a package root.
    pub package_markers: Vec<String>,
    /// Name of the directory that contains all packages.
    pub packages_dir: String,
    /// Accepted OpenAPI document names at a package root.
    pub openapi_files: Vec<String>,
}

impl Default for ArchitectureConfig {
    fn default() -> Self {
        Self {
            package_markers: vec!["pyproject.toml".to_string()],
            packages_dir: "packages".to_string(),
            openapi_files: vec![
                "openapi.yaml".to_string(),
                "openapi.json".to_string(),
                "openapi.yml".to_string(),
            ],
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(code(role_review::config::io))]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("invalid config: {message}")]
    #[diagnostic(
        code(role_review::config::parse),
        help("see `role-review init` for a commented example")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern `{pattern}`: {message}")]
    #[diagnostic(code(role_review::config::glob))]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// Glob error message.
        message: String,
    },

    /// A `[roles.<name>]` table names no known role.
    #[error("unknown role `{0}`")]
    #[diagnostic(
        code(role_review::config::unknown_role),
        help("known roles: dev, tester, reviewer, best_practice, architect")
    )]
    UnknownRole(String),

    /// Config is structurally invalid.
    #[error("config validation: {0}")]
    #[diagnostic(code(role_review::config::validation))]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.thresholds.max_file_lines, 200);
        assert_eq!(config.thresholds.max_function_lines, 30);
        assert_eq!(config.thresholds.max_function_args, 5);
        assert_eq!(config.thresholds.max_class_methods, 10);
        assert_eq!(config.thresholds.max_imports, 15);
        assert_eq!(config.thresholds.max_classes_per_file, 2);
        assert!(Role::ALL.iter().all(|r| config.is_role_enabled(*r)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
exclude = ["**/migrations/**"]

[thresholds]
max_file_lines = 400

[roles.reviewer]
enabled = false

[architecture]
package_markers = ["setup.cfg", "pyproject.toml"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.thresholds.max_file_lines, 400);
        assert_eq!(config.thresholds.max_imports, 15);
        assert!(!config.is_role_enabled(Role::Reviewer));
        assert!(config.is_role_enabled(Role::Dev));
        assert_eq!(config.architecture.package_markers.len(), 2);
        assert_eq!(config.architecture.packages_dir, "packages");
        assert_eq!(config.exclude_patterns().len(), 1);
    }

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").expect("Failed to parse");
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.architecture, ArchitectureConfig::default());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let toml = r#"
[roles.qa]
enabled = false
"#;
        assert!(matches!(
            Config::parse(toml),
            Err(ConfigError::UnknownRole(name)) if name == "qa"
        ));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let toml = r#"
[analyzer]
exclude = ["src/[bad"]
"#;
        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("src/[bad"));
    }

    #[test]
    fn empty_openapi_list_is_rejected() {
        let toml = r#"
[architecture]
openapi_files = []
"#;
        assert!(matches!(
            Config::parse(toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn from_file_reports_missing_path() {
        let err = Config::from_file(Path::new("/nonexistent/role-review.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/role-review.toml"));
    }
}
