//! Configuration lookup and loading.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <path>` (not checked for existence)
//! 2. `role-review.toml`, then `.role-review.toml`, in the project directory
//! 3. `config.toml` in `$ROLE_REVIEW_CONFIG_DIR`, else in `~/.role-review/`
//! 4. built-in defaults

use role_review_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["role-review.toml", ".role-review.toml"];

/// File name inside the user config directory.
const USER_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the user config directory.
const CONFIG_DIR_ENV: &str = "ROLE_REVIEW_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the user config directory.
    User(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and validates the config, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or is invalid.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match self.path() {
            Some(path) => {
                if matches!(self, Self::User(_)) {
                    tracing::info!("Using user config: {}", path.display());
                } else {
                    tracing::debug!("Using config: {}", path.display());
                }
                Config::from_file(path)
            }
            None => Ok(Config::default()),
        }
    }
}

/// Finds the config for a project directory.
#[derive(Debug, Clone)]
struct Resolver {
    project_dir: PathBuf,
    user_dir: Option<PathBuf>,
}

impl Resolver {
    fn resolve(&self, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        if let Some(found) = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| self.project_dir.join(name))
            .find(|p| p.is_file())
        {
            return ConfigSource::Project(found);
        }

        self.user_dir
            .as_ref()
            .map(|dir| dir.join(USER_CONFIG_NAME))
            .filter(|p| p.is_file())
            .map_or(ConfigSource::Default, ConfigSource::User)
    }
}

/// Resolves the config source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    Resolver {
        project_dir: project_dir.to_path_buf(),
        user_dir: user_config_dir(),
    }
    .resolve(explicit)
}

/// `$ROLE_REVIEW_CONFIG_DIR`, else `~/.role-review`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".role-review")))
}
