//! Registry presets built from configuration.

use crate::{ArchitectChecker, BestPracticeChecker, DevChecker, ReviewerChecker, TesterChecker};
use role_review_core::{CheckerBox, Config, RegistryError, Role, RoleRegistry};

/// Builds the checker for one role from `config`.
#[must_use]
pub fn checker_for(role: Role, config: &Config) -> CheckerBox {
    match role {
        Role::Dev => Box::new(DevChecker::from_thresholds(&config.thresholds)),
        Role::Tester => Box::new(TesterChecker::new()),
        Role::Reviewer => Box::new(ReviewerChecker::new()),
        Role::BestPractice => Box::new(BestPracticeChecker::new()),
        Role::Architect => Box::new(ArchitectChecker::from_config(
            &config.thresholds,
            config.architecture.clone(),
        )),
    }
}

/// Returns one checker per role, in the default invocation order.
#[must_use]
pub fn all_checkers(config: &Config) -> Vec<CheckerBox> {
    Role::ALL.iter().map(|r| checker_for(*r, config)).collect()
}

/// Builds a registry holding `roles` in the given order.
///
/// # Errors
///
/// Returns [`RegistryError`] if `roles` is empty or repeats a role.
pub fn registry_for(roles: &[Role], config: &Config) -> Result<RoleRegistry, RegistryError> {
    roles
        .iter()
        .fold(RoleRegistry::builder(), |builder, role| {
            builder.checker_box(checker_for(*role, config))
        })
        .build()
}

/// Builds the registry with all five roles.
///
/// # Errors
///
/// Never fails for the built-in role set; the signature mirrors
/// [`registry_for`].
pub fn default_registry(config: &Config) -> Result<RoleRegistry, RegistryError> {
    registry_for(&Role::ALL, config)
}
