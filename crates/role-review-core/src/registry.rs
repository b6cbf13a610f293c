//! Immutable role-to-checker registry.

use miette::Diagnostic;
use thiserror::Error;

use crate::rule::{CheckerBox, RoleChecker};
use crate::source::SourceUnit;
use crate::types::{Issue, Role};

/// Errors raised while assembling a registry.
///
/// These indicate a wiring mistake in the caller, not a runtime condition.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    /// Two checkers claim the same role.
    #[error("role `{0}` is registered more than once")]
    #[diagnostic(
        code(role_review::registry::duplicate_role),
        help("register exactly one checker per role")
    )]
    DuplicateRole(Role),

    /// No checker was registered.
    #[error("no checkers registered")]
    #[diagnostic(code(role_review::registry::empty))]
    Empty,
}

/// Builder for a [`RoleRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    checkers: Vec<CheckerBox>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a checker. Registration order is invocation order.
    #[must_use]
    pub fn checker<C: RoleChecker + 'static>(mut self, checker: C) -> Self {
        self.checkers.push(Box::new(checker));
        self
    }

    /// Adds a boxed checker.
    #[must_use]
    pub fn checker_box(mut self, checker: CheckerBox) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when no checker was added or a role is
    /// registered twice.
    pub fn build(self) -> Result<RoleRegistry, RegistryError> {
        if self.checkers.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = Vec::with_capacity(self.checkers.len());
        for checker in &self.checkers {
            let role = checker.role();
            if seen.contains(&role) {
                return Err(RegistryError::DuplicateRole(role));
            }
            seen.push(role);
        }

        Ok(RoleRegistry {
            checkers: self.checkers,
        })
    }
}

/// Ordered, immutable mapping from role to checker.
///
/// Built once via [`RoleRegistry::builder`] and shared by reference.
pub struct RoleRegistry {
    checkers: Vec<CheckerBox>,
}

impl RoleRegistry {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registered roles in invocation order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.checkers.iter().map(|c| c.role())
    }

    /// Registered checkers in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn RoleChecker> {
        self.checkers.iter().map(|c| {
            let checker: &dyn RoleChecker = c.as_ref();
            checker
        })
    }

    /// Looks up the checker for `role`.
    #[must_use]
    pub fn get(&self, role: Role) -> Option<&dyn RoleChecker> {
        self.iter().find(|c| c.role() == role)
    }

    /// Number of registered checkers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    /// Always false for a built registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }

    /// Runs every checker accepted by `enabled` against `unit`, in order.
    pub fn check(&self, unit: &SourceUnit, enabled: impl Fn(Role) -> bool) -> Vec<Issue> {
        let mut issues = Vec::new();
        for checker in self.iter() {
            if !enabled(checker.role()) {
                tracing::debug!("Skipping disabled role: {}", checker.role());
                continue;
            }
            issues.extend(checker.check(unit));
        }
        issues
    }
}

impl std::fmt::Debug for RoleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.roles()).finish()
    }
}
