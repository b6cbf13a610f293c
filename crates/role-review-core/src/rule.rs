//! Checker trait implemented by every review role.

use crate::source::SourceUnit;
use crate::types::{Issue, Role};

/// The rule set of one review role.
///
/// Checkers are pure: the same [`SourceUnit`] always yields the same issues,
/// and checkers never fail. A file with nothing to report yields an empty
/// vector.
///
/// # Example
///
/// ```ignore
/// use role_review_core::{Issue, Role, RoleChecker, SourceUnit};
///
/// pub struct NoWildcardImports;
///
/// impl RoleChecker for NoWildcardImports {
///     fn role(&self) -> Role { Role::Reviewer }
///
///     fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
///         unit.numbered_lines()
///             .filter(|(_, l)| l.contains("import *"))
///             .map(|(n, _)| Issue::new(self.role(), unit.display_path(), n, "Avoid wildcard imports"))
///             .collect()
///     }
/// }
/// ```
pub trait RoleChecker: Send + Sync {
    /// Role this checker is registered under.
    fn role(&self) -> Role;

    /// Returns a brief description of what this role checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single file and returns any issues found.
    fn check(&self, unit: &SourceUnit) -> Vec<Issue>;
}

/// Type alias for boxed [`RoleChecker`] trait objects.
pub type CheckerBox = Box<dyn RoleChecker>;
