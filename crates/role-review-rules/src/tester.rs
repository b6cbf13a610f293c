//! Tester role: keeps `assert` out of production code.

use role_review_core::{Issue, NodeKind, Role, RoleChecker, SourceUnit};
use tracing::trace;

/// Flags assert statements outside test files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TesterChecker;

impl TesterChecker {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RoleChecker for TesterChecker {
    fn role(&self) -> Role {
        Role::Tester
    }

    fn description(&self) -> &'static str {
        "No assert outside test files"
    }

    fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
        if unit.is_test {
            trace!("Test file, skipping asserts: {}", unit.path.display());
            return Vec::new();
        }

        unit.ast
            .walk()
            .filter(|n| n.kind == NodeKind::AssertStmt)
            .map(|n| {
                Issue::new(
                    self.role(),
                    unit.display_path(),
                    n.start_line,
                    "Avoid assert in production code, use exceptions",
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use role_review_core::AstNode;

    fn asserts() -> AstNode {
        AstNode::module(vec![
            AstNode::new(NodeKind::AssertStmt, 3),
            AstNode::function("validate", 5, 8, 1)
                .with_children(vec![AstNode::new(NodeKind::AssertStmt, 7)]),
        ])
    }

    #[test]
    fn each_assert_in_production_code() {
        let unit = SourceUnit::new("pkg/validate.py", "", asserts());
        let issues = TesterChecker::new().check(&unit);
        let lines: Vec<_> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![3, 7]);
        assert_eq!(
            issues[0].message,
            "Avoid assert in production code, use exceptions"
        );
    }

    #[test]
    fn test_files_are_exempt() {
        for path in ["pkg/test_validate.py", "pkg/tests/validate.py", "tests/helpers.py"] {
            let unit = SourceUnit::new(path, "", asserts());
            assert!(TesterChecker::new().check(&unit).is_empty(), "{path}");
        }
    }
}
