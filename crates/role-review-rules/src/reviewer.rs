//! Reviewer role: code review hygiene.
//!
//! # Detected Patterns
//!
//! - Comment lines that look like disabled code
//! - `TODO` markers without an author
//! - Public functions without a return annotation

use role_review_core::{Issue, NodeKind, Role, RoleChecker, SourceUnit};

/// Keywords that make a comment line look like commented-out code.
const CODE_KEYWORDS: &[&str] = &["def ", "class ", "import ", "return "];

/// Flags review-hygiene problems.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewerChecker;

impl ReviewerChecker {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn is_commented_code(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.starts_with('#') && CODE_KEYWORDS.iter().any(|kw| trimmed.contains(kw))
    }

    fn is_unattributed_todo(line: &str) -> bool {
        line.contains("TODO") && !line.contains("TODO(")
    }

    fn needs_return_annotation(name: &str) -> bool {
        !name.starts_with('_') && name != "__init__"
    }
}

impl RoleChecker for ReviewerChecker {
    fn role(&self) -> Role {
        Role::Reviewer
    }

    fn description(&self) -> &'static str {
        "No commented-out code, attributed TODOs, return annotations"
    }

    fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
        let file = unit.display_path();
        let mut issues = Vec::new();

        for (number, line) in unit.numbered_lines() {
            if Self::is_commented_code(line) {
                issues.push(Issue::new(
                    self.role(),
                    file.clone(),
                    number,
                    "Remove commented-out code",
                ));
            }
            if Self::is_unattributed_todo(line) {
                issues.push(Issue::new(
                    self.role(),
                    file.clone(),
                    number,
                    "TODO must have author: TODO(username): message",
                ));
            }
        }

        for node in unit.ast.walk() {
            if let NodeKind::FunctionDef {
                has_return_annotation: false,
                ..
            } = node.kind
            {
                let name = node.name_or_empty();
                if Self::needs_return_annotation(name) {
                    issues.push(Issue::new(
                        self.role(),
                        file.clone(),
                        node.start_line,
                        format!("Function '{name}' missing return type"),
                    ));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use role_review_core::AstNode;

    fn unannotated(name: &str, line: usize) -> AstNode {
        AstNode::new(
            NodeKind::FunctionDef {
                is_async: false,
                arg_count: 0,
                has_return_annotation: false,
            },
            line,
        )
        .with_end(line + 1)
        .with_name(name)
    }

    fn check(content: &str, ast: AstNode) -> Vec<Issue> {
        ReviewerChecker::new().check(&SourceUnit::new("app/views.py", content, ast))
    }

    #[test]
    fn commented_out_code() {
        let content = "# def old_handler():\n    #   return 1\n# plain remark\nx = 1  # import later\n";
        let issues = check(content, AstNode::module(vec![]));
        let lines: Vec<_> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(issues.iter().all(|i| i.message == "Remove commented-out code"));
    }

    #[test]
    fn todo_requires_author() {
        let content = "# TODO fix this\n# TODO(alice): fix that\nx = 'TODO'\n";
        let issues = check(content, AstNode::module(vec![]));
        let lines: Vec<_> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 3]);
        assert_eq!(
            issues[0].message,
            "TODO must have author: TODO(username): message"
        );
    }

    #[test]
    fn one_line_can_yield_both_line_issues() {
        let issues = check("# TODO: return value\n", AstNode::module(vec![]));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn missing_return_type_on_public_functions_only() {
        let ast = AstNode::module(vec![
            unannotated("handle", 1),
            unannotated("_helper", 4),
            unannotated("__init__", 7),
            unannotated("__repr__", 10),
            AstNode::function("annotated", 13, 14, 0),
        ]);
        let issues = check("", ast);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues[0].message, "Function 'handle' missing return type");
    }
}
