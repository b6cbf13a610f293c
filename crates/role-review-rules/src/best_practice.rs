//! Best-practice role: security-sensitive patterns.
//!
//! # Detected Patterns
//!
//! - Assignments that look like hardcoded credentials
//! - Bare `except:` clauses
//! - Calls to `eval` and `exec`

use role_review_core::{Issue, NodeKind, Role, RoleChecker, SourceUnit};

/// Lowercase keywords that suggest a credential.
const SECRET_PATTERNS: &[&str] = &[
    "password",
    "secret",
    "api_key",
    "apikey",
    "token",
    "credential",
];

/// Builtins that execute arbitrary code.
const DANGEROUS_CALLS: &[&str] = &["eval", "exec"];

/// Flags hardcoded secrets, bare excepts and dynamic code execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestPracticeChecker;

impl BestPracticeChecker {
    /// Creates a new checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Secret keywords found on a line that assigns a string literal and does
    /// not read from the environment.
    fn secret_keywords(line: &str) -> impl Iterator<Item = &'static str> + '_ {
        let assigns_literal = line.contains('=')
            && (line.contains('"') || line.contains('\''))
            && !line.contains("os.getenv")
            && !line.contains("environ");
        let lower = line.to_lowercase();

        SECRET_PATTERNS
            .iter()
            .copied()
            .filter(move |kw| assigns_literal && lower.contains(kw))
    }
}

impl RoleChecker for BestPracticeChecker {
    fn role(&self) -> Role {
        Role::BestPractice
    }

    fn description(&self) -> &'static str {
        "No hardcoded secrets, bare except, eval() or exec()"
    }

    fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
        let file = unit.display_path();
        let mut issues = Vec::new();

        for (number, line) in unit.numbered_lines() {
            for keyword in Self::secret_keywords(line) {
                issues.push(Issue::new(
                    self.role(),
                    file.clone(),
                    number,
                    format!("Possible hardcoded secret: {keyword}"),
                ));
            }
        }

        for node in unit.ast.walk() {
            match &node.kind {
                NodeKind::ExceptHandler { has_type: false } => {
                    issues.push(Issue::new(
                        self.role(),
                        file.clone(),
                        node.start_line,
                        "Avoid bare except, catch specific exceptions",
                    ));
                }
                NodeKind::CallExpr {
                    callee_name: Some(callee),
                } if DANGEROUS_CALLS.contains(&callee.as_str()) => {
                    issues.push(Issue::new(
                        self.role(),
                        file.clone(),
                        node.start_line,
                        format!("Avoid {callee}() \u{2014} security risk"),
                    ));
                }
                _ => {}
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use role_review_core::AstNode;

    fn check(content: &str, ast: AstNode) -> Vec<Issue> {
        BestPracticeChecker::new().check(&SourceUnit::new("app/settings.py", content, ast))
    }

    fn messages(issues: &[Issue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn hardcoded_token() {
        let issues = check("TOKEN = \"abc123\"\n", AstNode::module(vec![]));
        assert_eq!(messages(&issues), vec!["Possible hardcoded secret: token"]);
        assert_eq!(issues[0].line, 1);
    }

    #[test]
    fn token_from_environment_passes() {
        let content = "TOKEN = os.getenv(\"TOKEN\")\nPASSWORD = os.environ['PASSWORD']\n";
        assert!(check(content, AstNode::module(vec![])).is_empty());
    }

    #[test]
    fn no_literal_no_secret() {
        let content = "token = load_token()\nif password == expected:\n";
        assert!(check(content, AstNode::module(vec![])).is_empty());
    }

    #[test]
    fn one_issue_per_matching_keyword() {
        let issues = check("secret_api_key = 'x'\n", AstNode::module(vec![]));
        assert_eq!(
            messages(&issues),
            vec![
                "Possible hardcoded secret: secret",
                "Possible hardcoded secret: api_key",
            ]
        );
    }

    #[test]
    fn bare_except_and_eval() {
        let ast = AstNode::module(vec![
            AstNode::new(NodeKind::Other, 1).with_children(vec![
                AstNode::new(NodeKind::ExceptHandler { has_type: true }, 3),
                AstNode::new(NodeKind::ExceptHandler { has_type: false }, 5),
            ]),
            AstNode::call("eval", 8),
        ]);
        let issues = check("", ast);
        assert_eq!(issues.len(), 2);

        let mut found = messages(&issues);
        found.sort_unstable();
        assert_eq!(
            found,
            vec![
                "Avoid bare except, catch specific exceptions",
                "Avoid eval() \u{2014} security risk",
            ]
        );
    }

    #[test]
    fn exec_is_flagged_by_name() {
        let issues = check("", AstNode::module(vec![AstNode::call("exec", 2)]));
        insta::assert_snapshot!(issues[0].to_string(), @"app/settings.py:2: [best_practice] Avoid exec() — security risk");
    }
}
