//! Developer role: structural size limits.
//!
//! # Detected Patterns
//!
//! - Files longer than `max_file_lines`
//! - Calls to the bare `print` builtin
//! - Functions spanning more than `max_function_lines`
//! - Functions with more than `max_function_args` positional parameters

use role_review_core::{AstNode, Issue, NodeKind, Role, RoleChecker, SourceUnit, Thresholds};

/// Checks file and function size limits.
#[derive(Debug, Clone)]
pub struct DevChecker {
    max_file_lines: usize,
    max_function_lines: usize,
    max_function_args: usize,
}

impl Default for DevChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl DevChecker {
    /// Creates a checker with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::from_thresholds(&Thresholds::default())
    }

    /// Creates a checker using the limits in `thresholds`.
    #[must_use]
    pub fn from_thresholds(thresholds: &Thresholds) -> Self {
        Self {
            max_file_lines: thresholds.max_file_lines,
            max_function_lines: thresholds.max_function_lines,
            max_function_args: thresholds.max_function_args,
        }
    }

    /// Sets maximum file lines.
    #[must_use]
    pub fn max_file_lines(mut self, max: usize) -> Self {
        self.max_file_lines = max;
        self
    }

    /// Sets maximum function lines.
    #[must_use]
    pub fn max_function_lines(mut self, max: usize) -> Self {
        self.max_function_lines = max;
        self
    }

    /// Sets maximum positional parameters.
    #[must_use]
    pub fn max_function_args(mut self, max: usize) -> Self {
        self.max_function_args = max;
        self
    }

    fn check_function(&self, unit: &SourceUnit, node: &AstNode, arg_count: usize) -> Vec<Issue> {
        let mut issues = Vec::new();
        let name = node.name_or_empty();

        let span = node.line_span();
        if span > self.max_function_lines {
            issues.push(self.issue(
                unit,
                node.start_line,
                format!(
                    "Function '{name}' too long: {span} > {} lines",
                    self.max_function_lines
                ),
            ));
        }

        if arg_count > self.max_function_args {
            issues.push(self.issue(
                unit,
                node.start_line,
                format!(
                    "Function '{name}' has {arg_count} args > {}",
                    self.max_function_args
                ),
            ));
        }

        issues
    }

    fn issue(&self, unit: &SourceUnit, line: usize, message: String) -> Issue {
        Issue::new(self.role(), unit.display_path(), line, message)
    }
}

impl RoleChecker for DevChecker {
    fn role(&self) -> Role {
        Role::Dev
    }

    fn description(&self) -> &'static str {
        "File and function size limits, no print()"
    }

    fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
        let mut issues = Vec::new();

        let line_count = unit.raw_lines.len();
        if line_count > self.max_file_lines {
            issues.push(self.issue(
                unit,
                1,
                format!(
                    "File too long: {line_count} > {} lines",
                    self.max_file_lines
                ),
            ));
        }

        for node in unit.ast.walk() {
            match &node.kind {
                NodeKind::CallExpr {
                    callee_name: Some(callee),
                } if callee == "print" => {
                    issues.push(self.issue(
                        unit,
                        node.start_line,
                        "Use logging instead of print()".to_string(),
                    ));
                }
                NodeKind::FunctionDef { arg_count, .. } => {
                    issues.extend(self.check_function(unit, node, *arg_count));
                }
                _ => {}
            }
        }

        issues
    }
}
