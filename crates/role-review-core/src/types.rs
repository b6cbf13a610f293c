//! Core types for review findings and results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A review role: a named family of checks.
///
/// Roles carry no behavior of their own. The icon and tag are used for
/// reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Structural size limits.
    Dev,
    /// Test hygiene.
    Tester,
    /// Review readiness.
    Reviewer,
    /// Security and pattern heuristics.
    BestPractice,
    /// Structure and design limits.
    Architect,
}

impl Role {
    /// Every role, in default invocation order.
    pub const ALL: [Role; 5] = [
        Self::Dev,
        Self::Tester,
        Self::Reviewer,
        Self::BestPractice,
        Self::Architect,
    ];

    /// Returns the role tag used in reports, config keys and sorting.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Tester => "tester",
            Self::Reviewer => "reviewer",
            Self::BestPractice => "best_practice",
            Self::Architect => "architect",
        }
    }

    /// Returns the display icon for this role.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dev => "\u{1f468}\u{200d}\u{1f4bb}",
            Self::Tester => "\u{1f9ea}",
            Self::Reviewer => "\u{1f440}",
            Self::BestPractice => "\u{2728}",
            Self::Architect => "\u{1f3d7}\u{fe0f}",
        }
    }

    /// Parses a role tag, e.g. `"best_practice"`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == tag)
    }
}

// Roles order by tag so that `BTreeMap<Role, _>` and report sorting agree.
impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding emitted by a role's checker.
///
/// Issues have no identity beyond their field values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Role that produced this issue.
    pub role: Role,
    /// Path of the offending file, as given to the analyzer.
    pub file: String,
    /// Line number (1-indexed). File-level findings use line 1.
    pub line: usize,
    /// Human-readable message.
    pub message: String,
}

impl Issue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(role: Role, file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            role,
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Sort key: role tag, then file, then line.
    #[must_use]
    pub fn sort_key(&self) -> (&'static str, &str, usize) {
        (self.role.as_str(), self.file.as_str(), self.line)
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file, self.line, self.role, self.message
        )
    }
}

/// Result of a review run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ReviewResult {
    /// All issues found, sorted once [`ReviewResult::sort`] has run.
    pub issues: Vec<Issue>,
    /// Number of files that were parsed and checked.
    pub files_checked: usize,
    /// Number of listed files that no longer exist on disk.
    pub files_missing: usize,
    /// Number of files excluded because they could not be read or parsed.
    pub files_unparsable: usize,
}

impl ReviewResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when no issues were found.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Sorts issues by `(role, file, line)`.
    ///
    /// The sort is stable: issues with equal keys keep the order in which
    /// their checker emitted them.
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    /// Counts issues per role.
    #[must_use]
    pub fn count_by_role(&self) -> BTreeMap<Role, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.role).or_insert(0) += 1;
        }
        counts
    }

    /// Issues produced by a single role.
    #[must_use]
    pub fn by_role(&self, role: Role) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.role == role).collect()
    }

    /// Renders the human-readable report.
    ///
    /// With issues: a blank line, a header, one two-line entry per issue and
    /// a total followed by a blank line. Without issues: a single success line.
    #[must_use]
    pub fn format_report(&self) -> String {
        if self.passed() {
            return "\u{2705} All role checks passed.\n".to_string();
        }

        let mut report = String::from("\n\u{274c} Role Review Issues:\n\n");
        for issue in &self.issues {
            let _ = writeln!(
                report,
                "  {} [{}] {}:{}",
                issue.role.icon(),
                issue.role,
                issue.file,
                issue.line
            );
            let _ = writeln!(report, "      {}\n", issue.message);
        }
        let _ = writeln!(report, "Total: {} issue(s)\n", self.issues.len());
        report
    }
}
