//! # role-review-rules
//!
//! Built-in review roles for role-review.
//!
//! ## Available Roles
//!
//! | Role | Checker | Checks |
//! |------|---------|--------|
//! | `dev` | [`DevChecker`] | File length, `print()`, function length and arity |
//! | `tester` | [`TesterChecker`] | `assert` outside test files |
//! | `reviewer` | [`ReviewerChecker`] | Commented-out code, unattributed TODOs, return annotations |
//! | `best_practice` | [`BestPracticeChecker`] | Hardcoded secrets, bare `except`, `eval`/`exec` |
//! | `architect` | [`ArchitectChecker`] | Classes, methods and imports per file; routes without OpenAPI |
//!
//! ## Usage
//!
//! ```ignore
//! use role_review_core::{Analyzer, Config};
//! use role_review_py::PythonParser;
//!
//! let config = Config::default();
//! let analyzer = Analyzer::builder()
//!     .parser(PythonParser::new())
//!     .registry(role_review_rules::default_registry(&config)?)
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod architect;
mod best_practice;
mod dev;
mod presets;
mod reviewer;
mod tester;

pub use architect::ArchitectChecker;
pub use best_practice::BestPracticeChecker;
pub use dev::DevChecker;
pub use presets::{all_checkers, checker_for, default_registry, registry_for};
pub use reviewer::ReviewerChecker;
pub use tester::TesterChecker;

/// Re-export core types for convenience.
pub use role_review_core::{Issue, Role, RoleChecker};
