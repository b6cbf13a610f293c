//! # role-review-core
//!
//! Core framework for role-based code review of changed source files.
//!
//! This crate provides the language-agnostic building blocks:
//!
//! - [`AstNode`] / [`NodeKind`], the closed syntax model checkers inspect
//! - [`SourceParser`] for plugging in a concrete language parser
//! - [`SourceUnit`] and [`Loader`] for turning paths into parsed files
//! - [`RoleChecker`] and [`RoleRegistry`] for the per-role rule sets
//! - [`Analyzer`] for orchestrating a review run
//! - [`Issue`] and [`ReviewResult`] for findings and the final verdict
//!
//! ## Example
//!
//! ```ignore
//! use role_review_core::{Analyzer, Config, RoleRegistry};
//!
//! let analyzer = Analyzer::builder()
//!     .parser(PythonParser::new())
//!     .registry(registry)
//!     .config(Config::default())
//!     .build()?;
//!
//! let result = analyzer.analyze(&staged_paths);
//! print!("{}", result.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod ast;
mod config;
mod loader;
mod probe;
mod registry;
mod rule;
mod source;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use ast::{AstNode, NodeKind, Walk};
pub use config::{
    AnalyzerConfig, ArchitectureConfig, Config, ConfigError, RoleConfig, Thresholds,
};
pub use loader::{LoadOutcome, LoadSummary, Loader};
pub use probe::{find_package_root, DirectoryProbe, FsProbe};
pub use registry::{RegistryBuilder, RegistryError, RoleRegistry};
pub use rule::{CheckerBox, RoleChecker};
pub use source::{ParseError, SourceParser, SourceUnit};
pub use types::{Issue, ReviewResult, Role};
