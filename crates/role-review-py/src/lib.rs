//! # role-review-py
//!
//! Tree-sitter based Python support for role-review.
//!
//! [`PythonParser`] implements [`role_review_core::SourceParser`] by parsing
//! with `tree-sitter-python` and lowering the concrete tree into the
//! language-agnostic [`role_review_core::AstNode`] model.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod parser;

pub use parser::PythonParser;
