//! Parsed source files and the parser extension point.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::ast::AstNode;

/// Errors a [`SourceParser`] can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source text is not syntactically valid.
    #[error("syntax error at line {line}")]
    Syntax {
        /// First line (1-indexed) containing an error.
        line: usize,
    },

    /// The parser itself could not run.
    #[error("parser failure: {0}")]
    Parser(String),
}

/// Turns source text into an [`AstNode`] tree.
///
/// Implement this to review a new language. The engine never looks at the
/// concrete parser's tree, only at the lowered [`AstNode`] shape.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot (e.g., `&["py"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` into a root node.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the text is malformed.
    fn parse(&self, source: &str) -> Result<AstNode, ParseError>;

    /// Whether `path` has one of [`SourceParser::extensions`].
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

/// A loaded, successfully parsed file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path as supplied by the file-list collaborator.
    pub path: PathBuf,
    /// File contents split on line breaks.
    pub raw_lines: Vec<String>,
    /// Root of the parsed tree.
    pub ast: AstNode,
    /// Whether the path looks like a test file.
    pub is_test: bool,
}

impl SourceUnit {
    /// Creates a unit from already parsed parts.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: &str, ast: AstNode) -> Self {
        let path = path.into();
        let is_test = Self::detect_test_file(&path);
        Self {
            path,
            raw_lines: split_lines(content),
            ast,
            is_test,
        }
    }

    /// Parses `content` and builds a unit.
    ///
    /// # Errors
    ///
    /// Propagates the parser's [`ParseError`].
    pub fn parse(
        path: impl Into<PathBuf>,
        content: &str,
        parser: &dyn SourceParser,
    ) -> Result<Self, ParseError> {
        let ast = parser.parse(content)?;
        Ok(Self::new(path, content, ast))
    }

    /// Path rendered for issue reports.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Iterates raw lines with their 1-indexed line numbers.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.raw_lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    /// Detects test files: a `test_` file name prefix or a `tests` directory.
    fn detect_test_file(path: &Path) -> bool {
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("test_"))
        {
            return true;
        }

        path.parent().is_some_and(|dir| {
            dir.components()
                .any(|c| matches!(c, Component::Normal(s) if s == "tests"))
        })
    }
}

/// Splits on every line boundary Python's `str.splitlines` knows: `\r\n`,
/// lone `\r` and `\n`, plus the vertical tab, form feed, file/group/record
/// separators, NEL and the Unicode line and paragraph separators.
fn split_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = content;
    while let Some(at) = rest.find(|c: char| {
        matches!(
            c,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}'
                | '\u{2029}'
        )
    }) {
        lines.push(rest[..at].to_string());
        let tail = &rest[at..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
    }
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    struct FixedParser;

    impl SourceParser for FixedParser {
        fn language_id(&self) -> &'static str {
            "fixed"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["py", "pyi"]
        }

        fn parse(&self, source: &str) -> Result<AstNode, ParseError> {
            if source.contains("def (") {
                return Err(ParseError::Syntax { line: 1 });
            }
            Ok(AstNode::module(vec![]))
        }
    }

    #[test]
    fn test_detect_test_file() {
        assert!(SourceUnit::detect_test_file(Path::new("test_api.py")));
        assert!(SourceUnit::detect_test_file(Path::new("pkg/test_api.py")));
        assert!(SourceUnit::detect_test_file(Path::new("pkg/tests/api.py")));
        assert!(SourceUnit::detect_test_file(Path::new("tests/conftest.py")));
        assert!(!SourceUnit::detect_test_file(Path::new("pkg/api.py")));
        assert!(!SourceUnit::detect_test_file(Path::new("pkg/api_test.py")));
        assert!(!SourceUnit::detect_test_file(Path::new("pkg/testsuite/api.py")));
        assert!(!SourceUnit::detect_test_file(Path::new("pkg/tests.py")));
    }

    #[test]
    fn raw_lines_are_numbered_from_one() {
        let unit = SourceUnit::new("a.py", "x = 1\r\ny = 2\n", AstNode::module(vec![]));
        let lines: Vec<_> = unit.numbered_lines().collect();
        assert_eq!(lines, vec![(1, "x = 1"), (2, "y = 2")]);
    }

    #[test]
    fn every_python_line_break_splits() {
        let content = "a = 1\x0cb = 2\rc = 3\u{2028}d = 4\n\ne = 5";
        let unit = SourceUnit::new("a.py", content, AstNode::module(vec![]));
        assert_eq!(unit.raw_lines, vec!["a = 1", "b = 2", "c = 3", "d = 4", "", "e = 5"]);
    }

    #[test]
    fn trailing_break_adds_no_line() {
        assert_eq!(split_lines("x\n"), vec!["x"]);
        assert_eq!(split_lines("x\r\n\r\n"), vec!["x", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn parse_propagates_syntax_error() {
        let err = SourceUnit::parse("bad.py", "def (:\n", &FixedParser).unwrap_err();
        assert_eq!(err, ParseError::Syntax { line: 1 });
    }

    #[test]
    fn parse_builds_unit() {
        let unit = SourceUnit::parse("ok.py", "pass\n", &FixedParser).expect("parse");
        assert_eq!(unit.ast.kind, NodeKind::Other);
        assert_eq!(unit.display_path(), "ok.py");
        assert!(!unit.is_test);
    }

    #[test]
    fn handles_matches_extension() {
        assert!(FixedParser.handles(Path::new("a/b.py")));
        assert!(FixedParser.handles(Path::new("stubs.pyi")));
        assert!(!FixedParser.handles(Path::new("README.md")));
        assert!(!FixedParser.handles(Path::new("Makefile")));
    }
}
