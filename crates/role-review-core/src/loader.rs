//! Loads candidate paths into parsed [`SourceUnit`]s.
//!
//! Loading never fails as a whole: a file deleted after it was listed is
//! skipped, and a file that cannot be read or parsed is excluded, so one bad
//! file never blocks review of the rest.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::source::{SourceParser, SourceUnit};

/// Counters for files that did not become units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Listed paths that no longer exist.
    pub missing: usize,
    /// Files excluded because reading or parsing failed.
    pub unparsable: usize,
}

/// Result of loading a batch of paths.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    /// Successfully parsed units, in input order.
    pub units: Vec<SourceUnit>,
    /// What was dropped along the way.
    pub summary: LoadSummary,
}

/// Reads and parses files with an injected [`SourceParser`].
pub struct Loader<'a> {
    parser: &'a dyn SourceParser,
}

impl<'a> Loader<'a> {
    /// Creates a loader for `parser`.
    #[must_use]
    pub fn new(parser: &'a dyn SourceParser) -> Self {
        Self { parser }
    }

    /// Loads every path in order.
    pub fn load_all(&self, paths: &[PathBuf]) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        for path in paths {
            match self.load(path) {
                Loaded::Unit(unit) => outcome.units.push(*unit),
                Loaded::Missing => outcome.summary.missing += 1,
                Loaded::Unparsable => outcome.summary.unparsable += 1,
            }
        }

        outcome
    }

    fn load(&self, path: &Path) -> Loaded {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Skipping missing file: {}", path.display());
                return Loaded::Missing;
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Loaded::Unparsable;
            }
        };

        match SourceUnit::parse(path, &content, self.parser) {
            Ok(unit) => {
                debug!("Loaded: {} ({} lines)", path.display(), unit.raw_lines.len());
                Loaded::Unit(Box::new(unit))
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                Loaded::Unparsable
            }
        }
    }
}

enum Loaded {
    Unit(Box<SourceUnit>),
    Missing,
    Unparsable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstNode;
    use crate::source::ParseError;

    struct StrictParser;

    impl SourceParser for StrictParser {
        fn language_id(&self) -> &'static str {
            "strict"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["py"]
        }

        fn parse(&self, source: &str) -> Result<AstNode, ParseError> {
            match source.lines().position(|l| l.contains("SYNTAX ERROR")) {
                Some(i) => Err(ParseError::Syntax { line: i + 1 }),
                None => Ok(AstNode::module(vec![])),
            }
        }
    }

    #[test]
    fn skips_missing_and_excludes_unparsable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = dir.path().join("good.py");
        let bad = dir.path().join("bad.py");
        std::fs::write(&good, "x = 1\n").expect("write");
        std::fs::write(&bad, "x = 1\nSYNTAX ERROR\n").expect("write");
        let gone = dir.path().join("deleted.py");

        let outcome = Loader::new(&StrictParser).load_all(&[bad, gone, good.clone()]);

        assert_eq!(outcome.units.len(), 1);
        assert_eq!(outcome.units[0].path, good);
        assert_eq!(
            outcome.summary,
            LoadSummary {
                missing: 1,
                unparsable: 1
            }
        );
    }

    #[test]
    fn invalid_utf8_is_excluded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = dir.path().join("blob.py");
        std::fs::write(&binary, [0xff, 0xfe, 0x00]).expect("write");

        let outcome = Loader::new(&StrictParser).load_all(&[binary]);
        assert!(outcome.units.is_empty());
        assert_eq!(outcome.summary.unparsable, 1);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let outcome = Loader::new(&StrictParser).load_all(&[]);
        assert!(outcome.units.is_empty());
        assert_eq!(outcome.summary, LoadSummary::default());
    }
}
