//! Core analyzer for orchestrating a review run.

use crate::config::Config;
use crate::loader::Loader;
use crate::registry::RoleRegistry;
use crate::source::{SourceParser, SourceUnit};
use crate::types::{Issue, ReviewResult};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while assembling an analyzer.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// No parser was supplied.
    #[error("no source parser configured")]
    MissingParser,

    /// No registry was supplied.
    #[error("no role registry configured")]
    MissingRegistry,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    parser: Option<Box<dyn SourceParser>>,
    registry: Option<RoleRegistry>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Sets the role registry.
    #[must_use]
    pub fn registry(mut self, registry: RoleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser or registry is missing, or the
    /// configuration does not validate.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let registry = self.registry.ok_or(AnalyzerError::MissingRegistry)?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let exclude_patterns = config.exclude_patterns();

        Ok(Analyzer {
            parser,
            registry,
            config,
            exclude_patterns,
        })
    }
}

/// The main analyzer that orchestrates a review run.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    parser: Box<dyn SourceParser>,
    registry: RoleRegistry,
    config: Config,
    exclude_patterns: Vec<glob::Pattern>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of enabled roles.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.registry
            .roles()
            .filter(|r| self.config.is_role_enabled(*r))
            .count()
    }

    /// Keeps only paths the parser handles and the config does not exclude.
    #[must_use]
    pub fn select(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        paths
            .iter()
            .filter(|p| {
                if !self.parser.handles(p) {
                    return false;
                }
                if self.should_exclude(p) {
                    debug!("Excluding: {}", p.display());
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }

    /// Reviews `paths` and returns the sorted result.
    ///
    /// Paths are first narrowed with [`Analyzer::select`]. An empty input
    /// yields an empty, passing result.
    #[must_use]
    pub fn analyze(&self, paths: &[PathBuf]) -> ReviewResult {
        let selected = self.select(paths);
        info!(
            "Reviewing {} {} file(s) with {} role(s)",
            selected.len(),
            self.parser.language_id(),
            self.role_count()
        );

        let outcome = Loader::new(self.parser.as_ref()).load_all(&selected);

        let mut result = ReviewResult::new();
        result.files_missing = outcome.summary.missing;
        result.files_unparsable = outcome.summary.unparsable;

        for unit in &outcome.units {
            result.issues.extend(self.analyze_unit(unit));
            result.files_checked += 1;
        }

        result.sort();

        info!(
            "Review complete: {} issue(s) in {} file(s)",
            result.issues.len(),
            result.files_checked
        );

        result
    }

    /// Runs every enabled role against one unit, unsorted.
    #[must_use]
    pub fn analyze_unit(&self, unit: &SourceUnit) -> Vec<Issue> {
        debug!("Analyzing: {}", unit.path.display());
        self.registry
            .check(unit, |role| self.config.is_role_enabled(role))
    }

    /// Checks if a path matches one of the exclude globs.
    fn should_exclude(&self, path: &Path) -> bool {
        self.exclude_patterns.iter().any(|p| p.matches_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstNode, NodeKind};
    use crate::rule::RoleChecker;
    use crate::source::ParseError;
    use crate::types::Role;

    struct LineParser;

    impl SourceParser for LineParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["py"]
        }

        fn parse(&self, source: &str) -> Result<AstNode, ParseError> {
            if source.starts_with("!!") {
                return Err(ParseError::Syntax { line: 1 });
            }
            let children = source
                .lines()
                .enumerate()
                .filter(|(_, l)| l.starts_with("assert"))
                .map(|(i, _)| AstNode::new(NodeKind::AssertStmt, i + 1))
                .collect();
            Ok(AstNode::module(children))
        }
    }

    struct AssertCounter(Role);

    impl RoleChecker for AssertCounter {
        fn role(&self) -> Role {
            self.0
        }

        fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
            unit.ast
                .walk()
                .filter(|n| n.kind == NodeKind::AssertStmt)
                .map(|n| Issue::new(self.0, unit.display_path(), n.start_line, "assert"))
                .collect()
        }
    }

    fn analyzer(config: Config) -> Analyzer {
        let registry = RoleRegistry::builder()
            .checker(AssertCounter(Role::Tester))
            .checker(AssertCounter(Role::Architect))
            .build()
            .expect("registry");
        Analyzer::builder()
            .parser(LineParser)
            .registry(registry)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder_requires_parser() {
        let registry = RoleRegistry::builder()
            .checker(AssertCounter(Role::Dev))
            .build()
            .expect("registry");
        let err = Analyzer::builder().registry(registry).build().err();
        assert!(matches!(err, Some(AnalyzerError::MissingParser)));
    }

    #[test]
    fn test_exclude_patterns() {
        let mut config = Config::default();
        config.analyzer.exclude = vec!["**/migrations/**".to_string()];
        let analyzer = analyzer(config);

        let selected = analyzer.select(&[
            PathBuf::from("app/migrations/0001_init.py"),
            PathBuf::from("app/models.py"),
            PathBuf::from("README.md"),
        ]);
        assert_eq!(selected, vec![PathBuf::from("app/models.py")]);
    }

    #[test]
    fn analyze_sorts_and_counts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = dir.path().join("b.py");
        let a = dir.path().join("a.py");
        let broken = dir.path().join("broken.py");
        std::fs::write(&b, "assert x\n").expect("write");
        std::fs::write(&a, "x = 1\nassert y\nassert z\n").expect("write");
        std::fs::write(&broken, "!!\nassert nope\n").expect("write");

        let result = analyzer(Config::default()).analyze(&[
            b.clone(),
            broken,
            dir.path().join("missing.py"),
            a.clone(),
        ]);

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.files_missing, 1);
        assert_eq!(result.files_unparsable, 1);
        assert_eq!(result.issues.len(), 6);
        assert_eq!(result.issues[0].role, Role::Architect);
        assert_eq!(result.issues[0].file, a.display().to_string());
        assert_eq!(result.issues[0].line, 2);
        assert_eq!(result.issues[2].file, b.display().to_string());
        assert_eq!(result.issues[3].role, Role::Tester);
    }

    #[test]
    fn disabled_roles_do_not_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("a.py");
        std::fs::write(&a, "assert y\n").expect("write");

        let mut config = Config::default();
        config
            .roles
            .insert("architect".to_string(), crate::config::RoleConfig { enabled: false });
        let analyzer = analyzer(config);

        assert_eq!(analyzer.role_count(), 1);
        let result = analyzer.analyze(&[a]);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].role, Role::Tester);
    }

    #[test]
    fn empty_input_passes() {
        let result = analyzer(Config::default()).analyze(&[]);
        assert!(result.passed());
        assert_eq!(result.files_checked, 0);
    }
}
