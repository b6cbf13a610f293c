//! Architect role: module structure and API documentation.
//!
//! # Detected Patterns
//!
//! - Files declaring more than `max_classes_per_file` classes
//! - Classes with more than `max_class_methods` direct methods
//! - Files with more than `max_imports` import statements
//! - Route definitions in a package that ships no OpenAPI document
//!
//! # Route detection
//!
//! A file defines routes when any line mentions `router` (any case),
//! `@app.` or `APIRouter`. Its package root is found with
//! [`find_package_root`]; a root that is the packages container itself is
//! never flagged.

use role_review_core::{
    find_package_root, ArchitectureConfig, DirectoryProbe, FsProbe, Issue, NodeKind, Role,
    RoleChecker, SourceUnit, Thresholds,
};
use std::path::Path;
use tracing::debug;

/// Checks structural limits and the route/OpenAPI pairing.
pub struct ArchitectChecker {
    max_classes_per_file: usize,
    max_class_methods: usize,
    max_imports: usize,
    architecture: ArchitectureConfig,
    probe: Box<dyn DirectoryProbe>,
}

impl Default for ArchitectChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ArchitectChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchitectChecker")
            .field("max_classes_per_file", &self.max_classes_per_file)
            .field("max_class_methods", &self.max_class_methods)
            .field("max_imports", &self.max_imports)
            .field("architecture", &self.architecture)
            .finish_non_exhaustive()
    }
}

impl ArchitectChecker {
    /// Creates a checker with default limits, probing the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Thresholds::default(), ArchitectureConfig::default())
    }

    /// Creates a checker from configured limits and package layout.
    #[must_use]
    pub fn from_config(thresholds: &Thresholds, architecture: ArchitectureConfig) -> Self {
        Self {
            max_classes_per_file: thresholds.max_classes_per_file,
            max_class_methods: thresholds.max_class_methods,
            max_imports: thresholds.max_imports,
            architecture,
            probe: Box::new(FsProbe),
        }
    }

    /// Replaces the directory probe used by the route check.
    #[must_use]
    pub fn with_probe<P: DirectoryProbe + 'static>(mut self, probe: P) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Sets maximum classes per file.
    #[must_use]
    pub fn max_classes_per_file(mut self, max: usize) -> Self {
        self.max_classes_per_file = max;
        self
    }

    /// Sets maximum methods per class.
    #[must_use]
    pub fn max_class_methods(mut self, max: usize) -> Self {
        self.max_class_methods = max;
        self
    }

    /// Sets maximum imports per file.
    #[must_use]
    pub fn max_imports(mut self, max: usize) -> Self {
        self.max_imports = max;
        self
    }

    fn has_api_routes(unit: &SourceUnit) -> bool {
        unit.raw_lines.iter().any(|line| {
            line.to_lowercase().contains("router")
                || line.contains("@app.")
                || line.contains("APIRouter")
        })
    }

    /// Whether the package owning `file` lacks an OpenAPI document.
    fn missing_openapi(&self, file: &Path) -> bool {
        let arch = &self.architecture;
        let root = find_package_root(
            file,
            &arch.package_markers,
            &arch.packages_dir,
            self.probe.as_ref(),
        );
        debug!("Package root for {}: {}", file.display(), root.display());

        if root.file_name().is_some_and(|n| n == arch.packages_dir.as_str()) {
            return false;
        }

        !arch
            .openapi_files
            .iter()
            .any(|name| self.probe.exists(&root.join(name)))
    }
}

impl RoleChecker for ArchitectChecker {
    fn role(&self) -> Role {
        Role::Architect
    }

    fn description(&self) -> &'static str {
        "Class, method and import limits; routes need an OpenAPI document"
    }

    fn check(&self, unit: &SourceUnit) -> Vec<Issue> {
        let file = unit.display_path();
        let mut issues = Vec::new();

        let classes: Vec<_> = unit
            .ast
            .walk()
            .filter(|n| n.kind == NodeKind::ClassDef)
            .collect();

        if classes.len() > self.max_classes_per_file {
            issues.push(Issue::new(
                self.role(),
                file.clone(),
                1,
                format!(
                    "Too many classes in file: {} > {}",
                    classes.len(),
                    self.max_classes_per_file
                ),
            ));
        }

        for class in &classes {
            let methods = class.children.iter().filter(|c| c.is_function()).count();
            if methods > self.max_class_methods {
                issues.push(Issue::new(
                    self.role(),
                    file.clone(),
                    class.start_line,
                    format!(
                        "Class '{}' has too many methods: {methods} > {}",
                        class.name_or_empty(),
                        self.max_class_methods
                    ),
                ));
            }
        }

        let imports = unit
            .ast
            .walk()
            .filter(|n| n.kind == NodeKind::ImportStmt)
            .count();
        if imports > self.max_imports {
            issues.push(Issue::new(
                self.role(),
                file.clone(),
                1,
                format!(
                    "Too many imports: {imports} > {} \u{2014} consider splitting",
                    self.max_imports
                ),
            ));
        }

        if Self::has_api_routes(unit) && self.missing_openapi(&unit.path) {
            issues.push(Issue::new(
                self.role(),
                file,
                1,
                "API routes found but no openapi.yaml/json \u{2014} architecture error",
            ));
        }

        issues
    }
}
