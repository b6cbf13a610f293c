//! Read-only directory lookups for project-structure checks.

use std::path::{Path, PathBuf};

/// Answers whether a path exists.
///
/// Checks that look at the surrounding project (rather than the file alone)
/// go through this capability so they stay testable without a real tree.
pub trait DirectoryProbe: Send + Sync {
    /// Returns true if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`DirectoryProbe`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl DirectoryProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Finds the package root that owns `file`.
///
/// Walks upward from the file's directory and stops at the first directory
/// that contains one of `markers`, at a directory named `container`, or when
/// no ancestors are left.
#[must_use]
pub fn find_package_root(
    file: &Path,
    markers: &[String],
    container: &str,
    probe: &dyn DirectoryProbe,
) -> PathBuf {
    let mut dir = file.parent().unwrap_or(Path::new(""));

    loop {
        if dir.file_name().is_some_and(|n| n == container) {
            break;
        }
        if markers.iter().any(|m| probe.exists(&dir.join(m))) {
            break;
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    dir.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct MemProbe(HashSet<PathBuf>);

    impl MemProbe {
        fn with(paths: &[&str]) -> Self {
            Self(paths.iter().map(PathBuf::from).collect())
        }
    }

    impl DirectoryProbe for MemProbe {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn markers() -> Vec<String> {
        vec!["pyproject.toml".to_string()]
    }

    #[test]
    fn stops_at_nearest_marker() {
        let probe = MemProbe::with(&["packages/api/pyproject.toml", "pyproject.toml"]);
        let root = find_package_root(
            Path::new("packages/api/src/api/routes.py"),
            &markers(),
            "packages",
            &probe,
        );
        assert_eq!(root, PathBuf::from("packages/api"));
    }

    #[test]
    fn stops_at_container_directory() {
        let probe = MemProbe::with(&["pyproject.toml"]);
        let root = find_package_root(
            Path::new("packages/loose/routes.py"),
            &markers(),
            "packages",
            &probe,
        );
        assert_eq!(root, PathBuf::from("packages"));
    }

    #[test]
    fn runs_out_of_ancestors() {
        let probe = MemProbe::with(&[]);
        let root = find_package_root(Path::new("app/routes.py"), &markers(), "packages", &probe);
        assert_eq!(root, PathBuf::new());
    }

    #[test]
    fn file_in_marker_directory() {
        let probe = MemProbe::with(&["svc/pyproject.toml"]);
        let root = find_package_root(Path::new("svc/main.py"), &markers(), "packages", &probe);
        assert_eq!(root, PathBuf::from("svc"));
    }

    #[test]
    fn fs_probe_checks_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("pyproject.toml"), "").expect("write");
        assert!(FsProbe.exists(&dir.path().join("pyproject.toml")));
        assert!(!FsProbe.exists(&dir.path().join("openapi.yaml")));
    }
}
