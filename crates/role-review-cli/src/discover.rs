//! Candidate file enumeration.
//!
//! By default the candidates are the files staged in git. Explicit paths and
//! `--all` walk the filesystem instead, honouring `.gitignore`.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// What to review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Files added, copied or modified in the git index.
    Staged,
    /// Every file under the current directory.
    WorkingTree,
    /// Explicit files and directories.
    Paths(Vec<PathBuf>),
}

/// Lists candidate paths for `target`, in a stable order.
///
/// Extension and exclude filtering is left to the analyzer.
pub fn candidates(target: &Target) -> Result<Vec<PathBuf>> {
    match target {
        Target::Staged => staged_files(),
        Target::WorkingTree => walk(Path::new(".")),
        Target::Paths(paths) => {
            let mut files = Vec::new();
            for path in paths {
                if path.is_dir() {
                    files.extend(walk(path)?);
                } else {
                    files.push(path.clone());
                }
            }
            Ok(files)
        }
    }
}

/// Staged files from `git diff --cached`, relative to the repository root.
fn staged_files() -> Result<Vec<PathBuf>> {
    let output = Command::new("git")
        .args(["diff", "--cached", "--name-only", "--diff-filter=ACM"])
        .output()
        .context("Failed to run git")?;

    if !output.status.success() {
        bail!(
            "git diff --cached failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8(output.stdout).context("git output is not UTF-8")?;
    let files = parse_name_list(&stdout);
    tracing::debug!("{} staged file(s)", files.len());
    Ok(files)
}

fn parse_name_list(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn walk(root: &Path) -> Result<Vec<PathBuf>> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.git_ignore(true).require_git(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let path = path.strip_prefix("./").unwrap_or(path);
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
