//! Changed-files check for pull requests
//!
//! When plugin files change, at least one documentation file must change in
//! the same diff. Failing to obtain the diff is never a failure.

use std::io;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;

use crate::domain::{Diagnostic, ValidationReport};

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Failed to run git: {0}")]
    Spawn(#[from] io::Error),

    #[error("git diff failed: {0}")]
    Failed(String),
}

/// Supplies repository-relative paths changed against a base
pub trait ChangeSource {
    fn changed_files(&self) -> Result<Vec<String>, DiffError>;
}

/// Asks git for `git diff --name-only <base>...HEAD`
pub struct GitDiff {
    root: PathBuf,
    base: String,
}

impl GitDiff {
    pub fn new(root: impl Into<PathBuf>, base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base: base.into(),
        }
    }
}

impl ChangeSource for GitDiff {
    fn changed_files(&self) -> Result<Vec<String>, DiffError> {
        let range = format!("{}...HEAD", self.base);
        let output = Command::new("git")
            .args(["diff", "--name-only", &range])
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiffError::Failed(stderr.trim().to_string()));
        }

        Ok(parse_name_only(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// A fixed list of changed files
#[derive(Debug, Clone, Default)]
pub struct ChangedFiles(pub Vec<String>);

impl ChangeSource for ChangedFiles {
    fn changed_files(&self) -> Result<Vec<String>, DiffError> {
        Ok(self.0.clone())
    }
}

/// Splits `--name-only` output into paths, dropping blank lines
pub fn parse_name_only(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Message for plugin changes without documentation changes
pub fn undocumented_change_message(doc_files: &[String]) -> String {
    format!(
        "Plugin files were modified but marketplace files ({}) were not updated. \
         Please update the marketplace documentation to reflect the plugin changes.",
        doc_files.join(", ")
    )
}

/// Checks that plugin changes come with a documentation change
///
/// `plugins_prefix` is the plugins root with a trailing slash; `doc_files`
/// are repository-relative, the first one receives the annotation.
pub fn check_changes(
    source: &dyn ChangeSource,
    plugins_prefix: &str,
    doc_files: &[String],
) -> ValidationReport {
    let mut report = ValidationReport::new();

    let changed = match source.changed_files() {
        Ok(changed) => changed,
        Err(e) => {
            tracing::warn!(error = %e, "could not get changed files, skipping diff check");
            return report;
        }
    };

    let plugin_changes = changed
        .iter()
        .filter(|path| path.starts_with(plugins_prefix))
        .count();

    if plugin_changes == 0 {
        tracing::debug!("no plugin changes detected");
        return report;
    }

    let docs_updated = changed.iter().any(|path| doc_files.contains(path));
    if docs_updated {
        tracing::debug!(plugin_changes, "documentation updated alongside plugin changes");
        return report;
    }

    let mut diagnostic = Diagnostic::new(undocumented_change_message(doc_files));
    if let Some(primary) = doc_files.first() {
        diagnostic = diagnostic.at(primary);
    }
    report.error(diagnostic);
    report
}
