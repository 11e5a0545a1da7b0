//! Validation diagnostics and reports
//!
//! A run accumulates [`Diagnostic`]s into a [`ValidationReport`]. Errors fail
//! the build, warnings are advisory. Both keep insertion order so repeated
//! runs over the same tree render identically.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Build-breaking content problem
    Error,
    /// Advisory finding
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single finding, optionally tied to a plugin and a source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Plugin directory the finding belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin: Option<String>,

    /// Human-readable message (without the plugin prefix)
    pub message: String,

    /// File the finding points at, relative to the repository root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// 1-based line within `file`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Creates a diagnostic not tied to any plugin
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            plugin: None,
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Creates a diagnostic for a plugin
    pub fn for_plugin(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            plugin: Some(plugin.into()),
            ..Self::new(message)
        }
    }

    /// Attaches a source file
    pub fn at(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Attaches a line number (ignored when `None`)
    pub fn line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plugin {
            Some(plugin) => write!(f, "[{}] {}", plugin, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Ordered errors and warnings produced by one analyzer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error
    pub fn error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    /// Records a warning
    pub fn warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    /// Appends another report's findings after this one's
    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns true if any error was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if nothing at all was recorded
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Number of errors recorded so far (used to scope checks to a plugin)
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over all findings with their severity, errors first
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &Diagnostic)> {
        self.errors
            .iter()
            .map(|d| (Severity::Error, d))
            .chain(self.warnings.iter().map(|d| (Severity::Warning, d)))
    }
}
