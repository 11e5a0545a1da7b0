//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::{Diagnostic, Severity, ValidationReport};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    annotations: bool,
}

impl Output {
    /// `annotations` enables GitHub Actions workflow commands (text only)
    pub fn new(format: OutputFormat, annotations: bool) -> Self {
        Self {
            format,
            annotations,
        }
    }

    /// Prints a line of human-readable text (ignored in JSON mode)
    pub fn line(&self, message: &str) {
        if self.is_text() {
            println!("{}", message);
        }
    }

    /// Prints a blank line (text only)
    pub fn blank(&self) {
        if self.is_text() {
            println!();
        }
    }

    /// Prints a section banner (text only)
    pub fn banner(&self, title: &str) {
        if self.is_text() {
            println!("{}", "=".repeat(60));
            println!("{}", title);
            println!("{}", "=".repeat(60));
        }
    }

    /// Prints structured data as a single JSON line
    pub fn data<T: Serialize>(&self, data: &T) {
        if let Ok(json) = serde_json::to_string(data) {
            println!("{}", json);
        }
    }

    /// Prints warnings then errors, and the closing line for a clean run
    pub fn findings(&self, report: &ValidationReport, all_clear: &str) {
        if !self.is_text() {
            return;
        }

        if !report.warnings().is_empty() {
            println!();
            println!("⚠️  Warnings ({}):", report.warnings().len());
            for warning in report.warnings() {
                println!("  - {}", warning);
            }
        }

        if report.has_errors() {
            println!();
            println!("❌ Errors ({}):", report.errors().len());
            for error in report.errors() {
                println!("  - {}", error);
            }
        } else {
            println!();
            println!("{}", all_clear);
        }
    }

    /// Emits CI annotations for every finding, when enabled
    pub fn annotate(&self, report: &ValidationReport) {
        if !self.annotations || !self.is_text() {
            return;
        }
        for (severity, diagnostic) in report.iter() {
            println!("{}", annotation(severity, diagnostic));
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if using text format
    pub fn is_text(&self) -> bool {
        self.format == OutputFormat::Text
    }
}

/// Renders a GitHub Actions workflow command for a diagnostic
///
/// Errors carry `file` and `line` when known; warnings carry `file` only.
pub fn annotation(severity: Severity, diagnostic: &Diagnostic) -> String {
    let file = diagnostic.file.as_ref().map(|f| f.display().to_string());
    match (severity, file, diagnostic.line) {
        (Severity::Error, Some(file), Some(line)) => {
            format!("::error file={},line={}::{}", file, line, diagnostic)
        }
        (_, Some(file), _) => format!("::{} file={}::{}", severity, file, diagnostic),
        (_, None, _) => format!("::{}::{}", severity, diagnostic),
    }
}
