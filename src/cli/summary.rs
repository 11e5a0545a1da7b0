//! GitHub Actions job summary
//!
//! Markdown appended to the file named by `GITHUB_STEP_SUMMARY`.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::domain::ValidationReport;
use crate::validate::SchemaValidation;

/// Sync warnings shown before truncating
const MAX_SYNC_WARNINGS: usize = 5;

/// Appends `markdown` to the summary file
pub fn append(path: &Path, markdown: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(markdown.as_bytes())
}

/// Appends a summary section, logging instead of failing
pub fn append_or_log(path: Option<&Path>, markdown: &str) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = append(path, markdown) {
        tracing::warn!(path = %path.display(), error = %e, "could not write job summary");
    }
}

/// Splits a rendered `[plugin] message` into its parts
fn split_plugin(rendered: &str) -> (&str, &str) {
    rendered
        .strip_prefix('[')
        .and_then(|rest| rest.split_once("] "))
        .unwrap_or(("Unknown", rendered))
}

/// Renders the schema validation section
pub fn schema_summary(validation: &SchemaValidation) -> String {
    let report = &validation.report;
    let valid = validation.valid_plugins.len();
    let mut md = String::new();

    let _ = writeln!(md, "## 🔍 Plugin Schema Validation Results\n");

    if !report.has_errors() {
        let _ = writeln!(md, "### ✅ All Plugins Valid!\n");
        let _ = writeln!(md, "Successfully validated **{}** plugins.\n", valid);
    } else {
        let _ = writeln!(md, "### ❌ Validation Failed\n");
        let _ = writeln!(
            md,
            "Found **{}** error(s) in {} plugins.\n",
            report.errors().len(),
            validation.plugins.len()
        );
        let _ = writeln!(md, "#### Errors\n");
        let _ = writeln!(md, "| Plugin | Error |");
        let _ = writeln!(md, "|--------|-------|");
        for error in report.errors() {
            let rendered = error.to_string();
            let (plugin, message) = split_plugin(&rendered);
            let _ = writeln!(md, "| `{}` | {} |", plugin, message);
        }
        md.push('\n');
    }

    if !report.warnings().is_empty() {
        let _ = writeln!(md, "#### ⚠️ Warnings\n");
        for warning in report.warnings() {
            let _ = writeln!(md, "- {}", warning);
        }
        md.push('\n');
    }

    let _ = writeln!(md, "---");
    md
}

/// Renders the marketplace sync section
pub fn sync_summary(report: &ValidationReport, doc_files: &[String]) -> String {
    let mut md = String::new();

    let _ = writeln!(md, "## 📚 Marketplace Sync Validation\n");

    if !report.has_errors() {
        let _ = writeln!(md, "### ✅ Marketplace Documentation In Sync!\n");
        if report.warnings().is_empty() {
            let _ = writeln!(
                md,
                "All marketplace documentation files are properly synchronized with plugin changes.\n"
            );
        } else {
            let _ = writeln!(
                md,
                "Marketplace files are in sync, but there are some warnings to review.\n"
            );
        }
    } else {
        let _ = writeln!(md, "### ❌ Sync Check Failed\n");
        let _ = writeln!(
            md,
            "**Action Required:** Update marketplace documentation when adding or modifying plugins.\n"
        );
        let _ = writeln!(md, "#### Errors\n");
        for error in report.errors() {
            let _ = writeln!(md, "- ❌ {}", error);
        }
        md.push('\n');
    }

    let warnings = report.warnings();
    if !warnings.is_empty() {
        let _ = writeln!(md, "#### ⚠️ Warnings\n");
        for warning in warnings.iter().take(MAX_SYNC_WARNINGS) {
            let _ = writeln!(md, "- {}", warning);
        }
        if warnings.len() > MAX_SYNC_WARNINGS {
            let _ = writeln!(
                md,
                "- ... and {} more warnings",
                warnings.len() - MAX_SYNC_WARNINGS
            );
        }
        md.push('\n');
    }

    let _ = writeln!(md, "#### 📝 How to Fix\n");
    for (idx, doc) in doc_files.iter().enumerate() {
        let hint = if idx == 0 {
            "to include new/modified plugins in the featured sections"
        } else {
            "if it contains a plugin catalog"
        };
        let _ = writeln!(md, "{}. Update `{}` {}", idx + 1, doc, hint);
    }
    let _ = writeln!(
        md,
        "{}. Ensure plugin names match the directory names\n",
        doc_files.len() + 1
    );
    let _ = writeln!(md, "---");
    md
}
