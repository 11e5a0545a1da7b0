//! Schema validation command

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use super::summary;
use crate::domain::{MANIFEST_PATH, OPTIONAL_DIRS, OPTIONAL_FILES};
use crate::storage::Marketplace;
use crate::validate::{PluginSummary, SchemaValidation, SchemaValidator};

/// Runs schema validation; returns true if no errors were found
pub fn run(
    marketplace: &Marketplace,
    output: &Output,
    step_summary: Option<&Path>,
) -> Result<bool> {
    let validation = SchemaValidator::for_marketplace(marketplace).validate();

    if output.is_json() {
        output.data(&to_json(&validation));
    } else {
        print_text(output, &validation);
    }

    output.annotate(&validation.report);
    summary::append_or_log(step_summary, &summary::schema_summary(&validation));

    Ok(validation.passed())
}

pub(super) fn to_json(validation: &SchemaValidation) -> serde_json::Value {
    serde_json::json!({
        "command": "schema",
        "passed": validation.passed(),
        "valid_plugins": validation.valid_plugins,
        "plugins": validation.plugins,
        "errors": validation.report.errors(),
        "warnings": validation.report.warnings(),
    })
}

fn describe(name: &str) -> &'static str {
    OPTIONAL_DIRS
        .iter()
        .chain(OPTIONAL_FILES.iter())
        .find(|(n, _)| *n == name)
        .map(|(_, d)| *d)
        .unwrap_or("")
}

fn print_plugin(output: &Output, plugin: &PluginSummary) {
    output.line(&format!("Validating plugin: {}", plugin.name));
    output.line(&"-".repeat(60));

    if plugin.has_manifest {
        output.line(&format!("  ✓ {}", MANIFEST_PATH));
    }
    for part in &plugin.present {
        let suffix = if OPTIONAL_DIRS.iter().any(|(n, _)| n == part) {
            "/"
        } else {
            ""
        };
        output.line(&format!("  ✓ {}{} ({})", part, suffix, describe(part)));
    }

    if plugin.valid {
        output.line(&format!("  ✅ Plugin '{}' is valid", plugin.name));
    } else {
        output.line(&format!("  ❌ Plugin '{}' has validation errors", plugin.name));
    }
    output.blank();
}

pub(super) fn print_text(output: &Output, validation: &SchemaValidation) {
    if !validation.plugins.is_empty() {
        output.line(&format!(
            "Found {} plugin(s) to validate",
            validation.plugins.len()
        ));
        output.blank();
    }

    for plugin in &validation.plugins {
        print_plugin(output, plugin);
    }

    output.banner("VALIDATION SUMMARY");
    output.line(&format!(
        "Validated plugins: {}",
        validation.valid_plugins.len()
    ));
    output.findings(&validation.report, "✅ All plugins are valid!");
}
