//! Combined schema + sync command

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use super::sync_cmd::{self, SyncArgs};
use super::{schema_cmd, summary};
use crate::domain::ValidationReport;
use crate::storage::Marketplace;
use crate::validate::SchemaValidator;

/// Runs both analyzers; returns true if neither found an error
pub fn run(
    marketplace: &Marketplace,
    args: &SyncArgs,
    output: &Output,
    github_actions: bool,
    step_summary: Option<&Path>,
) -> Result<bool> {
    let validation = SchemaValidator::for_marketplace(marketplace).validate();
    let outcome = sync_cmd::evaluate(marketplace, args, github_actions);

    let mut merged = ValidationReport::new();
    merged.extend(validation.report.clone());
    merged.extend(outcome.report.clone());

    if output.is_json() {
        output.data(&serde_json::json!({
            "command": "check",
            "passed": !merged.has_errors(),
            "schema": schema_cmd::to_json(&validation),
            "sync": sync_cmd::to_json(&outcome),
            "errors": merged.errors(),
            "warnings": merged.warnings(),
        }));
    } else {
        schema_cmd::print_text(output, &validation);
        output.blank();
        sync_cmd::print_text(output, &outcome);
    }

    output.annotate(&merged);
    summary::append_or_log(step_summary, &summary::schema_summary(&validation));
    summary::append_or_log(
        step_summary,
        &summary::sync_summary(&outcome.report, &marketplace.doc_files()),
    );

    Ok(!merged.has_errors())
}
