//! Marketplace sync command

use std::path::Path;

use anyhow::Result;
use clap::Args;

use super::output::Output;
use super::summary;
use crate::storage::Marketplace;
use crate::validate::{
    check_changes, ChangeSource, ChangedFiles, GitDiff, NameExtractor, SyncChecker, SyncOutcome,
};

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Also require documentation changes when plugin files change
    #[arg(long, conflicts_with = "no_diff")]
    pub diff: bool,

    /// Skip the changed-files check, even under GitHub Actions
    #[arg(long)]
    pub no_diff: bool,

    /// Base ref to diff against (defaults to the configured base_ref)
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,

    /// Changed file, relative to the root; replaces asking git
    #[arg(long = "changed-file", value_name = "PATH")]
    pub changed_files: Vec<String>,
}

impl SyncArgs {
    /// Whether the changed-files check runs
    pub fn diff_enabled(&self, github_actions: bool) -> bool {
        if self.diff {
            return true;
        }
        !self.no_diff && (github_actions || !self.changed_files.is_empty())
    }
}

/// Runs the documentation check, then the changed-files check when enabled
pub fn evaluate(marketplace: &Marketplace, args: &SyncArgs, github_actions: bool) -> SyncOutcome {
    let config = marketplace.config();
    let checker = SyncChecker::new(NameExtractor::new(config.denylist()));
    let mut outcome = checker.run(marketplace);

    if args.diff_enabled(github_actions) {
        let source: Box<dyn ChangeSource> = if args.changed_files.is_empty() {
            let base = args.base.clone().unwrap_or_else(|| config.base_ref.clone());
            tracing::debug!(base = %base, "checking changed files with git");
            Box::new(GitDiff::new(marketplace.root(), base))
        } else {
            Box::new(ChangedFiles(args.changed_files.clone()))
        };
        let diff_report = check_changes(
            source.as_ref(),
            &marketplace.plugins_prefix(),
            &marketplace.doc_files(),
        );
        outcome.report.extend(diff_report);
    }

    outcome
}

pub(super) fn to_json(outcome: &SyncOutcome) -> serde_json::Value {
    serde_json::json!({
        "command": "sync",
        "passed": !outcome.report.has_errors(),
        "plugins": outcome.plugins,
        "coverage": outcome.coverage,
        "errors": outcome.report.errors(),
        "warnings": outcome.report.warnings(),
    })
}

pub(super) fn print_text(output: &Output, outcome: &SyncOutcome) {
    if !outcome.plugins.is_empty() {
        output.line(&format!(
            "Found {} plugin(s) with plugin.json:",
            outcome.plugins.len()
        ));
        for plugin in &outcome.plugins {
            if plugin.version.is_empty() {
                output.line(&format!("  - {}", plugin.dir_name));
            } else {
                output.line(&format!("  - {} ({})", plugin.dir_name, plugin.version));
            }
        }
        output.blank();
    }

    for coverage in &outcome.coverage {
        output.line(&format!(
            "Plugins mentioned in {}: {}",
            coverage.file, coverage.mentioned
        ));
    }

    output.banner("MARKETPLACE SYNC SUMMARY");
    output.findings(&outcome.report, "✅ Marketplace appears to be in sync!");
}

/// Runs the sync command; returns true if no errors were found
pub fn run(
    marketplace: &Marketplace,
    args: &SyncArgs,
    output: &Output,
    github_actions: bool,
    step_summary: Option<&Path>,
) -> Result<bool> {
    let outcome = evaluate(marketplace, args, github_actions);

    if output.is_json() {
        output.data(&to_json(&outcome));
    } else {
        print_text(output, &outcome);
    }

    output.annotate(&outcome.report);
    summary::append_or_log(
        step_summary,
        &summary::sync_summary(&outcome.report, &marketplace.doc_files()),
    );

    Ok(!outcome.report.has_errors())
}
