//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::sync_cmd::SyncArgs;
use super::{check_cmd, logging, schema_cmd, sync_cmd};
use crate::storage::Marketplace;

#[derive(Parser)]
#[command(name = "marketplace-lint")]
#[command(author, version, about = "Validate a Claude Code plugin marketplace repository")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository root
    #[arg(long, global = true, env = "MARKETPLACE_LINT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit GitHub Actions annotations and job summary
    #[arg(
        long,
        global = true,
        env = "GITHUB_ACTIONS",
        value_parser = FalseyValueParser::new()
    )]
    pub github_actions: bool,

    /// Job summary file, appended to under GitHub Actions
    #[arg(long, global = true, env = "GITHUB_STEP_SUMMARY", hide = true)]
    pub step_summary: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate every plugin directory against the plugin schema
    Schema,

    /// Check that marketplace documentation lists every plugin
    Sync(SyncArgs),

    /// Run schema validation and the sync check
    Check(SyncArgs),
}

/// Main entry point for the CLI; returns false if any error was reported
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let output = Output::new(cli.format, cli.github_actions);
    let step_summary = cli
        .step_summary
        .as_deref()
        .filter(|_| cli.github_actions);

    tracing::debug!(root = %cli.root.display(), "opening marketplace");
    let marketplace = Marketplace::open(cli.root.clone())?;

    match &cli.command {
        Commands::Schema => schema_cmd::run(&marketplace, &output, step_summary),
        Commands::Sync(args) => {
            sync_cmd::run(&marketplace, args, &output, cli.github_actions, step_summary)
        }
        Commands::Check(args) => {
            check_cmd::run(&marketplace, args, &output, cli.github_actions, step_summary)
        }
    }
}
