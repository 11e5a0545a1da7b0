//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `schema` | Validate every plugin directory against the plugin schema |
//! | `sync` | Check README and catalog coverage, plus the changed-files rule |
//! | `check` | Both of the above, one exit status |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## GitHub Actions
//!
//! With `--github-actions` (or `GITHUB_ACTIONS=true`) findings are also
//! printed as workflow annotations and a markdown section is appended to
//! `GITHUB_STEP_SUMMARY`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod check_cmd;
mod logging;
mod output;
mod schema_cmd;
mod summary;
mod sync_cmd;

pub use app::{run, Cli, Commands};
pub use output::{annotation, Output, OutputFormat};
pub use sync_cmd::SyncArgs;
