//! # Validators
//!
//! The two analyzers are independent and stateless; each consumes a
//! read-only view of the repository and produces a
//! [`ValidationReport`](crate::domain::ValidationReport).
//!
//! | Analyzer | Input | Errors | Warnings |
//! |----------|-------|--------|----------|
//! | [`SchemaValidator`] | plugins root | schema violations, malformed JSON | empty optional dirs, missing `SKILL.md` |
//! | [`SyncChecker`] | plugins root + docs | - | plugins missing from docs |
//! | [`check_changes`] | changed-file list | plugin change without doc change | - |

mod diff;
mod extract;
mod schema;
mod sync;

pub use diff::{
    check_changes, parse_name_only, undocumented_change_message, ChangeSource, ChangedFiles,
    DiffError, GitDiff,
};
pub use extract::{
    default_matchers, is_catalog, AtSuffixMatcher, BoldListMatcher, DocumentedPlugins,
    InstallCommandMatcher, NameExtractor, NameMatcher,
};
pub use schema::{PluginSummary, SchemaValidation, SchemaValidator};
pub use sync::{migrated_plugins, DocCoverage, DocText, MigratedPlugin, SyncChecker, SyncOutcome};
