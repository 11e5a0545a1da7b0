//! Marketplace lint - validation for Claude Code plugin marketplace repositories
//!
//! Two analyzers run over a repository checkout: a schema validator that
//! checks every plugin directory under the plugins root, and a sync checker
//! that compares the plugin set against the marketplace documentation.
//! Both produce a [`ValidationReport`]; errors fail the run, warnings never do.

pub mod cli;
pub mod domain;
pub mod storage;
pub mod validate;

pub use domain::{Diagnostic, Severity, ValidationReport};
pub use storage::{Config, Marketplace};
pub use validate::{SchemaValidator, SyncChecker};
