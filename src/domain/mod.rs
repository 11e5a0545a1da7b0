//! Domain models for marketplace-lint
//!
//! Plugin layout, manifest schema rules and validation reports, without any
//! traversal or reporting concerns.

mod plugin;
mod report;
mod schema;

pub use plugin::{
    PluginDirectory, MANIFEST_FILE, MANIFEST_PATH, MCP_FILE, OPTIONAL_DIRS, OPTIONAL_FILES,
    SKILL_DESCRIPTOR,
};
pub use report::{Diagnostic, Severity, ValidationReport};
pub use schema::{
    validate_manifest, FieldRule, FieldViolation, AUTHOR_OPTIONAL_FIELDS, OPTIONAL_FIELDS,
    REQUIRED_FIELDS,
};
