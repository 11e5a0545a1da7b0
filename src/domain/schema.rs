//! Plugin manifest schema
//!
//! The manifest schema is a table of field name to [`FieldRule`]. Adding a
//! field means adding a row, not a branch. Each rule reports every violation
//! it finds as a separate message; nothing short-circuits.

use serde_json::{Map, Value};

/// Fields every manifest must carry as non-empty strings
pub const REQUIRED_FIELDS: &[&str] = &["name", "version", "description"];

/// Optional manifest fields and the rule each must satisfy when present
pub const OPTIONAL_FIELDS: &[(&str, FieldRule)] = &[
    ("author", FieldRule::Author),
    ("homepage", FieldRule::NonEmptyString),
    ("repository", FieldRule::NonEmptyString),
    ("license", FieldRule::NonEmptyString),
    ("keywords", FieldRule::StringArray),
    ("commands", FieldRule::StringOrStringArray),
    ("agents", FieldRule::NonEmptyString),
    ("hooks", FieldRule::NonEmptyString),
    ("mcpServers", FieldRule::NonEmptyString),
];

/// Optional fields of the `author` object
pub const AUTHOR_OPTIONAL_FIELDS: &[&str] = &["email", "url"];

/// Type constraint for a single manifest field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// A string with at least one character
    NonEmptyString,
    /// An array whose elements are all strings (may be empty)
    StringArray,
    /// A string, or an array of strings
    StringOrStringArray,
    /// An object with a non-empty `name` and optional non-empty `email`/`url`
    Author,
}

/// A rule violation; `field` is the top-level key it was found under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn is_non_empty_string(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

fn all_strings(items: &[Value]) -> bool {
    items.iter().all(Value::is_string)
}

impl FieldRule {
    /// Checks `value` against the rule, returning every violation
    pub fn check(&self, field: &str, value: &Value) -> Vec<FieldViolation> {
        match self {
            FieldRule::NonEmptyString => {
                if is_non_empty_string(value) {
                    vec![]
                } else {
                    vec![FieldViolation::new(
                        field,
                        format!("'{}' must be a non-empty string", field),
                    )]
                }
            }
            FieldRule::StringArray => match value.as_array() {
                None => vec![FieldViolation::new(
                    field,
                    format!("'{}' must be an array", field),
                )],
                Some(items) if !all_strings(items) => vec![FieldViolation::new(
                    field,
                    format!("'{}' must contain only strings", field),
                )],
                Some(_) => vec![],
            },
            FieldRule::StringOrStringArray => match value {
                Value::String(_) => vec![],
                Value::Array(items) if all_strings(items) => vec![],
                Value::Array(_) => vec![FieldViolation::new(
                    field,
                    format!("'{}' array must contain only strings", field),
                )],
                _ => vec![FieldViolation::new(
                    field,
                    format!("'{}' must be a string or array", field),
                )],
            },
            FieldRule::Author => check_author(field, value),
        }
    }
}

fn check_author(field: &str, value: &Value) -> Vec<FieldViolation> {
    let Some(author) = value.as_object() else {
        return vec![FieldViolation::new(
            field,
            format!("'{}' must be an object", field),
        )];
    };

    let mut violations = Vec::new();

    match author.get("name") {
        None => violations.push(FieldViolation::new(
            field,
            format!("'{}' must have a 'name' field", field),
        )),
        Some(name) if !is_non_empty_string(name) => violations.push(FieldViolation::new(
            field,
            format!("'{}.name' must be a non-empty string", field),
        )),
        Some(_) => {}
    }

    for key in AUTHOR_OPTIONAL_FIELDS {
        if let Some(v) = author.get(*key) {
            if !is_non_empty_string(v) {
                violations.push(FieldViolation::new(
                    field,
                    format!("'{}.{}' must be a non-empty string", field, key),
                ));
            }
        }
    }

    violations
}

/// Validates a parsed manifest object against the whole schema
///
/// Required fields are checked first, in declaration order, then optional
/// fields in table order.
pub fn validate_manifest(manifest: &Map<String, Value>) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    for field in REQUIRED_FIELDS {
        match manifest.get(*field) {
            None => violations.push(FieldViolation::new(
                field,
                format!("missing required field '{}'", field),
            )),
            Some(value) => violations.extend(FieldRule::NonEmptyString.check(field, value)),
        }
    }

    for (field, rule) in OPTIONAL_FIELDS {
        if let Some(value) = manifest.get(*field) {
            violations.extend(rule.check(field, value));
        }
    }

    violations
}
