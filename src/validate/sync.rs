//! Marketplace documentation sync
//!
//! The ground truth is the set of migrated plugins: directories under the
//! plugins root that own a manifest. Documentation gaps are warnings only,
//! since name extraction from prose misses things by construction.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::extract::{is_catalog, NameExtractor};
use crate::domain::{Diagnostic, PluginDirectory, ValidationReport, MANIFEST_FILE};
use crate::storage::fs::{list_subdirs, read_json};
use crate::storage::Marketplace;

/// A plugin directory that owns a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigratedPlugin {
    /// Directory name, compared against documentation
    pub dir_name: String,

    /// Manifest `name`, falling back to the directory name
    pub name: String,

    pub description: String,
    pub version: String,
}

impl MigratedPlugin {
    fn from_dir_name(dir_name: &str) -> Self {
        Self {
            dir_name: dir_name.to_string(),
            name: dir_name.to_string(),
            description: String::new(),
            version: String::new(),
        }
    }
}

/// A documentation file handed to the checker
#[derive(Debug, Clone, Copy)]
pub struct DocText<'a> {
    /// Name used in messages, e.g. `README.md`
    pub label: &'a str,

    /// Repository-relative path used for annotations
    pub path: &'a Path,

    pub content: &'a str,
}

/// How many plugin names one documentation file mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocCoverage {
    pub file: String,
    pub mentioned: usize,
    pub missing: Vec<String>,
}

/// Result of a sync run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOutcome {
    pub report: ValidationReport,
    pub plugins: Vec<MigratedPlugin>,
    pub coverage: Vec<DocCoverage>,
}

/// Collects migrated plugins under `plugins_dir`, sorted by directory name
///
/// Manifest validity is not required; an unreadable manifest still counts
/// and yields a warning.
pub fn migrated_plugins(plugins_dir: &Path, report: &mut ValidationReport) -> Vec<MigratedPlugin> {
    if !plugins_dir.is_dir() {
        return Vec::new();
    }

    let dirs = match list_subdirs(plugins_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            report.warning(Diagnostic::new(format!(
                "Could not read plugins directory {}: {}",
                plugins_dir.display(),
                e
            )));
            return Vec::new();
        }
    };

    dirs.into_iter()
        .map(PluginDirectory::new)
        .filter(PluginDirectory::has_manifest)
        .map(|entry| {
            let dir_name = entry.name();
            match read_json(&entry.manifest_path()) {
                Ok(value) => {
                    let field = |key: &str| value.get(key).and_then(|v| v.as_str());
                    MigratedPlugin {
                        dir_name: dir_name.to_string(),
                        name: field("name").unwrap_or(dir_name).to_string(),
                        description: field("description").unwrap_or_default().to_string(),
                        version: field("version").unwrap_or_default().to_string(),
                    }
                }
                Err(e) => {
                    report.warning(Diagnostic::new(format!(
                        "Could not read {} for {}: {}",
                        MANIFEST_FILE, dir_name, e
                    )));
                    MigratedPlugin::from_dir_name(dir_name)
                }
            }
        })
        .collect()
}

/// Checks documentation against the migrated plugin set
pub struct SyncChecker {
    extractor: NameExtractor,
}

impl SyncChecker {
    pub fn new(extractor: NameExtractor) -> Self {
        Self { extractor }
    }

    /// Compares documentation texts against `plugins`
    ///
    /// `readme` is always checked; `catalog` only when it looks like a
    /// plugin catalog.
    pub fn check_docs(
        &self,
        plugins: &[MigratedPlugin],
        readme: Option<DocText<'_>>,
        catalog: Option<DocText<'_>>,
        report: &mut ValidationReport,
    ) -> Vec<DocCoverage> {
        let mut coverage = Vec::new();

        if let Some(doc) = readme {
            coverage.push(self.check_doc(plugins, doc, report));
        }

        if let Some(doc) = catalog {
            if is_catalog(doc.content) {
                coverage.push(self.check_doc(plugins, doc, report));
            } else {
                tracing::debug!(file = doc.label, "not a catalog, skipping");
            }
        }

        coverage
    }

    fn check_doc(
        &self,
        plugins: &[MigratedPlugin],
        doc: DocText<'_>,
        report: &mut ValidationReport,
    ) -> DocCoverage {
        let documented = self.extractor.extract(doc.content);
        let missing = documented.missing(plugins.iter().map(|p| p.dir_name.as_str()));
        tracing::debug!(
            file = doc.label,
            mentioned = documented.len(),
            missing = missing.len(),
            "checked documentation"
        );

        if !missing.is_empty() {
            report.warning(
                Diagnostic::new(format!(
                    "{} may be missing these plugins: {}",
                    doc.label,
                    missing.join(", ")
                ))
                .at(doc.path),
            );
        }

        DocCoverage {
            file: doc.label.to_string(),
            mentioned: documented.len(),
            missing,
        }
    }

    /// Runs the documentation sync check over a repository
    ///
    /// A documentation file that exists but cannot be read is skipped with a
    /// warning.
    pub fn run(&self, marketplace: &Marketplace) -> SyncOutcome {
        let mut report = ValidationReport::new();
        let plugins = migrated_plugins(&marketplace.plugins_dir(), &mut report);

        if plugins.is_empty() {
            tracing::debug!("no migrated plugins, nothing to sync");
            return SyncOutcome {
                report,
                ..SyncOutcome::default()
            };
        }

        let config = marketplace.config();
        let readme_path = PathBuf::from(&config.readme);
        let catalog_path = PathBuf::from(&config.catalog);

        let readme_text = match marketplace.read_doc(&marketplace.readme_path()) {
            Ok(Some(text)) => Some(text),
            Ok(None) => {
                report.warning(Diagnostic::new(format!("{} not found", config.readme)));
                None
            }
            Err(e) => {
                report.warning(unreadable_doc(&config.readme, &readme_path, &e));
                None
            }
        };
        let catalog_text = match marketplace.read_doc(&marketplace.catalog_path()) {
            Ok(text) => text,
            Err(e) => {
                report.warning(unreadable_doc(&config.catalog, &catalog_path, &e));
                None
            }
        };

        let readme = readme_text.as_deref().map(|content| DocText {
            label: &config.readme,
            path: &readme_path,
            content,
        });
        let catalog = catalog_text.as_deref().map(|content| DocText {
            label: &config.catalog,
            path: &catalog_path,
            content,
        });

        let coverage = self.check_docs(&plugins, readme, catalog, &mut report);

        SyncOutcome {
            report,
            plugins,
            coverage,
        }
    }
}

fn unreadable_doc(label: &str, path: &Path, error: &io::Error) -> Diagnostic {
    Diagnostic::new(format!("Could not read {}: {}", label, error)).at(path)
}
