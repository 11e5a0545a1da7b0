//! Plugin schema validation
//!
//! Walks the plugins root in name order and checks every plugin directory:
//! the manifest first, then each optional substructure present on disk.
//! Every problem is collected; a broken plugin never stops the walk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    validate_manifest, Diagnostic, PluginDirectory, ValidationReport, MANIFEST_FILE,
    MANIFEST_PATH, MCP_FILE, SKILL_DESCRIPTOR,
};
use crate::storage::fs::{
    files_with_extension, find_key_line, list_subdirs, read_json, read_json_with_source,
    relative_to,
};
use crate::storage::Marketplace;

/// What the validator saw for one plugin directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginSummary {
    pub name: String,

    /// True if the plugin produced no errors
    pub valid: bool,

    pub has_manifest: bool,

    /// Optional directories and files present, in schema order
    pub present: Vec<&'static str>,
}

/// Result of a schema validation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaValidation {
    pub report: ValidationReport,

    /// Plugins that produced zero errors (warnings allowed)
    pub valid_plugins: BTreeSet<String>,

    /// Per-plugin summaries, in traversal order
    pub plugins: Vec<PluginSummary>,
}

impl SchemaValidation {
    /// True if no plugin produced an error
    pub fn passed(&self) -> bool {
        !self.report.has_errors()
    }
}

/// Validates every plugin under a plugins root
pub struct SchemaValidator {
    plugins_dir: PathBuf,
    repo_root: PathBuf,
}

impl SchemaValidator {
    /// `repo_root` is only used to shorten paths in diagnostics
    pub fn new(plugins_dir: impl Into<PathBuf>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            repo_root: repo_root.into(),
        }
    }

    pub fn for_marketplace(marketplace: &Marketplace) -> Self {
        Self::new(marketplace.plugins_dir(), marketplace.root())
    }

    fn rel(&self, path: &Path) -> PathBuf {
        relative_to(path, &self.repo_root)
    }

    /// Validates all plugin directories
    pub fn validate(&self) -> SchemaValidation {
        let mut result = SchemaValidation::default();

        if !self.plugins_dir.is_dir() {
            result.report.error(Diagnostic::new(format!(
                "Plugins directory not found: {}",
                self.plugins_dir.display()
            )));
            return result;
        }

        let dirs = match list_subdirs(&self.plugins_dir) {
            Ok(dirs) => dirs,
            Err(e) => {
                result.report.error(Diagnostic::new(format!(
                    "Failed to read plugins directory {}: {}",
                    self.plugins_dir.display(),
                    e
                )));
                return result;
            }
        };

        if dirs.is_empty() {
            result
                .report
                .warning(Diagnostic::new("No plugin directories found"));
            return result;
        }

        tracing::debug!(count = dirs.len(), "validating plugins");

        for dir in dirs {
            let entry = PluginDirectory::new(dir);
            let summary = self.validate_plugin(&entry, &mut result.report);
            if summary.valid {
                result.valid_plugins.insert(summary.name.clone());
            }
            result.plugins.push(summary);
        }

        result
    }

    /// Validates one plugin directory, appending findings to `report`
    pub fn validate_plugin(
        &self,
        entry: &PluginDirectory,
        report: &mut ValidationReport,
    ) -> PluginSummary {
        let name = entry.name();
        let errors_before = report.error_count();
        tracing::debug!(plugin = name, "validating plugin");

        if !entry.has_manifest() {
            report.error(
                Diagnostic::for_plugin(
                    name,
                    format!("Missing required file: {} (Plugin manifest file)", MANIFEST_PATH),
                )
                .at(self.rel(entry.path())),
            );
            return PluginSummary {
                name: name.to_string(),
                valid: false,
                has_manifest: false,
                present: Vec::new(),
            };
        }

        self.check_manifest(entry, report);

        let dirs = entry.present_dirs();
        for dir in &dirs {
            let path = entry.join(dir);
            match *dir {
                "commands" | "agents" => self.check_markdown_dir(name, dir, &path, report),
                "hooks" => self.check_hooks_dir(name, &path, report),
                "skills" => self.check_skills_dir(name, &path, report),
                _ => {}
            }
        }

        let files = entry.present_files();
        if files.contains(&MCP_FILE) {
            self.check_mcp_file(name, &entry.join(MCP_FILE), report);
        }

        PluginSummary {
            name: name.to_string(),
            valid: report.error_count() == errors_before,
            has_manifest: true,
            present: dirs.into_iter().chain(files).collect(),
        }
    }

    fn check_manifest(&self, entry: &PluginDirectory, report: &mut ValidationReport) {
        let name = entry.name();
        let path = entry.manifest_path();
        let file = self.rel(&path);

        let (value, source) = match read_json_with_source(&path) {
            Ok(parsed) => parsed,
            Err(e) if e.is_parse() => {
                report.error(
                    Diagnostic::for_plugin(name, format!("Invalid JSON in {}: {}", MANIFEST_FILE, e))
                        .at(&file)
                        .line(e.line().or(Some(1))),
                );
                return;
            }
            Err(e) => {
                report.error(
                    Diagnostic::for_plugin(name, format!("Error reading {}: {}", MANIFEST_FILE, e))
                        .at(&file),
                );
                return;
            }
        };

        let Some(manifest) = value.as_object() else {
            report.error(
                Diagnostic::for_plugin(name, format!("{} must be a JSON object", MANIFEST_FILE))
                    .at(&file)
                    .line(Some(1)),
            );
            return;
        };

        for violation in validate_manifest(manifest) {
            report.error(
                Diagnostic::for_plugin(name, format!("{} {}", MANIFEST_FILE, violation.message))
                    .at(&file)
                    .line(find_key_line(&source, &violation.field)),
            );
        }
    }

    fn check_markdown_dir(
        &self,
        plugin: &str,
        dir_name: &str,
        path: &Path,
        report: &mut ValidationReport,
    ) {
        match files_with_extension(path, "md") {
            Ok(files) if files.is_empty() => report.warning(
                Diagnostic::for_plugin(
                    plugin,
                    format!("{}/ directory exists but contains no .md files", dir_name),
                )
                .at(self.rel(path)),
            ),
            Ok(_) => {}
            Err(e) => report.warning(
                Diagnostic::for_plugin(plugin, format!("Could not read {}/: {}", dir_name, e))
                    .at(self.rel(path)),
            ),
        }
    }

    fn check_hooks_dir(&self, plugin: &str, path: &Path, report: &mut ValidationReport) {
        let files = match files_with_extension(path, "json") {
            Ok(files) => files,
            Err(e) => {
                report.warning(
                    Diagnostic::for_plugin(plugin, format!("Could not read hooks/: {}", e))
                        .at(self.rel(path)),
                );
                return;
            }
        };

        if files.is_empty() {
            report.warning(
                Diagnostic::for_plugin(plugin, "hooks/ directory exists but contains no .json files")
                    .at(self.rel(path)),
            );
            return;
        }

        for file in files {
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match read_json(&file) {
                Ok(_) => {}
                Err(e) if e.is_parse() => report.error(
                    Diagnostic::for_plugin(plugin, format!("Invalid JSON in {}: {}", file_name, e))
                        .at(self.rel(&file))
                        .line(e.line()),
                ),
                Err(e) => report.warning(
                    Diagnostic::for_plugin(plugin, format!("Error reading {}: {}", file_name, e))
                        .at(self.rel(&file)),
                ),
            }
        }
    }

    fn check_skills_dir(&self, plugin: &str, path: &Path, report: &mut ValidationReport) {
        let skills = match list_subdirs(path) {
            Ok(skills) => skills,
            Err(e) => {
                report.warning(
                    Diagnostic::for_plugin(plugin, format!("Could not read skills/: {}", e))
                        .at(self.rel(path)),
                );
                return;
            }
        };

        if skills.is_empty() {
            report.warning(
                Diagnostic::for_plugin(
                    plugin,
                    "skills/ directory exists but contains no skill directories",
                )
                .at(self.rel(path)),
            );
            return;
        }

        for skill in skills {
            if !skill.join(SKILL_DESCRIPTOR).is_file() {
                let skill_name = skill
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                report.warning(
                    Diagnostic::for_plugin(
                        plugin,
                        format!(
                            "Skill directory '{}' missing {}",
                            skill_name, SKILL_DESCRIPTOR
                        ),
                    )
                    .at(self.rel(&skill)),
                );
            }
        }
    }

    fn check_mcp_file(&self, plugin: &str, path: &Path, report: &mut ValidationReport) {
        match read_json(path) {
            Ok(_) => {}
            Err(e) if e.is_parse() => report.error(
                Diagnostic::for_plugin(plugin, format!("Invalid JSON in {}: {}", MCP_FILE, e))
                    .at(self.rel(path))
                    .line(e.line()),
            ),
            Err(e) => report.warning(
                Diagnostic::for_plugin(plugin, format!("Error reading {}: {}", MCP_FILE, e))
                    .at(self.rel(path)),
            ),
        }
    }
}
