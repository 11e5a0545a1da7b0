//! Plugin directory layout
//!
//! A plugin is a directory under the plugins root, identified by its
//! directory name. The only required file is the manifest at
//! `.claude-plugin/plugin.json`; everything else is optional.

use std::path::{Path, PathBuf};

/// Manifest location relative to the plugin directory
pub const MANIFEST_PATH: &str = ".claude-plugin/plugin.json";

/// Manifest file name, used in messages
pub const MANIFEST_FILE: &str = "plugin.json";

/// Descriptor every skill directory should contain
pub const SKILL_DESCRIPTOR: &str = "SKILL.md";

/// MCP server definitions file
pub const MCP_FILE: &str = ".mcp.json";

/// Optional substructure directories and what they hold
pub const OPTIONAL_DIRS: &[(&str, &str)] = &[
    ("commands", "Command definitions"),
    ("agents", "Agent definitions"),
    ("skills", "Agent skills"),
    ("hooks", "Hook configurations"),
    ("scripts", "Scripts and utilities"),
];

/// Optional top-level files and what they hold
pub const OPTIONAL_FILES: &[(&str, &str)] = &[
    (MCP_FILE, "MCP server definitions"),
    ("LICENSE", "License file"),
    ("CHANGELOG.md", "Version history"),
    ("README.md", "Documentation"),
];

/// A directory under the plugins root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDirectory {
    name: String,
    path: PathBuf,
}

impl PluginDirectory {
    /// Creates an entry from a directory path; the name is the last component
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Directory name, the plugin's identity
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_PATH)
    }

    /// Returns true if the manifest file exists ("migrated" plugin)
    pub fn has_manifest(&self) -> bool {
        self.manifest_path().is_file()
    }

    /// Path of an optional subdirectory or file
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Names of optional directories present on disk, in schema order
    pub fn present_dirs(&self) -> Vec<&'static str> {
        OPTIONAL_DIRS
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| self.join(name).is_dir())
            .collect()
    }

    /// Names of optional top-level files present on disk, in schema order
    pub fn present_files(&self) -> Vec<&'static str> {
        OPTIONAL_FILES
            .iter()
            .map(|(name, _)| *name)
            .filter(|name| self.join(name).is_file())
            .collect()
    }
}
