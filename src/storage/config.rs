//! Configuration handling for marketplace-lint
//!
//! Configuration is read from `marketplace-lint.toml` at the repository
//! root. The file is optional; every key has a default matching the usual
//! marketplace layout.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration file name, looked up at the repository root
pub const CONFIG_FILE: &str = "marketplace-lint.toml";

/// Tokens that look like plugin names in documentation but never are
pub const DEFAULT_DENYLIST: &[&str] = &[
    "claude-code-marketplace",
    "marketplace",
    "your-org",
    "test",
    "my-first-plugin",
    "my-plugin",
    "dev-marketplace",
    "plugin-name",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Repository-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Plugins root, relative to the repository root
    pub plugins_dir: String,

    /// Primary documentation file
    pub readme: String,

    /// Secondary documentation file, checked only when it looks like a catalog
    pub catalog: String,

    /// Base reference for the changed-files comparison
    pub base_ref: String,

    /// Replaces the built-in false-positive denylist when set
    pub denylist: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugins_dir: "plugins".to_string(),
            readme: "README.md".to_string(),
            catalog: "plugins.md".to_string(),
            base_ref: "origin/main".to_string(),
            denylist: None,
        }
    }
}

impl Config {
    /// Loads configuration for a repository, falling back to defaults
    pub fn for_repository(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses and checks configuration text
    ///
    /// Paths lose any leading `./` so they compare equal to git's
    /// repository-relative paths.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.normalize();
        config.check()?;
        Ok(config)
    }

    fn normalize(&mut self) {
        for path in [&mut self.plugins_dir, &mut self.readme, &mut self.catalog] {
            let trimmed = path.trim_start_matches("./").to_string();
            *path = trimmed;
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("plugins_dir", &self.plugins_dir),
            ("readme", &self.readme),
            ("catalog", &self.catalog),
            ("base_ref", &self.base_ref),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("'{}' must not be empty", key)));
            }
        }

        if Path::new(&self.plugins_dir).is_absolute() {
            return Err(ConfigError::Invalid(
                "'plugins_dir' must be relative to the repository root".to_string(),
            ));
        }

        Ok(())
    }

    /// The effective false-positive denylist
    pub fn denylist(&self) -> BTreeSet<String> {
        match &self.denylist {
            Some(list) => list.iter().cloned().collect(),
            None => DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.plugins_dir, "plugins");
        assert_eq!(config.readme, "README.md");
        assert_eq!(config.catalog, "plugins.md");
        assert_eq!(config.base_ref, "origin/main");
        assert!(config.denylist().contains("your-org"));
        assert_eq!(config.denylist().len(), DEFAULT_DENYLIST.len());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
plugins_dir = "extensions"
denylist = ["example"]
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.plugins_dir, "extensions");
        assert_eq!(config.readme, "README.md");
        assert_eq!(
            config.denylist(),
            BTreeSet::from(["example".to_string()])
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::parse("plugin_dir = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_values_are_invalid() {
        let err = Config::parse("readme = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn leading_dot_slash_is_stripped() {
        let toml = "plugins_dir = \"./plugins\"\nreadme = \"./README.md\"\ncatalog = \"././docs/plugins.md\"\n";
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.plugins_dir, "plugins");
        assert_eq!(config.readme, "README.md");
        assert_eq!(config.catalog, "docs/plugins.md");

        let err = Config::parse("plugins_dir = \"./\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_repository(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "plugins_dir = [").unwrap();
        assert!(Config::for_repository(dir.path()).is_err());
    }
}
