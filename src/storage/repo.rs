//! Marketplace repository handle
//!
//! Resolves the plugins root and documentation files from the repository
//! root and its configuration. Never writes to the repository.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use super::Config;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Repository root not found: {0}")]
    RootNotFound(PathBuf),
}

/// A plugin marketplace repository
#[derive(Debug, Clone)]
pub struct Marketplace {
    root: PathBuf,
    config: Config,
}

impl Marketplace {
    /// Opens the repository at `root`, loading its configuration
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(RepositoryError::RootNotFound(root).into());
        }

        let config = Config::for_repository(&root)?;

        Ok(Self { root, config })
    }

    /// Creates a handle with an explicit configuration
    pub fn with_config(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Absolute plugins root
    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(&self.config.plugins_dir)
    }

    /// Primary documentation file
    pub fn readme_path(&self) -> PathBuf {
        self.root.join(&self.config.readme)
    }

    /// Secondary (catalog) documentation file
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.config.catalog)
    }

    /// Documentation files as repository-relative paths, as they appear in
    /// a changed-files list
    pub fn doc_files(&self) -> Vec<String> {
        vec![self.config.readme.clone(), self.config.catalog.clone()]
    }

    /// Prefix every changed path under the plugins root starts with
    pub fn plugins_prefix(&self) -> String {
        format!("{}/", self.config.plugins_dir.trim_end_matches('/'))
    }

    /// Reads a documentation file, `None` if it does not exist
    pub fn read_doc(&self, path: &Path) -> io::Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(path).map(Some)
    }
}
