//! # Storage Layer
//!
//! Read-only access to a plugin marketplace repository.
//!
//! ## Repository Layout
//!
//! ```text
//! <root>/
//! ├── marketplace-lint.toml     # Optional configuration
//! ├── README.md                 # Primary documentation
//! ├── plugins.md                # Optional plugin catalog
//! └── plugins/
//!     └── <plugin>/
//!         ├── .claude-plugin/
//!         │   └── plugin.json   # Required manifest
//!         ├── commands/         # *.md
//!         ├── agents/           # *.md
//!         ├── skills/<skill>/SKILL.md
//!         ├── hooks/            # *.json
//!         ├── scripts/
//!         └── .mcp.json
//! ```
//!
//! ## Key Types
//!
//! - [`Marketplace`] - Entry point for accessing a repository
//! - [`Config`] - Repository configuration

mod config;
pub mod fs;
mod repo;

pub use config::{Config, ConfigError, CONFIG_FILE, DEFAULT_DENYLIST};
pub use fs::JsonFileError;
pub use repo::{Marketplace, RepositoryError};
