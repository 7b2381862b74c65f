//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! buildstamp has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Per-checkout overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$BUILDSTAMP_CONFIG` if set
//! 2. `<config dir>/buildstamp/config.toml` (e.g. `~/.config` on Linux)
//!
//! # Repo Config Location
//!
//! `.buildstamp.toml` in the collected directory.
//!
//! # Example
//!
//! ```no_run
//! use buildstamp::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Path::new(".")).unwrap();
//! println!("Format: {}", config.format());
//! ```

pub mod schema;

pub use schema::StampConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::render::Format;
use crate::core::types::{Directive, DirectiveKey};

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "BUILDSTAMP_CONFIG";

/// File name of the per-checkout config.
pub const REPO_CONFIG_FILE: &str = ".buildstamp.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global and repo settings with precedence applied
    pub merged: StampConfig,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration for a directory from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        Self::load_from(global.as_deref(), dir)
    }

    /// Load configuration with an explicit global config file.
    ///
    /// A `global_path` that does not exist is skipped.
    pub fn load_from(global_path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        let (global, global_path) = match global_path.filter(|p| p.exists()) {
            Some(path) => (Self::read_config(path)?, Some(path.to_path_buf())),
            None => (StampConfig::default(), None),
        };

        let candidate = dir.join(REPO_CONFIG_FILE);
        let (repo, repo_path) = if candidate.exists() {
            (Self::read_config(&candidate)?, Some(candidate))
        } else {
            (StampConfig::default(), None)
        };

        global.validate()?;
        repo.validate()?;

        Ok(Config {
            merged: global.merged_with(repo),
            global_path,
            repo_path,
        })
    }

    /// Locate the global config file.
    ///
    /// Returns `$BUILDSTAMP_CONFIG` if set, else the platform config
    /// directory location. The file may not exist.
    pub fn global_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir().map(|dir| dir.join("buildstamp/config.toml"))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<StampConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the configured symbol prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.merged.prefix.as_deref()
    }

    /// Get the configured version override, if any.
    pub fn version(&self) -> Option<&str> {
        self.merged.version.as_deref()
    }

    /// Get the output format.
    ///
    /// Defaults to [`Format::LdFlags`] if not configured.
    pub fn format(&self) -> Format {
        self.merged.format.unwrap_or_default()
    }

    /// Configured values as directives, to be placed before CLI directives.
    pub fn directives(&self) -> Vec<Directive> {
        let mut directives = Vec::new();
        if let Some(prefix) = self.prefix() {
            directives.push(Directive::new(DirectiveKey::Prefix, prefix));
        }
        if let Some(version) = self.version() {
            directives.push(Directive::new(DirectiveKey::Version, version));
        }
        directives
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}
