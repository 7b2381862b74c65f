//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and the per-checkout
//! `.buildstamp.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., `prefix` must be a valid
//! symbol prefix).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::render::Format;
use crate::core::types::SymbolPrefix;

/// Stamp configuration.
///
/// # Example
///
/// ```toml
/// prefix = "github.com/acme/tool/version"
/// version = "1.4.0"
/// format = "cargo"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Symbol prefix for injected keys
    pub prefix: Option<String>,

    /// Version override; when set the `VERSION` file is not read
    pub version: Option<String>,

    /// Default output format
    pub format: Option<Format>,
}

impl StampConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.prefix {
            SymbolPrefix::new(prefix.as_str())
                .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        }

        if let Some(version) = &self.version {
            if version.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "version cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merged_with(self, other: StampConfig) -> StampConfig {
        StampConfig {
            prefix: other.prefix.or(self.prefix),
            version: other.version.or(self.version),
            format: other.format.or(self.format),
        }
    }
}
