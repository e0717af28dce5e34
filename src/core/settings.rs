//! Store settings.
//!
//! Handles reading and validating the optional `.warren.toml` at a store root.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::index::IndexOptions;
use crate::error::{ConfigError, Result};

/// Settings stored in `.warren.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// How the store's directory tree is indexed
    #[serde(default)]
    pub store: StoreSettings,
    /// External tool invocation
    #[serde(default)]
    pub sops: SopsSettings,
}

/// `[store]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Glob matched against file names
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Descend into subdirectories
    #[serde(default = "default_true")]
    pub recurse: bool,
    /// Only index files that carry sops metadata
    #[serde(default)]
    pub require_encryption: bool,
}

/// `[sops]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SopsSettings {
    /// Binary name or path
    #[serde(default = "default_binary")]
    pub binary: String,
}

fn default_pattern() -> String {
    constants::DEFAULT_PATTERN.to_string()
}

fn default_binary() -> String {
    constants::DEFAULT_SOPS_BINARY.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            recurse: true,
            require_encryption: false,
        }
    }
}

impl Default for SopsSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
        }
    }
}

impl Settings {
    /// Path to the settings file under `root`
    pub fn settings_path(root: &Path) -> PathBuf {
        root.join(constants::SETTINGS_FILE)
    }

    /// Load settings from `root`, or defaults if there is no settings file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed, or
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::settings_path(root);
        debug!(path = %path.display(), "loading settings");

        if !path.exists() {
            debug!("no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;

        settings.validate()?;

        debug!(
            pattern = %settings.store.pattern,
            recurse = settings.store.recurse,
            require_encryption = settings.store.require_encryption,
            "settings loaded"
        );
        Ok(settings)
    }

    /// Validate the settings values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.store.pattern.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.pattern",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if let Err(e) = glob::Pattern::new(&self.store.pattern) {
            return Err(ConfigError::InvalidValue {
                field: "store.pattern",
                reason: e.to_string(),
            }
            .into());
        }
        if self.sops.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "sops.binary",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Index options derived from the `[store]` section
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            pattern: self.store.pattern.clone(),
            recurse: self.store.recurse,
            require_encryption: self.store.require_encryption,
        }
    }
}
