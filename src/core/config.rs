//! SOPS configuration reading.
//!
//! Reads the `unencrypted_suffix` values declared in a store's `.sops.yaml`.
//! Unlike every other loader in warren this one never fails the caller: a
//! missing or malformed file yields [`ConfigUnavailable`], which callers turn
//! into an empty suffix list.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::constants;
use crate::core::types::Suffix;

/// The subset of `.sops.yaml` warren cares about.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SopsConfig {
    /// Suffixes marking files whose values sops leaves unencrypted
    pub unencrypted_suffixes: Vec<Suffix>,
}

/// Why a `.sops.yaml` could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigUnavailable {
    /// No configuration file at the store root
    Missing,
    /// File exists but could not be read or parsed
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    creation_rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    unencrypted_suffix: Option<String>,
}

impl SopsConfig {
    /// Path to the sops configuration under `root`
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(constants::SOPS_CONFIG_FILE)
    }

    /// Load the configuration from the store root.
    pub fn load(root: &Path) -> Result<Self, ConfigUnavailable> {
        let path = Self::config_path(root);
        debug!(path = %path.display(), "loading sops config");

        if !path.is_file() {
            return Err(ConfigUnavailable::Missing);
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ConfigUnavailable::Malformed(e.to_string()))?;
        Self::parse(&contents)
    }

    /// Parse configuration text.
    pub fn parse(contents: &str) -> Result<Self, ConfigUnavailable> {
        let raw: RawConfig = serde_yaml::from_str(contents)
            .map_err(|e| ConfigUnavailable::Malformed(e.to_string()))?;

        let mut unencrypted_suffixes: Vec<Suffix> = Vec::new();
        for suffix in raw
            .creation_rules
            .into_iter()
            .filter_map(|rule| rule.unencrypted_suffix)
        {
            if !suffix.is_empty() && !unencrypted_suffixes.contains(&suffix) {
                unencrypted_suffixes.push(suffix);
            }
        }

        debug!(suffixes = unencrypted_suffixes.len(), "sops config loaded");
        Ok(Self {
            unencrypted_suffixes,
        })
    }

    /// Load the configuration, falling back to no suffixes.
    ///
    /// A malformed file is logged; a missing one is silent.
    pub fn load_or_default(root: &Path) -> Self {
        match Self::load(root) {
            Ok(config) => config,
            Err(ConfigUnavailable::Missing) => Self::default(),
            Err(ConfigUnavailable::Malformed(reason)) => {
                warn!(%reason, "ignoring unreadable sops config");
                Self::default()
            }
        }
    }

    /// Whether `stem` (a file name without extension) ends in a declared suffix.
    pub fn is_unencrypted(&self, stem: &str) -> bool {
        self.unencrypted_suffixes
            .iter()
            .any(|suffix| stem.ends_with(suffix.as_str()))
    }
}
