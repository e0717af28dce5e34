//! The primary interface for warren operations.
//!
//! A [`Vault`] is a directory of sops-encrypted files plus the tool used to
//! read and write them. Nothing is cached: every operation re-reads the
//! directory tree and the sops configuration.

mod secrets;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::config::SopsConfig;
use crate::core::constants;
use crate::core::domain::SecretEntry;
use crate::core::index::{self, SecretIndex};
use crate::core::resolve::{self, Resolution};
use crate::core::settings::Settings;
use crate::core::sops::{Sops, Tool};
use crate::error::{Result, StoreError};

/// A secret store rooted at a directory.
pub struct Vault<T: Tool = Sops> {
    root: PathBuf,
    settings: Settings,
    tool: T,
}

impl<T: Tool> std::fmt::Debug for Vault<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("root", &self.root)
            .field("settings", &self.settings)
            .field("tool", &self.tool.name())
            .finish()
    }
}

impl Vault<Sops> {
    /// Open the store at `root`, reading `.warren.toml` if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotADirectory` if `root` is not a directory,
    /// or `ConfigError` if the settings file is invalid.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_binary(root, None)
    }

    /// Open the store at `root`, running `binary` instead of the configured
    /// sops binary when given.
    ///
    /// # Errors
    ///
    /// Same as [`Vault::open`].
    pub fn open_with_binary(root: impl AsRef<Path>, binary: Option<&str>) -> Result<Self> {
        let root = root.as_ref();
        ensure_dir(root)?;
        let mut settings = Settings::load(root)?;
        if let Some(binary) = binary {
            settings.sops.binary = binary.to_string();
        }
        let tool = Sops::new(settings.sops.binary.clone(), root);
        Self::with_tool(root, settings, tool)
    }
}

impl<T: Tool> Vault<T> {
    /// Open the store at `root` with explicit settings and tool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotADirectory` if `root` is not a directory.
    pub fn with_tool(root: impl AsRef<Path>, settings: Settings, tool: T) -> Result<Self> {
        let root = root.as_ref();
        ensure_dir(root)?;
        debug!(root = %root.display(), tool = tool.name(), "opened vault");
        Ok(Self {
            root: root.to_path_buf(),
            settings,
            tool,
        })
    }

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Build a fresh index of the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tree cannot be read.
    pub fn index(&self) -> Result<SecretIndex> {
        let sops = SopsConfig::load_or_default(&self.root);
        index::build(&self.root, &self.settings.index_options(), &sops)
    }

    /// Resolve `name` without turning ambiguity into an error.
    pub fn lookup(&self, name: &str) -> Result<(Resolution, SecretIndex)> {
        let index = self.index()?;
        Ok((resolve::resolve(name, &index), index))
    }

    /// Resolve `name` to exactly one secret.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` or `ResolveError::Collision`.
    pub fn resolve(&self, name: &str) -> Result<SecretEntry> {
        let (resolution, index) = self.lookup(name)?;
        resolution.into_entry(name, &index)
    }

    /// Location a new secret called `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let (dirs, file) = name.rsplit_once('/').unwrap_or(("", name));
        let mut path = self.root.clone();
        for segment in dirs.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{file}.{}", constants::SECRET_EXTENSION));
        path
    }
}

fn ensure_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(StoreError::NotADirectory(root.to_path_buf()).into())
    }
}
