//! Secret operations.
//!
//! Read, write, and remove secrets in the vault.

use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::Vault;
use crate::core::domain::{SecretEntry, WriteOutcome, WritePlan};
use crate::core::index::SecretIndex;
use crate::core::patch::{self, document, Node};
use crate::core::resolve::{self, Resolution};
use crate::core::sops::Tool;
use crate::core::validation;
use crate::error::{Result, StoreError};

impl<T: Tool> Vault<T> {
    /// List secrets, optionally limited to a namespace and everything below it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the tree cannot be read.
    pub fn list(&self, namespace: Option<&str>) -> Result<SecretIndex> {
        let index = self.index()?;
        Ok(match namespace {
            Some(ns) => index.filter_namespace(ns),
            None => index,
        })
    }

    /// Decrypt a secret.
    ///
    /// # Returns
    ///
    /// The decrypted document wrapped in `Zeroizing` for secure memory cleanup.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` if `name` does not identify exactly one secret,
    /// or `ToolError` if decryption fails.
    pub fn read(&self, name: &str) -> Result<Zeroizing<String>> {
        let entry = self.resolve(name)?;
        self.tool.decrypt(entry.path())
    }

    /// Decrypt a secret and extract one field.
    ///
    /// `field` is a dotted or bracket address (`.db.password`,
    /// `["db"]["password"]`). String values are returned as-is, anything
    /// else as YAML.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::FieldNotFound` if the field is absent, plus
    /// everything [`Vault::read`] returns.
    pub fn get(&self, name: &str, field: &str) -> Result<Zeroizing<String>> {
        let entry = self.resolve(name)?;
        let path = patch::parse_field(field)?;
        let plaintext = self.tool.decrypt(entry.path())?;
        let doc: serde_yaml::Value = serde_yaml::from_str(&plaintext)?;

        let value = document::lookup(&doc, &path).ok_or_else(|| StoreError::FieldNotFound {
            name: entry.name().to_string(),
            field: field.to_string(),
        })?;

        let rendered = match value {
            serde_yaml::Value::String(s) => s.clone(),
            other => serde_yaml::to_string(other)?.trim_end().to_string(),
        };
        Ok(Zeroizing::new(rendered))
    }

    /// Compute what [`Vault::write`] would do without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Collision` for an ambiguous name, `PatchError`
    /// for malformed input, and `StoreError::InvalidName` for a new secret
    /// with an unusable name.
    pub fn plan(&self, name: &str, input: &Node) -> Result<WritePlan> {
        let (resolution, index) = self.lookup(name)?;
        let operations = patch::compile(input)?;

        if resolution == Resolution::NotFound {
            let name = resolve::normalize(name);
            validation::validate_name(&name)?;
            let path = self.path_for(&name);
            if path.exists() {
                return Err(StoreError::Unindexed(path).into());
            }
            return Ok(WritePlan {
                name,
                path,
                exists: false,
                operations,
            });
        }

        let entry = resolution.into_entry(name, &index)?;
        Ok(WritePlan {
            name: entry.name().to_string(),
            path: entry.path().to_path_buf(),
            exists: true,
            operations,
        })
    }

    /// Write a secret.
    ///
    /// An existing secret is patched one field at a time through the tool,
    /// leaving every other field untouched. A new secret is written as a
    /// full plaintext document at its final path and then encrypted in
    /// place; if encryption fails the plaintext file is deleted.
    ///
    /// # Errors
    ///
    /// Everything [`Vault::plan`] returns, plus `ToolError` and
    /// `StoreError::Write`.
    pub fn write(&self, name: &str, input: &Node) -> Result<WriteOutcome> {
        let plan = self.plan(name, input)?;

        if plan.exists {
            info!(name = %plan.name, operations = plan.operations.len(), "patching secret");
            for op in &plan.operations {
                self.tool.apply(&plan.path, op)?;
            }
            return Ok(WriteOutcome::Patched {
                name: plan.name,
                path: plan.path,
                operations: plan.operations,
            });
        }

        info!(name = %plan.name, "creating secret");
        let doc = document::build(&plan.operations);
        let plaintext = Zeroizing::new(serde_yaml::to_string(&doc)?);
        let created_dirs = write_plaintext(&plan.path, &plaintext)?;

        if let Err(e) = self.tool.encrypt_in_place(&plan.path) {
            if let Err(cleanup) = fs::remove_file(&plan.path) {
                warn!(path = %plan.path.display(), error = %cleanup, "failed to remove plaintext after encryption error");
            }
            for dir in &created_dirs {
                if let Err(cleanup) = fs::remove_dir(dir) {
                    warn!(path = %dir.display(), error = %cleanup, "failed to remove directory after encryption error");
                }
            }
            return Err(e);
        }

        Ok(WriteOutcome::Created {
            name: plan.name,
            path: plan.path,
        })
    }

    /// Delete a secret's file.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError` if `name` does not identify exactly one
    /// secret, or `StoreError::Write` if the file cannot be removed.
    pub fn remove(&self, name: &str) -> Result<SecretEntry> {
        let entry = self.resolve(name)?;
        fs::remove_file(entry.path()).map_err(|source| StoreError::Write {
            path: entry.path().to_path_buf(),
            source,
        })?;
        info!(name = %entry.name(), "removed secret");
        Ok(entry)
    }
}

/// Write `contents` to a new file at `path`, creating missing parents.
///
/// Returns the directories that were created, deepest first.
fn write_plaintext(path: &std::path::Path, contents: &str) -> Result<Vec<PathBuf>> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut created = Vec::new();
    if let Some(parent) = path.parent() {
        created = parent
            .ancestors()
            .take_while(|dir| !dir.as_os_str().is_empty() && !dir.exists())
            .map(std::path::Path::to_path_buf)
            .collect();
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)?;

    // Restrict permissions while the file holds plaintext (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(created)
}
