//! External encryption tool.
//!
//! warren never encrypts anything itself. Every read and write goes through
//! a [`Tool`], normally [`Sops`], which shells out to the `sops` binary.
//!
//! ## Requirements
//!
//! - `sops` 3.9 or newer on `PATH` (or configured in `.warren.toml`)
//! - keys for the store's creation rules available to sops
//!
//! Commands run with the store root as working directory and, when present,
//! `--config <root>/.sops.yaml`, so creation rules match on the file's path
//! relative to the store.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::config::SopsConfig;
use crate::core::patch::{BracketPath, PatchValue, PathOperation, Scalar};
use crate::error::{Result, ToolError};

/// Encryption backend for secret files.
pub trait Tool {
    /// Backend name for display.
    fn name(&self) -> &str;

    /// Decrypt the file at `path` and return its plaintext.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the tool fails or cannot be run.
    fn decrypt(&self, path: &Path) -> Result<Zeroizing<String>>;

    /// Encrypt the plaintext file at `path`, replacing it.
    ///
    /// The file must already be at its final location; encryption rules
    /// depend on the path.
    fn encrypt_in_place(&self, path: &Path) -> Result<()>;

    /// Set one field of an encrypted file.
    fn set(&self, path: &Path, field: &BracketPath, value: &Scalar) -> Result<()>;

    /// Remove one field of an encrypted file.
    fn unset(&self, path: &Path, field: &BracketPath) -> Result<()>;

    /// Submit one compiled operation.
    fn apply(&self, path: &Path, op: &PathOperation) -> Result<()> {
        match &op.value {
            PatchValue::Set(value) => self.set(path, &op.path, value),
            PatchValue::Remove => self.unset(path, &op.path),
        }
    }
}

/// The `sops` command-line tool.
#[derive(Debug, Clone)]
pub struct Sops {
    binary: String,
    root: PathBuf,
}

impl Sops {
    /// Tool running `binary` from `root`.
    pub fn new(binary: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            root: root.into(),
        }
    }

    /// Check that the binary can be found.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::NotFound` if it is not on `PATH`.
    pub fn check(&self) -> Result<PathBuf> {
        which::which(&self.binary).map_err(|_| ToolError::NotFound(self.binary.clone()).into())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.current_dir(&self.root);
        let config = SopsConfig::config_path(&self.root);
        if config.is_file() {
            cmd.arg("--config").arg(config);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run `cmd` and return its stdout. Arguments are not logged.
    fn run(&self, action: &'static str, path: &Path, mut cmd: Command) -> Result<Vec<u8>> {
        trace!(binary = %self.binary, action, path = %path.display(), "running sops");

        let output = cmd.output().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound(self.binary.clone())
            } else {
                ToolError::Spawn {
                    binary: self.binary.clone(),
                    source,
                }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ToolError::Failed {
                action,
                path: path.to_path_buf(),
                stderr,
            }
            .into());
        }

        Ok(output.stdout)
    }
}

impl Tool for Sops {
    fn name(&self) -> &str {
        "sops"
    }

    fn decrypt(&self, path: &Path) -> Result<Zeroizing<String>> {
        let mut cmd = self.command();
        cmd.arg("--decrypt").arg(path);

        let stdout = Zeroizing::new(self.run("decrypt", path, cmd)?);
        let plaintext = std::str::from_utf8(&stdout).map_err(|_| ToolError::InvalidOutput {
            binary: self.binary.clone(),
        })?;
        debug!(path = %path.display(), "decrypted");
        Ok(Zeroizing::new(plaintext.to_string()))
    }

    fn encrypt_in_place(&self, path: &Path) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["--encrypt", "--in-place"]).arg(path);
        self.run("encrypt", path, cmd)?;
        debug!(path = %path.display(), "encrypted");
        Ok(())
    }

    fn set(&self, path: &Path, field: &BracketPath, value: &Scalar) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("set")
            .arg(path)
            .arg(field.to_string())
            .arg(value.render());
        self.run("set", path, cmd)?;
        debug!(path = %path.display(), field = %field, "field set");
        Ok(())
    }

    fn unset(&self, path: &Path, field: &BracketPath) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("unset").arg(path).arg(field.to_string());
        self.run("unset", path, cmd)?;
        debug!(path = %path.display(), field = %field, "field unset");
        Ok(())
    }
}
