//! Check command.
//!
//! Classifies files as sops-encrypted or plaintext. Fails when any file is
//! plaintext, so it can run as a pre-commit hook.

use std::path::PathBuf;

use crate::cli::output;
use crate::core::detect;
use crate::error::{Result, StoreError};

/// Classify each file and report the verdicts.
pub fn execute(files: &[PathBuf]) -> Result<()> {
    let mut plaintext = 0;

    for file in files {
        if detect::is_encrypted_file(file)? {
            output::success(&format!("{} encrypted", output::path(file)));
        } else {
            plaintext += 1;
            output::warn(&format!("{} not encrypted", output::path(file)));
        }
    }

    if plaintext > 0 {
        return Err(StoreError::Unencrypted {
            count: plaintext,
            total: files.len(),
        }
        .into());
    }
    Ok(())
}
