//! Encryption detection.
//!
//! Decides whether a file already carries sops metadata by scanning its
//! lines, without parsing the document.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

use crate::core::constants;
use crate::error::{Result, StoreError};

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Looking for the top-level `sops:` line
    Searching,
    /// Marker seen; counting lines while looking for `version:`
    Found { scanned: usize },
}

/// Check whether a text stream carries sops metadata.
///
/// Looks for a top-level `sops:` line followed, within
/// [`constants::METADATA_LOOKAHEAD`] lines, by an indented `version:` field.
/// Stops at the first version line, and gives up as soon as the window is
/// exhausted, so a stray `sops:` key without metadata is not mistaken for an
/// encrypted file.
///
/// # Errors
///
/// Returns the underlying read error; a failed read is never reported as
/// "not encrypted".
pub fn is_encrypted<R: BufRead>(reader: R) -> std::io::Result<bool> {
    let mut state = Scan::Searching;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();

        state = match state {
            Scan::Searching if line == constants::SOPS_MARKER => Scan::Found { scanned: 0 },
            Scan::Searching => Scan::Searching,
            Scan::Found { scanned } => {
                if is_version_line(line) {
                    return Ok(true);
                }
                if scanned + 1 >= constants::METADATA_LOOKAHEAD {
                    return Ok(false);
                }
                Scan::Found {
                    scanned: scanned + 1,
                }
            }
        };
    }

    Ok(false)
}

/// Check whether the file at `path` carries sops metadata.
///
/// # Errors
///
/// Returns `StoreError::Read` if the file cannot be opened or read.
pub fn is_encrypted_file(path: &Path) -> Result<bool> {
    let read_err = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    let encrypted = is_encrypted(BufReader::new(file)).map_err(read_err)?;
    trace!(path = %path.display(), encrypted, "classified");
    Ok(encrypted)
}

/// An indented `version: <something>` line.
fn is_version_line(line: &str) -> bool {
    let content = line.trim_start();
    if content.len() == line.len() {
        return false;
    }
    content
        .strip_prefix("version:")
        .is_some_and(|value| !value.trim().is_empty())
}
