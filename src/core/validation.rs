//! Input validation for warren operations.
//!
//! Validates names of secrets about to be created.

use crate::error::{Result, StoreError};

/// Validate the name of a new secret.
///
/// Names are slash-delimited paths below the store root:
/// - Cannot be empty or start with `/`
/// - Segments cannot be empty, `.` or `..`
/// - Only alphanumerics, `-`, `_` and `.` are allowed in a segment
///
/// # Errors
///
/// Returns `StoreError::InvalidName` describing the first problem found.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = |reason: String| StoreError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty".to_string()).into());
    }
    if name.starts_with('/') {
        return Err(invalid("cannot start with '/'".to_string()).into());
    }

    for segment in name.split('/') {
        match segment {
            "" => return Err(invalid("contains an empty segment".to_string()).into()),
            "." | ".." => {
                return Err(invalid(format!("segment '{segment}' is not allowed")).into());
            }
            _ => {}
        }
        if segment.starts_with('.') {
            return Err(invalid(format!("segment '{segment}' would be a hidden file")).into());
        }
        if let Some(ch) = segment
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_' | '.'))
        {
            return Err(invalid(format!(
                "invalid character '{ch}'. Only A-Z, a-z, 0-9, '-', '_' and '.' are allowed"
            ))
            .into());
        }
    }

    Ok(())
}
