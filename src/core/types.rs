//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// Full slash-delimited secret name (e.g. `apps/api/database`).
pub type SecretName = String;

/// Name with its final segment removed. Empty at the store root.
pub type Namespace = String;

/// Final segment of a secret name.
pub type ShortName = String;

/// Suffix marking keys sops leaves in plaintext (e.g. `_unencrypted`).
pub type Suffix = String;
