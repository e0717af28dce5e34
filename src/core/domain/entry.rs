//! Secret entry type.
//!
//! One encrypted file known to the store, addressed by its logical name.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::types::{Namespace, SecretName, ShortName};

/// An encrypted file in the store with its derived names.
///
/// `name` is always `namespace + "/" + short_name`, or just `short_name` at
/// the root. The constructor derives both parts so the two cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SecretEntry {
    name: SecretName,
    namespace: Namespace,
    short_name: ShortName,
    path: PathBuf,
}

impl SecretEntry {
    /// Create an entry from a slash-delimited name and its file location.
    pub fn new(name: impl Into<SecretName>, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        let (namespace, short_name) = match name.rsplit_once('/') {
            Some((ns, short)) => (ns.to_string(), short.to_string()),
            None => (String::new(), name.clone()),
        };
        Self {
            name,
            namespace,
            short_name,
            path: path.into(),
        }
    }

    /// Full logical name (e.g. `apps/api/database`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its final segment; empty at the root
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Final segment of the name
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// On-disk location of the encrypted file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of namespace segments above this entry.
    pub fn depth(&self) -> usize {
        if self.namespace.is_empty() {
            0
        } else {
            self.namespace.split('/').count()
        }
    }

    /// Whether the entry lives in `namespace` or anywhere below it.
    pub fn in_namespace(&self, namespace: &str) -> bool {
        let namespace = namespace.trim_matches('/');
        if namespace.is_empty() {
            return true;
        }
        self.namespace == namespace
            || self
                .namespace
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl std::fmt::Display for SecretEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
