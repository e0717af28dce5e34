use crate::core::patch::PathOperation;
use std::path::PathBuf;

/// Result of a write to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// A new file was written and encrypted.
    Created {
        name: String,
        path: PathBuf,
    },
    /// An existing file was patched field by field.
    Patched {
        name: String,
        path: PathBuf,
        operations: Vec<PathOperation>,
    },
}

impl WriteOutcome {
    /// Full name of the secret that was written
    pub fn name(&self) -> &str {
        match self {
            Self::Created { name, .. } | Self::Patched { name, .. } => name,
        }
    }

    /// File that was written
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Created { path, .. } | Self::Patched { path, .. } => path,
        }
    }
}

/// What a write would do, computed without touching the store.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePlan {
    /// Name the write resolves to
    pub name: String,
    /// File that would be written
    pub path: PathBuf,
    /// Whether the secret already exists and would be patched
    pub exists: bool,
    /// Operations in submission order
    pub operations: Vec<PathOperation>,
}
