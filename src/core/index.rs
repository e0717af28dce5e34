//! Secret index.
//!
//! Walks a store's directory tree and turns matching files into
//! [`SecretEntry`] values. The index is rebuilt on every call; nothing is
//! cached between calls.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::core::config::SopsConfig;
use crate::core::constants;
use crate::core::detect;
use crate::core::domain::SecretEntry;
use crate::error::{ConfigError, Result, StoreError};

/// How to select files when building an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Glob matched against each file name (not the full path)
    pub pattern: String,
    /// Descend into subdirectories
    pub recurse: bool,
    /// Keep only files that carry sops metadata
    pub require_encryption: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            pattern: constants::DEFAULT_PATTERN.to_string(),
            recurse: true,
            require_encryption: false,
        }
    }
}

/// Secrets found under a root, in directory enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretIndex {
    entries: Vec<SecretEntry>,
}

impl SecretIndex {
    /// Build an index from already-derived entries.
    pub fn from_entries(entries: Vec<SecretEntry>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SecretEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry with exactly this full name.
    pub fn get(&self, name: &str) -> Option<&SecretEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// All full names, in index order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name().to_string()).collect()
    }

    /// Distinct non-empty namespaces, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self
            .entries
            .iter()
            .filter(|e| !e.namespace().is_empty())
            .map(|e| e.namespace().to_string())
            .collect();
        namespaces.sort();
        namespaces.dedup();
        namespaces
    }

    /// Entries in `namespace` or below it.
    pub fn filter_namespace(&self, namespace: &str) -> SecretIndex {
        Self::from_entries(
            self.entries
                .iter()
                .filter(|e| e.in_namespace(namespace))
                .cloned()
                .collect(),
        )
    }
}

impl IntoIterator for SecretIndex {
    type Item = SecretEntry;
    type IntoIter = std::vec::IntoIter<SecretEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a SecretIndex {
    type Item = &'a SecretEntry;
    type IntoIter = std::slice::Iter<'a, SecretEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build the index of secrets under `root`.
///
/// Files are matched by name against `options.pattern`. The sops and warren
/// configuration files are never indexed. With `require_encryption`, files
/// whose stem ends in one of `sops.unencrypted_suffixes` are dropped without
/// being opened, then every remaining file is classified with
/// [`detect::is_encrypted_file`].
///
/// # Errors
///
/// Returns `StoreError::NotADirectory` if `root` is not an accessible
/// directory, `StoreError::Read` if a directory or file cannot be read, and
/// `ConfigError::InvalidValue` for a bad glob.
pub fn build(root: &Path, options: &IndexOptions, sops: &SopsConfig) -> Result<SecretIndex> {
    if !root.is_dir() {
        return Err(StoreError::NotADirectory(root.to_path_buf()).into());
    }
    let pattern = glob::Pattern::new(&options.pattern).map_err(|e| ConfigError::InvalidValue {
        field: "store.pattern",
        reason: e.to_string(),
    })?;

    debug!(
        root = %root.display(),
        pattern = %options.pattern,
        recurse = options.recurse,
        require_encryption = options.require_encryption,
        "building index"
    );

    let canonical_root = root.canonicalize().map_err(|source| StoreError::Read {
        path: root.to_path_buf(),
        source,
    })?;
    let mut walk = Walk {
        pattern: &pattern,
        recurse: options.recurse,
        ancestors: vec![canonical_root],
        files: Vec::new(),
    };
    walk.collect(root)?;
    let files = walk.files;

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        if options.require_encryption {
            let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
            if sops.is_unencrypted(&stem) {
                trace!(path = %path.display(), "skipped: unencrypted suffix");
                continue;
            }
            if !detect::is_encrypted_file(&path)? {
                trace!(path = %path.display(), "skipped: not encrypted");
                continue;
            }
        }

        match entry_name(root, &path) {
            Some(name) => entries.push(SecretEntry::new(name, path)),
            None => trace!(path = %path.display(), "skipped: no usable name"),
        }
    }

    debug!(entries = entries.len(), "index built");
    Ok(SecretIndex::from_entries(entries))
}

/// Directory walk state. `ancestors` holds the canonical path of every
/// directory between the root and the one being read.
struct Walk<'a> {
    pattern: &'a glob::Pattern,
    recurse: bool,
    ancestors: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

impl Walk<'_> {
    fn collect(&mut self, dir: &Path) -> Result<()> {
        let read_err = |source| StoreError::Read {
            path: dir.to_path_buf(),
            source,
        };

        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let path = entry.path();
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let file_type = entry.file_type().map_err(read_err)?;

            if file_type.is_dir() || (file_type.is_symlink() && path.is_dir()) {
                if self.recurse && !file_name.starts_with('.') {
                    self.descend(&path)?;
                }
                continue;
            }

            if is_config_file(&file_name) || !self.pattern.matches(&file_name) {
                continue;
            }
            self.files.push(path);
        }

        Ok(())
    }

    fn descend(&mut self, dir: &Path) -> Result<()> {
        let canonical = dir.canonicalize().map_err(|source| StoreError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        if self.ancestors.contains(&canonical) {
            trace!(path = %dir.display(), "skipped: directory cycle");
            return Ok(());
        }

        self.ancestors.push(canonical);
        let result = self.collect(dir);
        self.ancestors.pop();
        result
    }
}

fn is_config_file(file_name: &str) -> bool {
    file_name == constants::SOPS_CONFIG_FILE || file_name == constants::SETTINGS_FILE
}

/// Derive the slash-delimited secret name for `path` relative to `root`.
///
/// A recognized extension is stripped from the final component.
pub fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let last = segments.pop()?;
    let short = match last.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && constants::RECOGNIZED_EXTENSIONS.contains(&ext) =>
        {
            stem.to_string()
        }
        _ => last,
    };
    segments.push(short);

    Some(segments.join("/"))
}
