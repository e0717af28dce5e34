//! Error types for warren.
//!
//! Errors are grouped by the area that raises them and wrapped by the
//! top-level [`Error`]. Every variant renders a message meant to be shown to
//! a user as-is.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors touching the store's directory tree.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid secret name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("{} exists but is not part of the store (check the pattern and encryption settings)", .0.display())]
    Unindexed(PathBuf),

    #[error("field {field} not found in {name}")]
    FieldNotFound { name: String, field: String },

    #[error("{count} of {total} file(s) are not encrypted")]
    Unencrypted { count: usize, total: usize },
}

/// Outcomes of name resolution that the caller has to act on.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("secret not found: {name}{}", format_suggestions(.suggestions))]
    NotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("'{name}' is ambiguous, it matches {} secrets:\n{}", .candidates.len(), format_candidates(.candidates))]
    Collision {
        name: String,
        candidates: Vec<Candidate>,
    },
}

/// One of several secrets sharing a short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub path: PathBuf,
}

impl ResolveError {
    /// Build a not-found error, suggesting names close to the query.
    ///
    /// A name is suggested when it contains the query, or when its full or
    /// short form is within two edits of it.
    pub fn not_found_with_suggestions(name: String, available: &[String]) -> Self {
        let suggestions = available
            .iter()
            .filter(|candidate| {
                let short = candidate.rsplit('/').next().unwrap_or(candidate);
                candidate.contains(name.as_str())
                    || edit_distance(candidate, &name) <= 2
                    || edit_distance(short, &name) <= 2
            })
            .take(3)
            .cloned()
            .collect();
        Self::NotFound { name, suggestions }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

fn retry_note(retried: &bool) -> &'static str {
    if *retried {
        " (also after replacing tabs with spaces)"
    } else {
        ""
    }
}

fn format_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("  {} ({})", c.name, c.path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut cur = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            cur[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        prev = cur;
    }
    prev[b.len()]
}

/// Malformed patch input. Each variant names the string mode it failed in.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("invalid path-syntax input '{input}': {reason}")]
    InvalidPath { input: String, reason: String },

    #[error("structured text could not be parsed{}: {reason}", retry_note(.retried))]
    InvalidDocument { reason: String, retried: bool },

    #[error("unsupported value in input: {0}")]
    Unsupported(String),
}

/// Store settings errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failures of the external encryption tool.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0} not found on PATH. Install sops from https://github.com/getsops/sops")]
    NotFound(String),

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{action} failed for {}: {stderr}", .path.display())]
    Failed {
        action: &'static str,
        path: PathBuf,
        stderr: String,
    },

    #[error("{binary} produced non UTF-8 output")]
    InvalidOutput { binary: String },
}

pub type Result<T> = std::result::Result<T, Error>;
