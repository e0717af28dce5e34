//! Name resolution.
//!
//! Maps a user-supplied name onto exactly one [`SecretEntry`]. A full name
//! always wins; a short name is accepted only when it is unique.

use tracing::debug;

use crate::core::domain::SecretEntry;
use crate::core::index::SecretIndex;
use crate::error::{Candidate, ResolveError, Result};

/// Outcome of resolving a name against an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The query is an entry's full name.
    Exact(SecretEntry),
    /// The query is the short name of exactly one entry.
    Short(SecretEntry),
    /// The query is the short name of several entries.
    Collision(Vec<SecretEntry>),
    /// Nothing matched.
    NotFound,
}

impl Resolution {
    /// The single resolved entry, if there is one.
    pub fn entry(&self) -> Option<&SecretEntry> {
        match self {
            Self::Exact(entry) | Self::Short(entry) => Some(entry),
            Self::Collision(_) | Self::NotFound => None,
        }
    }

    /// Convert into the resolved entry or an actionable error.
    ///
    /// `index` is used to offer suggestions when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::NotFound` or `ResolveError::Collision`.
    pub fn into_entry(self, query: &str, index: &SecretIndex) -> Result<SecretEntry> {
        match self {
            Self::Exact(entry) | Self::Short(entry) => Ok(entry),
            Self::Collision(entries) => Err(ResolveError::Collision {
                name: query.to_string(),
                candidates: entries
                    .into_iter()
                    .map(|e| Candidate {
                        name: e.name().to_string(),
                        path: e.path().to_path_buf(),
                    })
                    .collect(),
            }
            .into()),
            Self::NotFound => {
                Err(ResolveError::not_found_with_suggestions(query.to_string(), &index.names()).into())
            }
        }
    }
}

/// Normalize a query: `\` becomes `/`, surrounding slashes are dropped.
pub fn normalize(query: &str) -> String {
    query.replace('\\', "/").trim_matches('/').to_string()
}

/// Resolve `query` against `index`.
///
/// An entry whose full name equals the query is returned even when other
/// entries share that string as their short name.
pub fn resolve(query: &str, index: &SecretIndex) -> Resolution {
    let query = normalize(query);
    if query.is_empty() {
        return Resolution::NotFound;
    }

    if let Some(entry) = index.get(&query) {
        debug!(name = %entry.name(), "resolved by full name");
        return Resolution::Exact(entry.clone());
    }

    let mut matches: Vec<SecretEntry> = index
        .iter()
        .filter(|e| e.short_name() == query)
        .cloned()
        .collect();

    match matches.len() {
        0 => {
            debug!(query = %query, "no match");
            Resolution::NotFound
        }
        1 => {
            let entry = matches.remove(0);
            debug!(query = %query, name = %entry.name(), "resolved by short name");
            Resolution::Short(entry)
        }
        n => {
            debug!(query = %query, matches = n, "short name collision");
            Resolution::Collision(matches)
        }
    }
}
