//! Compilation of write requests into field-level operations.

use std::fmt;
use tracing::debug;

use crate::core::constants;
use crate::core::patch::node::{Node, Scalar};
use crate::core::patch::path::{self, BracketPath, Segment};
use crate::error::{PatchError, Result};

/// What to do at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValue {
    Set(Scalar),
    Remove,
}

/// One field mutation: set `path` to a value, or remove it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOperation {
    pub path: BracketPath,
    pub value: PatchValue,
}

impl PathOperation {
    pub fn set(path: BracketPath, value: Scalar) -> Self {
        Self {
            path,
            value: PatchValue::Set(value),
        }
    }

    pub fn remove(path: BracketPath) -> Self {
        Self {
            path,
            value: PatchValue::Remove,
        }
    }

    pub fn is_remove(&self) -> bool {
        self.value == PatchValue::Remove
    }
}

impl fmt::Display for PathOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            PatchValue::Set(value) => write!(f, "set {} {}", self.path, value),
            PatchValue::Remove => write!(f, "unset {}", self.path),
        }
    }
}

/// How a string input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// `.a.b: value`
    PathSyntax,
    /// Multi-line text with at least one `key:` line
    Structured,
    /// Anything else; stored under the default key
    Plain,
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PathSyntax => "path-syntax",
            Self::Structured => "structured text",
            Self::Plain => "plain value",
        })
    }
}

/// Decide how `text` will be compiled.
///
/// The checks run in a fixed order: path-syntax first, since a
/// `.a: b` line would also pass the structured check. A single line that
/// starts with `.` and has a `: ` separator is path-syntax even when its
/// address is malformed, so [`compile_text`] rejects it instead of storing
/// it as a plain value.
pub fn classify(text: &str) -> TextMode {
    if path::parse_assignment(text).is_some() || looks_like_assignment(text) {
        TextMode::PathSyntax
    } else if looks_structured(text) {
        TextMode::Structured
    } else {
        TextMode::Plain
    }
}

/// Single line starting with `.` with a colon followed by whitespace or the end.
fn looks_like_assignment(text: &str) -> bool {
    if text.contains('\n') || !text.starts_with('.') {
        return false;
    }
    text.match_indices(':').any(|(i, _)| {
        text[i + 1..]
            .chars()
            .next()
            .map_or(true, char::is_whitespace)
    })
}

/// Multi-line text where some line starts, after indentation, with `key:`.
fn looks_structured(text: &str) -> bool {
    text.contains('\n') && text.lines().any(is_key_line)
}

fn is_key_line(line: &str) -> bool {
    let content = line.trim_start();
    let content = content.strip_prefix("- ").unwrap_or(content);
    let Some((key, after)) = content.split_once(':') else {
        return false;
    };
    !key.is_empty()
        && !key.starts_with('#')
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '"' | '\''))
        && (after.is_empty() || after.starts_with(char::is_whitespace))
}

/// Compile a value into the operations that write it.
///
/// Maps and sequences become one operation per leaf, in input order. A
/// string is interpreted according to [`classify`]. Any other top-level
/// scalar is stored under the default key.
///
/// # Errors
///
/// Returns `PatchError::InvalidDocument` when structured text cannot be
/// parsed, even after replacing tabs, `PatchError::InvalidPath` for a
/// malformed `.a.b: value` address, and `PatchError::Unsupported` for a
/// `null` sequence item. No partial list is returned.
pub fn compile(input: &Node) -> Result<Vec<PathOperation>> {
    match input {
        Node::Scalar(Scalar::Str(text)) => compile_text(text),
        other => compile_structured(other),
    }
}

/// Compile a string input.
///
/// # Errors
///
/// See [`compile`].
pub fn compile_text(text: &str) -> Result<Vec<PathOperation>> {
    let mode = classify(text);
    debug!(%mode, "compiling text input");

    match mode {
        TextMode::PathSyntax => {
            let (path, value) =
                path::parse_assignment(text).ok_or_else(|| PatchError::InvalidPath {
                    input: text.to_string(),
                    reason: "not a '.field: value' assignment".to_string(),
                })?;
            let op = if value == "null" || value == "$null" {
                PathOperation::remove(path)
            } else {
                PathOperation::set(path, Scalar::Str(value.to_string()))
            };
            Ok(vec![op])
        }
        TextMode::Structured => {
            let node = parse_structured(text)?;
            compile_structured(&node)
        }
        TextMode::Plain => Ok(vec![PathOperation::set(
            default_path(),
            Scalar::Str(text.to_string()),
        )]),
    }
}

/// Parse structured text, retrying once with tabs replaced by spaces.
fn parse_structured(text: &str) -> Result<Node> {
    let first = match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Ok(value) => return Node::from_yaml(value),
        Err(e) => e,
    };

    if !text.contains('\t') {
        return Err(PatchError::InvalidDocument {
            reason: first.to_string(),
            retried: false,
        }
        .into());
    }

    debug!("retrying structured parse with tabs replaced");
    let normalized = text.replace('\t', &" ".repeat(constants::TAB_WIDTH));
    match serde_yaml::from_str::<serde_yaml::Value>(&normalized) {
        Ok(value) => Node::from_yaml(value),
        Err(e) => Err(PatchError::InvalidDocument {
            reason: e.to_string(),
            retried: true,
        }
        .into()),
    }
}

/// Path of the default key used for unstructured values.
pub fn default_path() -> BracketPath {
    BracketPath::key(constants::DEFAULT_VALUE_KEY)
}

fn compile_structured(node: &Node) -> Result<Vec<PathOperation>> {
    match node {
        Node::Map(_) | Node::Seq(_) => {
            let mut ops = Vec::new();
            walk(node, &BracketPath::default(), &mut ops)?;
            Ok(ops)
        }
        Node::Remove => Ok(vec![PathOperation::remove(default_path())]),
        Node::Scalar(value) => Ok(vec![PathOperation::set(default_path(), value.clone())]),
    }
}

fn walk(node: &Node, prefix: &BracketPath, ops: &mut Vec<PathOperation>) -> Result<()> {
    match node {
        Node::Map(entries) => {
            for (key, child) in entries {
                walk(child, &prefix.child(Segment::Key(key.clone())), ops)?;
            }
        }
        Node::Seq(items) => {
            for (i, child) in items.iter().enumerate() {
                let path = prefix.child(Segment::Index(i));
                // Removing an item shifts the ones after it
                if matches!(child, Node::Remove) {
                    return Err(PatchError::Unsupported(format!(
                        "null sequence item at {path}; sequence items cannot be removed by index"
                    ))
                    .into());
                }
                walk(child, &path, ops)?;
            }
        }
        Node::Remove => ops.push(PathOperation::remove(prefix.clone())),
        Node::Scalar(value) => ops.push(PathOperation::set(prefix.clone(), value.clone())),
    }
    Ok(())
}
