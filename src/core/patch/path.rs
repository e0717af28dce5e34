//! Bracket paths and the `.a.b: value` shorthand.

use std::fmt;

use crate::error::{PatchError, Result};

/// One step into a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Mapping key, rendered as `["key"]`
    Key(String),
    /// Sequence position, rendered as `[0]`
    Index(usize),
}

/// Address of a field inside a document, e.g. `["stringData"]["password"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BracketPath(Vec<Segment>);

impl BracketPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Path of a single mapping key.
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![Segment::Key(key.into())])
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of this path extended by one segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for BracketPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match segment {
                Segment::Key(key) => write!(f, "[{}]", quote(key))?,
                Segment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

/// JSON string literal for `s`.
pub(crate) fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Parse the `.a.b["c"][0]: value` shorthand.
///
/// Returns the path and the raw text after the colon, or `None` when `text`
/// is not of that form. Only single-line input qualifies.
pub fn parse_assignment(text: &str) -> Option<(BracketPath, &str)> {
    if text.contains('\n') || !text.starts_with('.') {
        return None;
    }
    let (path, rest) = parse_segments(text).ok()?;
    let value = rest.strip_prefix(':')?;
    if !(value.is_empty() || value.starts_with(char::is_whitespace)) {
        return None;
    }
    Some((path, value.trim()))
}

/// Parse a field address such as `.a.b`, `a.b` or `["a"][0]`.
///
/// # Errors
///
/// Returns `PatchError::InvalidPath` if the address is malformed or has
/// trailing characters.
pub fn parse_field(field: &str) -> Result<BracketPath> {
    let field = field.trim();
    let owned;
    let text = if field.starts_with('.') || field.starts_with('[') {
        field
    } else {
        owned = format!(".{field}");
        &owned
    };
    let invalid = |reason: String| PatchError::InvalidPath {
        input: field.to_string(),
        reason,
    };

    let (path, rest) = parse_segments(text).map_err(invalid)?;
    if !rest.is_empty() {
        return Err(invalid(format!("unexpected trailing text '{rest}'")).into());
    }
    Ok(path)
}

/// Consume segments from the start of `text`; return them and the remainder.
fn parse_segments(text: &str) -> std::result::Result<(BracketPath, &str), String> {
    if !(text.starts_with('.') || text.starts_with('[')) {
        return Err("a field address starts with '.'".to_string());
    }

    let mut segments = Vec::new();
    let mut rest = text;
    loop {
        if let Some(after_dot) = rest.strip_prefix('.') {
            if after_dot.starts_with('[') {
                rest = after_dot;
                continue;
            }
            let end = after_dot
                .find(|c: char| matches!(c, '.' | '[' | ']' | ':' | '"') || c.is_whitespace())
                .unwrap_or(after_dot.len());
            if end == 0 {
                return Err("empty segment after '.'".to_string());
            }
            segments.push(Segment::Key(after_dot[..end].to_string()));
            rest = &after_dot[end..];
        } else if let Some(after_bracket) = rest.strip_prefix('[') {
            let (segment, remainder) = parse_bracket(after_bracket)?;
            segments.push(segment);
            rest = remainder;
        } else {
            break;
        }
    }

    Ok((BracketPath(segments), rest))
}

/// Parse the inside of `[...]`, with the opening bracket already consumed.
fn parse_bracket(text: &str) -> std::result::Result<(Segment, &str), String> {
    if let Some(quoted) = text.strip_prefix('"') {
        let mut key = String::new();
        let mut chars = quoted.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => key.push(escaped),
                    None => break,
                },
                '"' => {
                    let after = &quoted[i + 1..];
                    return match after.strip_prefix(']') {
                        Some(rest) => Ok((Segment::Key(key), rest)),
                        None => Err("expected ']' after quoted key".to_string()),
                    };
                }
                other => key.push(other),
            }
        }
        return Err("unterminated quoted key".to_string());
    }

    let end = text
        .find(']')
        .ok_or_else(|| "unterminated '['".to_string())?;
    let index = text[..end]
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a quoted key or an index", &text[..end]))?;
    Ok((Segment::Index(index), &text[end + 1..]))
}
