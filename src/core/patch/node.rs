//! Input values for the patch compiler.

use serde_json::Number;

use crate::core::patch::path::quote;
use crate::error::{PatchError, Result};

/// A leaf value that can be written to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Str(String),
    Bool(bool),
    Number(Number),
}

impl Scalar {
    /// Render as the literal passed to the external tool.
    ///
    /// Booleans and numbers are unquoted; strings are JSON-quoted, so an
    /// empty string becomes `""` rather than nothing.
    pub fn render(&self) -> String {
        match self {
            Self::Str(s) => quote(s),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
        }
    }

    /// Equivalent YAML value
    pub fn to_yaml(&self) -> serde_yaml::Value {
        match self {
            Self::Str(s) => serde_yaml::Value::String(s.clone()),
            Self::Bool(b) => serde_yaml::Value::Bool(*b),
            Self::Number(n) => {
                if let Some(i) = n.as_i64() {
                    serde_yaml::Value::Number(i.into())
                } else if let Some(u) = n.as_u64() {
                    serde_yaml::Value::Number(u.into())
                } else {
                    serde_yaml::Value::Number(n.as_f64().unwrap_or_default().into())
                }
            }
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// A value to be written, closed over the shapes the compiler handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Keys in the order they were given
    Map(Vec<(String, Node)>),
    Seq(Vec<Node>),
    /// Explicit absence: the field is removed
    Remove,
    Scalar(Scalar),
}

impl Node {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Str(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }

    pub fn int(i: i64) -> Self {
        Self::Scalar(Scalar::Number(i.into()))
    }

    /// Convert a parsed YAML value.
    ///
    /// # Errors
    ///
    /// Returns `PatchError::Unsupported` for non-finite floats and for
    /// mapping keys that are not strings, numbers or booleans.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Self::Remove,
            Value::Bool(b) => Self::bool(b),
            Value::Number(n) => Self::Scalar(Scalar::Number(yaml_number(&n)?)),
            Value::String(s) => Self::str(s),
            Value::Sequence(items) => Self::Seq(
                items
                    .into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<_>>()?,
            ),
            Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    entries.push((yaml_key(key)?, Self::from_yaml(value)?));
                }
                Self::Map(entries)
            }
            Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }

    /// Convert a parsed JSON value. Key order is preserved.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Remove,
            Value::Bool(b) => Self::bool(b),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::str(s),
            Value::Array(items) => Self::Seq(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| PatchError::Unsupported(format!("non-finite number {n}")).into())
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(PatchError::Unsupported(format!("mapping key {other:?}")).into()),
    }
}
