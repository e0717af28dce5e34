//! Applying operations to an in-memory document.
//!
//! Builds the plaintext for new secrets, and reads single fields back out
//! of decrypted ones.

use serde_yaml::{Mapping, Value};

use crate::core::patch::compile::{PatchValue, PathOperation};
use crate::core::patch::path::{BracketPath, Segment};

/// Build a document by applying `ops` in order to an empty mapping.
pub fn build(ops: &[PathOperation]) -> Value {
    let mut doc = Value::Mapping(Mapping::new());
    for op in ops {
        apply(&mut doc, op);
    }
    doc
}

/// Apply one operation to `doc`.
///
/// A set creates missing parents, replacing scalars that stand in the way
/// and padding sequences with nulls. A remove of a missing field does
/// nothing.
pub fn apply(doc: &mut Value, op: &PathOperation) {
    match &op.value {
        PatchValue::Set(value) => *slot_mut(doc, op.path.segments()) = value.to_yaml(),
        PatchValue::Remove => remove(doc, op.path.segments()),
    }
}

/// Value at `path`, if present.
pub fn lookup<'a>(doc: &'a Value, path: &BracketPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(doc, |node, segment| match segment {
            Segment::Key(key) => node.as_mapping()?.get(key.as_str()),
            Segment::Index(i) => node.as_sequence()?.get(*i),
        })
}

fn slot_mut<'a>(node: &'a mut Value, segments: &[Segment]) -> &'a mut Value {
    match segments.split_first() {
        None => node,
        Some((Segment::Key(key), rest)) => {
            let child = ensure_mapping(node)
                .entry(Value::String(key.clone()))
                .or_insert(Value::Null);
            slot_mut(child, rest)
        }
        Some((Segment::Index(i), rest)) => {
            let seq = ensure_sequence(node);
            if seq.len() <= *i {
                seq.resize(i + 1, Value::Null);
            }
            slot_mut(&mut seq[*i], rest)
        }
    }
}

fn ensure_mapping(node: &mut Value) -> &mut Mapping {
    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }
    match node {
        Value::Mapping(map) => map,
        _ => unreachable!("node was just replaced with a mapping"),
    }
}

fn ensure_sequence(node: &mut Value) -> &mut Vec<Value> {
    if !node.is_sequence() {
        *node = Value::Sequence(Vec::new());
    }
    match node {
        Value::Sequence(seq) => seq,
        _ => unreachable!("node was just replaced with a sequence"),
    }
}

fn remove(node: &mut Value, segments: &[Segment]) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = node;
    for segment in parents {
        let next = match (segment, current) {
            (Segment::Key(key), Value::Mapping(map)) => map.get_mut(key.as_str()),
            (Segment::Index(i), Value::Sequence(seq)) => seq.get_mut(*i),
            _ => None,
        };
        match next {
            Some(next) => current = next,
            None => return,
        }
    }

    match (last, current) {
        (Segment::Key(key), Value::Mapping(map)) => {
            if map.contains_key(key.as_str()) {
                *map = std::mem::take(map)
                    .into_iter()
                    .filter(|(k, _)| k.as_str() != Some(key.as_str()))
                    .collect();
            }
        }
        (Segment::Index(i), Value::Sequence(seq)) if *i < seq.len() => {
            seq.remove(*i);
        }
        _ => {}
    }
}
