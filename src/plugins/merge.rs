//! Deep merge of settings fragments.

use serde_json::{Map, Value};

/// Merge `overlay` into `base`.
///
/// - Objects merge key by key; keys present on one side pass through.
/// - Arrays merge as a union with exact duplicates removed. Elements
///   currently come out in first-seen order, but callers must only rely on
///   every distinct element appearing once.
/// - Any other pairing, including a type mismatch, takes the overlay.
pub fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => {
                        let previous = existing.take();
                        *existing = merge(previous, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Object(base)
        }
        (Value::Array(base), Value::Array(overlay)) => Value::Array(union(base, overlay)),
        (_, overlay) => overlay,
    }
}

/// Fold `fragments` left to right, starting from the empty object
pub fn merge_all<I>(fragments: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    fragments
        .into_iter()
        .fold(Value::Object(Map::new()), merge)
}

fn union(base: Vec<Value>, overlay: Vec<Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(base.len() + overlay.len());
    for value in base.into_iter().chain(overlay) {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
