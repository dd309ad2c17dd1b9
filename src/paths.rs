//! Guarded path lookup over untyped payloads.
//!
//! Every field access in the engine goes through [`lookup`]: a missing
//! segment, a wrong-typed intermediate, or a malformed path all resolve to
//! `None` instead of panicking. This is what keeps the "never throw on a
//! missing field" contract honest against arbitrarily-shaped input.

use serde_json::Value;

enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Split a dotted/indexed path (`imp[0].video.w`) into lookup steps.
/// Returns `None` on malformed syntax (empty segment, unclosed bracket,
/// non-numeric index).
fn steps(path: &str) -> Option<Vec<Step<'_>>> {
    let mut out = Vec::new();
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        let mut rest = segment;
        let key_end = rest.find('[').unwrap_or(rest.len());
        let key = &rest[..key_end];
        if key.is_empty() {
            return None;
        }
        out.push(Step::Key(key));
        rest = &rest[key_end..];
        while let Some(stripped) = rest.strip_prefix('[') {
            let close = stripped.find(']')?;
            let idx: usize = stripped[..close].parse().ok()?;
            out.push(Step::Index(idx));
            rest = &stripped[close + 1..];
        }
        if !rest.is_empty() {
            return None;
        }
    }
    Some(out)
}

/// Resolve a dotted/indexed path against a value tree.
///
/// Empty path returns the root. Returns `None` if any step fails to resolve.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(root);
    }
    let mut current = root;
    for step in steps(path)? {
        current = match step {
            Step::Key(k) => current.as_object()?.get(k)?,
            Step::Index(i) => current.as_array()?.get(i)?,
        };
    }
    Some(current)
}

/// True if the path resolves to any value, including `null`.
pub fn exists(root: &Value, path: &str) -> bool {
    lookup(root, path).is_some()
}

/// True if the path resolves to a non-null value.
pub fn is_set(root: &Value, path: &str) -> bool {
    lookup(root, path).is_some_and(|v| !v.is_null())
}

pub fn get_str<'a>(root: &'a Value, path: &str) -> Option<&'a str> {
    lookup(root, path)?.as_str()
}

pub fn get_i64(root: &Value, path: &str) -> Option<i64> {
    lookup(root, path)?.as_i64()
}

pub fn get_f64(root: &Value, path: &str) -> Option<f64> {
    lookup(root, path)?.as_f64()
}

pub fn get_array<'a>(root: &'a Value, path: &str) -> Option<&'a Vec<Value>> {
    lookup(root, path)?.as_array()
}

pub fn get_object<'a>(
    root: &'a Value,
    path: &str,
) -> Option<&'a serde_json::Map<String, Value>> {
    lookup(root, path)?.as_object()
}

/// True if the value is "truthy" in the loose sense privacy-signal fields
/// use: non-empty string, non-zero number, or `true`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// True if the value is the integer 0 or 1. Used by the many OpenRTB flag
/// fields whose domain is {0, 1}.
pub fn is_binary_flag(value: &Value) -> bool {
    matches!(value.as_i64(), Some(0) | Some(1))
}
