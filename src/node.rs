//! Helpers over decoded data nodes (`serde_json::Value`).
//!
//! Presence is three-valued: a key can be missing, hold a null-like value
//! (`null` or the literal string `"null"`), or hold anything else. Falsy
//! values such as `0`, `false` and `""` are present.
use serde_json::{Map, Value};

pub type Node = Value;
pub type Mapping = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presence<'a> {
    Absent,
    NullLike,
    Present(&'a Value),
}

impl<'a> Presence<'a> {
    pub fn of(data: &'a Mapping, key: &str) -> Self {
        match data.get(key) {
            None => Presence::Absent,
            Some(v) if is_null_like(v) => Presence::NullLike,
            Some(v) => Presence::Present(v),
        }
    }

    /// `Absent` and `NullLike` are interchangeable everywhere.
    pub fn is_missing(&self) -> bool { !matches!(self, Presence::Present(_)) }
}

pub fn is_null_like(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s == "null",
        _ => false,
    }
}

pub fn is_container(v: &Value) -> bool { matches!(v, Value::Array(_) | Value::Object(_)) }

/// Render a scalar the way it appears inside error messages: strings bare,
/// everything else as JSON text.
pub fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Loose scalar equality used by required conditions.
///
/// Numbers compare numerically, as do strings that both spell numbers
/// (`"01"` equals `"1"`); a numeric string equals the number it spells.
/// Booleans compare against numbers by truthiness and against strings by
/// `"true"`/`"false"`. Containers never match.
pub fn loose_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => match (numeric_text(a), numeric_text(b)) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        },
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match (numeric_text(s), n.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Bool(b), Value::Number(n)) | (Value::Number(n), Value::Bool(b)) => {
            *b == n.as_f64().is_some_and(|x| x != 0.0)
        }
        (Value::Bool(b), Value::String(s)) | (Value::String(s), Value::Bool(b)) => {
            s.eq_ignore_ascii_case(if *b { "true" } else { "false" })
        }
        _ => false,
    }
}

/// Decimal or exponent notation only; `inf`/`nan` spellings are text.
fn numeric_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return None;
    }
    s.parse::<f64>().ok().filter(|x| x.is_finite())
}
