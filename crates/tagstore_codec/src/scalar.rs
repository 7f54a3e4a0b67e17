//! Textual forms of leaf values and keys.
//!
//! Numbers and booleans use their canonical Rust `Display` form, which
//! `FromStr` reads back exactly. Complex numbers are written as the real
//! and imaginary parts separated by one space.

use std::sync::Arc;

use tagstore_foundation::{Complex, Key, Value};

use crate::grammar::LeafKind;

fn format_complex(c: Complex) -> String {
    format!("{} {}", c.re, c.im)
}

fn parse_complex(text: &str) -> Option<Complex> {
    let (re, im) = text.split_once(' ')?;
    Some(Complex::new(re.parse().ok()?, im.parse().ok()?))
}

/// Returns the payload line for a leaf value, or `None` for composites.
#[must_use]
pub fn format_leaf(value: &Value) -> Option<String> {
    match value {
        Value::Int(n) => Some(n.to_string()),
        Value::Float(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Text(s) => Some(s.to_string()),
        Value::Complex(c) => Some(format_complex(*c)),
        Value::List(_) | Value::Tuple(_) | Value::Set(_) | Value::Map(_) => None,
    }
}

/// Returns the payload line for a key.
#[must_use]
pub fn format_key(key: &Key) -> String {
    match key {
        Key::Text(s) => s.to_string(),
        Key::Int(n) => n.to_string(),
        Key::Float(n) => n.to_string(),
        Key::Bool(b) => b.to_string(),
        Key::Complex(c) => format_complex(*c),
    }
}

/// Parses a payload line as a leaf of the given kind.
#[must_use]
pub fn parse_leaf(kind: LeafKind, text: &str) -> Option<Value> {
    Some(match kind {
        LeafKind::Int => Value::Int(text.parse().ok()?),
        LeafKind::Float => Value::Float(text.parse().ok()?),
        LeafKind::Bool => Value::Bool(text.parse().ok()?),
        LeafKind::Text => Value::Text(Arc::from(text)),
        LeafKind::Complex => Value::Complex(parse_complex(text)?),
    })
}

/// Parses a payload line as a key of the given kind.
#[must_use]
pub fn parse_key(kind: LeafKind, text: &str) -> Option<Key> {
    Some(match kind {
        LeafKind::Int => Key::Int(text.parse().ok()?),
        LeafKind::Float => Key::Float(text.parse().ok()?),
        LeafKind::Bool => Key::Bool(text.parse().ok()?),
        LeafKind::Text => Key::Text(Arc::from(text)),
        LeafKind::Complex => Key::Complex(parse_complex(text)?),
    })
}
