//! Stored values and the keys that name them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collections::{TsMap, TsSet, TsVec};
use crate::error::{Error, ErrorKind};
use crate::types::Type;

/// Bits used for float equality and hashing.
///
/// Every `NaN` maps to the same bits, matching the single `NaN` the text
/// form can express. Other values keep their own bits, so `0.0` and `-0.0`
/// stay distinct.
fn float_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

/// Complex number with `f64` real and imaginary parts.
///
/// Equality and hashing compare both parts by bit pattern, with every `NaN`
/// part equal to every other.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Creates a complex number from its parts.
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        float_bits(self.re) == float_bits(other.re) && float_bits(self.im) == float_bits(other.im)
    }
}

impl Eq for Complex {}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        float_bits(self.re).hash(state);
        float_bits(self.im).hash(state);
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{:+}i)", self.re, self.im)
    }
}

/// Name of an entry in a mapping.
///
/// Keys are always scalars; the key's type survives a round trip through
/// the encoded form.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    /// Text key.
    Text(Arc<str>),
    /// Integer key.
    Int(i64),
    /// Float key (compared by bit pattern, all `NaN`s equal).
    Float(f64),
    /// Boolean key.
    Bool(bool),
    /// Complex key.
    Complex(Complex),
}

impl Key {
    /// Returns the type of this key.
    #[must_use]
    pub const fn key_type(&self) -> Type {
        match self {
            Self::Text(_) => Type::Text,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Bool(_) => Type::Bool,
            Self::Complex(_) => Type::Complex,
        }
    }

    /// Attempts to extract a text reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Text(s) => s.hash(state),
            Self::Int(n) => n.hash(state),
            Self::Float(n) => float_bits(*n).hash(state),
            Self::Bool(b) => b.hash(state),
            Self::Complex(c) => c.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Complex(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Complex> for Key {
    fn from(c: Complex) -> Self {
        Self::Complex(c)
    }
}

impl TryFrom<Value> for Key {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(n) => Ok(Self::Int(n)),
            Value::Float(n) => Ok(Self::Float(n)),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Text(s) => Ok(Self::Text(s)),
            Value::Complex(c) => Ok(Self::Complex(c)),
            other => Err(Error::new(ErrorKind::UnsupportedValueType {
                context: "mapping key",
                actual: other.value_type(),
            })),
        }
    }
}

/// A stored value.
///
/// Composite variants nest without limit. Cloning is cheap for text and
/// sequences; maps and sets copy their entries.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Text value.
    Text(Arc<str>),
    /// Complex number.
    Complex(Complex),
    /// Mutable ordered sequence.
    List(TsVec<Value>),
    /// Immutable ordered sequence.
    Tuple(TsVec<Value>),
    /// Collection of unique elements.
    Set(TsSet<Value>),
    /// Insertion-ordered mapping.
    Map(TsMap<Key, Value>),
}

impl Value {
    /// Builds a list from anything convertible into values.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a tuple from anything convertible into values.
    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a set; duplicate elements collapse.
    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Builds a map from key-value pairs, keeping their order.
    pub fn map<K: Into<Key>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the type of this value.
    #[must_use]
    pub const fn value_type(&self) -> Type {
        match self {
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Bool(_) => Type::Bool,
            Self::Text(_) => Type::Text,
            Self::Complex(_) => Type::Complex,
            Self::List(_) => Type::List,
            Self::Tuple(_) => Type::Tuple,
            Self::Set(_) => Type::Set,
            Self::Map(_) => Type::Map,
        }
    }

    /// Returns true if this value is a leaf.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.value_type().is_scalar()
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a complex value.
    #[must_use]
    pub const fn as_complex(&self) -> Option<Complex> {
        match self {
            Self::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// Attempts to extract a text reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract the elements of a list.
    #[must_use]
    pub const fn as_list(&self) -> Option<&TsVec<Value>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract the elements of a tuple.
    #[must_use]
    pub const fn as_tuple(&self) -> Option<&TsVec<Value>> {
        match self {
            Self::Tuple(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a set reference.
    #[must_use]
    pub const fn as_set(&self) -> Option<&TsSet<Value>> {
        match self {
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a map reference.
    #[must_use]
    pub const fn as_map(&self) -> Option<&TsMap<Key, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

// Floats compare by `float_bits` so that Eq and Hash agree
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => float_bits(*a) == float_bits(*b),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(n) => n.hash(state),
            Self::Float(n) => float_bits(*n).hash(state),
            Self::Bool(b) => b.hash(state),
            Self::Text(s) => s.hash(state),
            Self::Complex(c) => c.hash(state),
            Self::List(v) | Self::Tuple(v) => v.hash(state),
            Self::Set(s) => s.hash(state),
            Self::Map(m) => m.hash(state),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::List(v) => write!(f, "{v:?}"),
            Self::Tuple(v) => {
                let mut t = f.debug_tuple("");
                for item in v {
                    t.field(item);
                }
                t.finish()
            }
            Self::Set(s) => write!(f, "{s:?}"),
            Self::Map(m) => write!(f, "{m:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::List(v) => write_seq(f, "[", v.iter(), "]"),
            Self::Tuple(v) => write_seq(f, "(", v.iter(), ")"),
            Self::Set(s) => write_seq(f, "{", s.iter(), "}"),
            Self::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_seq<'a>(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::Text(s)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Self::Complex(c)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Text(s) => Self::Text(s),
            Key::Int(n) => Self::Int(n),
            Key::Float(n) => Self::Float(n),
            Key::Bool(b) => Self::Bool(b),
            Key::Complex(c) => Self::Complex(c),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl From<TsMap<Key, Value>> for Value {
    fn from(m: TsMap<Key, Value>) -> Self {
        Self::Map(m)
    }
}
