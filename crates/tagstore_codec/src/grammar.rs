//! The reserved marker tokens of the line grammar.
//!
//! Every marker is a single space-free token written on its own line.
//! Long-form markers open entries that live directly in a mapping, short-form
//! markers open sequences nested in another sequence, item markers wrap a
//! mapping that is a sequence element, and tags record a key's type.

use std::fmt;

use tagstore_foundation::{Error, Key, Result, Type, Value};

/// Leaf types that have their own open/close markers and key tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// Integer leaf.
    Int,
    /// Text leaf.
    Text,
    /// Float leaf.
    Float,
    /// Boolean leaf.
    Bool,
    /// Complex leaf.
    Complex,
}

impl LeafKind {
    /// Every leaf kind, in marker order.
    pub const ALL: [LeafKind; 5] = [
        LeafKind::Int,
        LeafKind::Text,
        LeafKind::Float,
        LeafKind::Bool,
        LeafKind::Complex,
    ];

    /// Returns the leaf kind of a scalar value, or `None` for composites.
    #[must_use]
    pub const fn of_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(_) => Some(Self::Int),
            Value::Text(_) => Some(Self::Text),
            Value::Float(_) => Some(Self::Float),
            Value::Bool(_) => Some(Self::Bool),
            Value::Complex(_) => Some(Self::Complex),
            Value::List(_)
            | Value::Tuple(_)
            | Value::Set(_)
            | Value::Map(_) => None,
        }
    }

    /// Returns the leaf kind recorded for a key.
    #[must_use]
    pub const fn of_key(key: &Key) -> Self {
        match key {
            Key::Int(_) => Self::Int,
            Key::Text(_) => Self::Text,
            Key::Float(_) => Self::Float,
            Key::Bool(_) => Self::Bool,
            Key::Complex(_) => Self::Complex,
        }
    }

    /// Returns the matching value type.
    #[must_use]
    pub const fn value_type(self) -> Type {
        match self {
            Self::Int => Type::Int,
            Self::Text => Type::Text,
            Self::Float => Type::Float,
            Self::Bool => Type::Bool,
            Self::Complex => Type::Complex,
        }
    }
}

/// Sequence composites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeqKind {
    /// Mutable ordered sequence.
    List,
    /// Immutable ordered sequence.
    Tuple,
    /// Unique-element collection.
    Set,
}

impl SeqKind {
    /// Every sequence kind, in marker order.
    pub const ALL: [SeqKind; 3] = [SeqKind::List, SeqKind::Tuple, SeqKind::Set];

    /// Returns the sequence kind of a value, or `None` for other variants.
    #[must_use]
    pub const fn of_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(_) => Some(Self::List),
            Value::Tuple(_) => Some(Self::Tuple),
            Value::Set(_) => Some(Self::Set),
            _ => None,
        }
    }

    /// Builds the value of this kind from decoded elements.
    #[must_use]
    pub fn build(self, items: Vec<Value>) -> Value {
        match self {
            Self::List => Value::List(items.into_iter().collect()),
            Self::Tuple => Value::Tuple(items.into_iter().collect()),
            Self::Set => Value::Set(items.into_iter().collect()),
        }
    }
}

/// A reserved grammar token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Opens a keyed leaf entry, or a keyless leaf inside a sequence.
    LeafOpen(LeafKind),
    /// Closes a leaf.
    LeafClose(LeafKind),
    /// Opens a keyed mapping entry.
    DictOpen,
    /// Closes a keyed mapping entry.
    DictClose,
    /// Opens a keyed sequence entry.
    SeqOpen(SeqKind),
    /// Closes a keyed sequence entry.
    SeqClose(SeqKind),
    /// Opens a sequence nested inside another sequence.
    NestedOpen(SeqKind),
    /// Closes a nested sequence.
    NestedClose(SeqKind),
    /// Opens a mapping that is an element of a sequence.
    ItemOpen,
    /// Closes a sequence-element mapping.
    ItemClose,
    /// Records the type of the key on the following line.
    Tag(LeafKind),
}

impl Marker {
    /// Every marker in the stable order used to seed a vocabulary.
    pub const ALL: [Marker; 31] = [
        Marker::LeafOpen(LeafKind::Int),
        Marker::LeafClose(LeafKind::Int),
        Marker::LeafOpen(LeafKind::Text),
        Marker::LeafClose(LeafKind::Text),
        Marker::LeafOpen(LeafKind::Float),
        Marker::LeafClose(LeafKind::Float),
        Marker::LeafOpen(LeafKind::Bool),
        Marker::LeafClose(LeafKind::Bool),
        Marker::LeafOpen(LeafKind::Complex),
        Marker::LeafClose(LeafKind::Complex),
        Marker::DictOpen,
        Marker::DictClose,
        Marker::SeqOpen(SeqKind::List),
        Marker::SeqClose(SeqKind::List),
        Marker::SeqOpen(SeqKind::Tuple),
        Marker::SeqClose(SeqKind::Tuple),
        Marker::SeqOpen(SeqKind::Set),
        Marker::SeqClose(SeqKind::Set),
        Marker::NestedOpen(SeqKind::List),
        Marker::NestedClose(SeqKind::List),
        Marker::NestedOpen(SeqKind::Tuple),
        Marker::NestedClose(SeqKind::Tuple),
        Marker::NestedOpen(SeqKind::Set),
        Marker::NestedClose(SeqKind::Set),
        Marker::ItemOpen,
        Marker::ItemClose,
        Marker::Tag(LeafKind::Text),
        Marker::Tag(LeafKind::Int),
        Marker::Tag(LeafKind::Float),
        Marker::Tag(LeafKind::Bool),
        Marker::Tag(LeafKind::Complex),
    ];

    /// Returns the literal token for this marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeafOpen(LeafKind::Int) => "<int>",
            Self::LeafClose(LeafKind::Int) => "</int>",
            Self::LeafOpen(LeafKind::Text) => "<str>",
            Self::LeafClose(LeafKind::Text) => "</str>",
            Self::LeafOpen(LeafKind::Float) => "<float>",
            Self::LeafClose(LeafKind::Float) => "</float>",
            Self::LeafOpen(LeafKind::Bool) => "<bool>",
            Self::LeafClose(LeafKind::Bool) => "</bool>",
            Self::LeafOpen(LeafKind::Complex) => "<complex>",
            Self::LeafClose(LeafKind::Complex) => "</complex>",
            Self::DictOpen => "<dict>",
            Self::DictClose => "</dict>",
            Self::SeqOpen(SeqKind::List) => "<list>",
            Self::SeqClose(SeqKind::List) => "</list>",
            Self::SeqOpen(SeqKind::Tuple) => "<tuple>",
            Self::SeqClose(SeqKind::Tuple) => "</tuple>",
            Self::SeqOpen(SeqKind::Set) => "<set>",
            Self::SeqClose(SeqKind::Set) => "</set>",
            Self::NestedOpen(SeqKind::List) => "[",
            Self::NestedClose(SeqKind::List) => "]",
            Self::NestedOpen(SeqKind::Tuple) => "(",
            Self::NestedClose(SeqKind::Tuple) => ")",
            Self::NestedOpen(SeqKind::Set) => "{",
            Self::NestedClose(SeqKind::Set) => "}",
            Self::ItemOpen => "<item>",
            Self::ItemClose => "</item>",
            Self::Tag(LeafKind::Text) => "@str",
            Self::Tag(LeafKind::Int) => "@int",
            Self::Tag(LeafKind::Float) => "@float",
            Self::Tag(LeafKind::Bool) => "@bool",
            Self::Tag(LeafKind::Complex) => "@complex",
        }
    }

    /// Parses a line as a marker.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }

    /// Returns true if `token` is exactly a reserved marker.
    #[must_use]
    pub fn is_reserved(token: &str) -> bool {
        Self::parse(token).is_some()
    }

    /// Returns true for markers that end a scope.
    #[must_use]
    pub const fn is_close(self) -> bool {
        matches!(
            self,
            Self::LeafClose(_)
                | Self::DictClose
                | Self::SeqClose(_)
                | Self::NestedClose(_)
                | Self::ItemClose
        )
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that a payload line can be written and read back unambiguously.
///
/// # Errors
///
/// Returns `ReservedTokenCollision` if the text is exactly a marker and
/// `InvalidText` if it contains a line break.
pub fn validate_payload(text: &str) -> Result<()> {
    if Marker::is_reserved(text) {
        return Err(Error::reserved_token(text));
    }
    if text.contains(['\n', '\r']) {
        return Err(Error::invalid_text(text));
    }
    Ok(())
}

/// Validates the textual form of a key.
///
/// # Errors
///
/// See [`validate_payload`].
pub fn validate_key(key: &Key) -> Result<()> {
    validate_payload(&crate::scalar::format_key(key))
}

/// Validates every leaf of a value tree, including nested mapping keys.
///
/// # Errors
///
/// See [`validate_payload`].
pub fn validate_value(value: &Value) -> Result<()> {
    match value {
        Value::List(items) | Value::Tuple(items) => items.iter().try_for_each(validate_value),
        Value::Set(items) => items.iter().try_for_each(validate_value),
        Value::Map(entries) => entries.iter().try_for_each(|(k, v)| {
            validate_key(k)?;
            validate_value(v)
        }),
        leaf => match crate::scalar::format_leaf(leaf) {
            Some(text) => validate_payload(&text),
            None => Ok(()),
        },
    }
}
