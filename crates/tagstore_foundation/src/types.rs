//! Type descriptors for stored values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Runtime type of a stored value.
///
/// Scalar types double as key types: a key's type is recorded next to it in
/// the encoded stream so it can be rebuilt with the same type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Boolean.
    Bool,
    /// UTF-8 text.
    Text,
    /// Complex number with `f64` parts.
    Complex,
    /// Mutable ordered sequence.
    List,
    /// Immutable ordered sequence.
    Tuple,
    /// Collection of unique elements.
    Set,
    /// Insertion-ordered mapping.
    Map,
}

impl Type {
    /// Every scalar type, in declaration order.
    pub const SCALARS: [Type; 5] = [
        Type::Int,
        Type::Float,
        Type::Bool,
        Type::Text,
        Type::Complex,
    ];

    /// Returns true for leaf types (anything that is not a composite).
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Int | Self::Float | Self::Bool | Self::Text | Self::Complex
        )
    }

    /// Returns true for ordered sequences and sets.
    #[must_use]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Self::List | Self::Tuple | Self::Set)
    }

    /// Returns the lowercase name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Text => "str",
            Self::Complex => "complex",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::Map => "dict",
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
