//! Structural encoder: value tree to grammar lines.

use tagstore_foundation::{Error, ErrorKind, Key, Mapping, Result, Value};

use crate::grammar::{validate_payload, LeafKind, Marker, SeqKind};
use crate::scalar::{format_key, format_leaf};

/// Accumulates the line stream for one mapping.
#[derive(Debug, Default)]
pub struct Encoder {
    lines: Vec<String>,
}

impl Encoder {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lines produced so far.
    #[must_use]
    pub fn finish(self) -> Vec<String> {
        self.lines
    }

    /// Encodes every entry of a mapping, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if a key or leaf cannot be written as a payload line.
    pub fn mapping(&mut self, mapping: &Mapping) -> Result<()> {
        mapping
            .iter()
            .try_for_each(|(key, value)| self.entry(key, value))
    }

    /// Encodes a keyed entry, as found directly inside a mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if a key or leaf cannot be written as a payload line.
    pub fn entry(&mut self, key: &Key, value: &Value) -> Result<()> {
        match value {
            Value::Map(entries) => {
                self.marker(Marker::DictOpen);
                self.key(key)?;
                self.mapping(entries)?;
                self.marker(Marker::DictClose);
                Ok(())
            }
            Value::List(items) => self.sequence(Some(key), SeqKind::List, items.iter()),
            Value::Tuple(items) => self.sequence(Some(key), SeqKind::Tuple, items.iter()),
            Value::Set(items) => self.sequence(Some(key), SeqKind::Set, items.iter()),
            leaf => self.leaf(Some(key), leaf),
        }
    }

    /// Encodes an anonymous sequence element.
    fn element(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Map(entries) => {
                self.marker(Marker::ItemOpen);
                self.mapping(entries)?;
                self.marker(Marker::ItemClose);
                Ok(())
            }
            Value::List(items) => self.sequence(None, SeqKind::List, items.iter()),
            Value::Tuple(items) => self.sequence(None, SeqKind::Tuple, items.iter()),
            Value::Set(items) => self.sequence(None, SeqKind::Set, items.iter()),
            leaf => self.leaf(None, leaf),
        }
    }

    /// Keyed sequences use long-form markers, anonymous ones short-form.
    fn sequence<'a>(
        &mut self,
        key: Option<&Key>,
        kind: SeqKind,
        items: impl Iterator<Item = &'a Value>,
    ) -> Result<()> {
        let (open, close) = match key {
            Some(_) => (Marker::SeqOpen(kind), Marker::SeqClose(kind)),
            None => (Marker::NestedOpen(kind), Marker::NestedClose(kind)),
        };
        self.marker(open);
        if let Some(key) = key {
            self.key(key)?;
        }
        for item in items {
            self.element(item)?;
        }
        self.marker(close);
        Ok(())
    }

    fn leaf(&mut self, key: Option<&Key>, value: &Value) -> Result<()> {
        let (Some(kind), Some(text)) = (LeafKind::of_value(value), format_leaf(value)) else {
            return Err(Error::new(ErrorKind::UnsupportedValueType {
                context: "leaf entry",
                actual: value.value_type(),
            }));
        };
        self.marker(Marker::LeafOpen(kind));
        if let Some(key) = key {
            self.key(key)?;
        }
        self.payload(text)?;
        self.marker(Marker::LeafClose(kind));
        Ok(())
    }

    fn marker(&mut self, marker: Marker) {
        self.lines.push(marker.as_str().to_owned());
    }

    fn key(&mut self, key: &Key) -> Result<()> {
        self.marker(Marker::Tag(LeafKind::of_key(key)));
        self.payload(format_key(key))
    }

    fn payload(&mut self, text: String) -> Result<()> {
        validate_payload(&text)?;
        self.lines.push(text);
        Ok(())
    }
}

/// Encodes a whole mapping into grammar lines.
///
/// # Errors
///
/// Returns `ReservedTokenCollision` or `InvalidText` if a key or leaf
/// cannot be written as a payload line.
pub fn encode(mapping: &Mapping) -> Result<Vec<String>> {
    let mut encoder = Encoder::new();
    encoder.mapping(mapping)?;
    Ok(encoder.finish())
}
