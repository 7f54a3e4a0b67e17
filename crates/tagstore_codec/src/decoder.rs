//! Structural decoder: grammar lines back into a value tree.
//!
//! The decoder is a line-at-a-time state machine. Open scopes live on an
//! explicit frame stack; each frame remembers the key it will be stored
//! under and the marker that closes it, so a finished scope is always
//! inserted into its own parent rather than located by walking the tree.

use tagstore_foundation::{Error, Key, Mapping, Result, Value};

use crate::grammar::{LeafKind, Marker, SeqKind};
use crate::scalar::{parse_key, parse_leaf};

/// A scope that has been opened but not yet closed.
#[derive(Debug)]
enum Frame {
    /// A mapping: keyed under its parent, or keyless as a sequence element.
    Map {
        key: Option<Key>,
        entries: Mapping,
        close: Marker,
    },
    /// A list, tuple, or set under construction.
    Seq {
        key: Option<Key>,
        kind: SeqKind,
        items: Vec<Value>,
        close: Marker,
    },
}

/// What the scope opened by a long-form marker will become once its key
/// has been read.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Leaf(LeafKind),
    Dict,
    Seq(SeqKind),
}

/// Current read mode.
#[derive(Debug)]
enum Mode {
    /// Between entries; expecting an open or close marker.
    Idle,
    /// Expecting a key-type tag.
    Tag(Pending),
    /// Expecting a key payload of the tagged kind.
    Key(LeafKind, Pending),
    /// Expecting a leaf payload.
    Payload { kind: LeafKind, key: Option<Key> },
    /// Expecting the close marker of a leaf that has been read.
    Close {
        kind: LeafKind,
        key: Option<Key>,
        value: Value,
    },
}

/// Streaming decoder for one encoded mapping.
#[derive(Debug)]
pub struct Decoder {
    root: Mapping,
    stack: Vec<Frame>,
    mode: Mode,
    line: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Creates a decoder with an empty root mapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Mapping::new(),
            stack: Vec::new(),
            mode: Mode::Idle,
            line: 0,
        }
    }

    /// Number of scopes currently open below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of open mappings below the root, keyed or sequence elements.
    #[must_use]
    pub fn mapping_depth(&self) -> usize {
        self.stack
            .iter()
            .filter(|frame| matches!(frame, Frame::Map { .. }))
            .count()
    }

    /// Number of open lists, tuples, and sets.
    #[must_use]
    pub fn sequence_depth(&self) -> usize {
        self.depth() - self.mapping_depth()
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Consumes one line.
    ///
    /// # Errors
    ///
    /// Returns `MalformedStream` if the line is not valid at this point.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        self.mode = match mode {
            Mode::Idle => self.scope_marker(line)?,
            Mode::Tag(pending) => match Marker::parse(line) {
                Some(Marker::Tag(kind)) => Mode::Key(kind, pending),
                _ => return Err(self.error(format!("expected a key-type tag, found {line:?}"))),
            },
            Mode::Key(kind, pending) => {
                let key = parse_key(kind, line).ok_or_else(|| {
                    self.error(format!(
                        "key {line:?} is not a valid {}",
                        kind.value_type()
                    ))
                })?;
                self.open_keyed(key, pending)
            }
            Mode::Payload { kind, key } => {
                let value = parse_leaf(kind, line).ok_or_else(|| {
                    self.error(format!(
                        "payload {line:?} is not a valid {}",
                        kind.value_type()
                    ))
                })?;
                Mode::Close { kind, key, value }
            }
            Mode::Close { kind, key, value } => {
                if Marker::parse(line) != Some(Marker::LeafClose(kind)) {
                    return Err(self.error(format!(
                        "expected {}, found {line:?}",
                        Marker::LeafClose(kind)
                    )));
                }
                self.attach(key, value)?;
                Mode::Idle
            }
        };
        Ok(())
    }

    /// Finishes decoding and returns the root mapping.
    ///
    /// # Errors
    ///
    /// Returns `MalformedStream` if any scope or leaf is still open.
    pub fn finish(self) -> Result<Mapping> {
        if !matches!(self.mode, Mode::Idle) {
            return Err(self.error("unexpected end of stream inside a leaf"));
        }
        if let Some(frame) = self.stack.last() {
            let close = match frame {
                Frame::Map { close, .. } | Frame::Seq { close, .. } => *close,
            };
            return Err(self.error(format!(
                "unexpected end of stream: {} unclosed scope(s), expected {close}",
                self.stack.len()
            )));
        }
        tracing::trace!(entries = self.root.len(), lines = self.line, "decoded mapping");
        Ok(self.root)
    }

    fn in_sequence(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Seq { .. }))
    }

    /// Handles a line read between entries.
    fn scope_marker(&mut self, line: &str) -> Result<Mode> {
        let Some(marker) = Marker::parse(line) else {
            return Err(self.error(format!("expected a marker, found {line:?}")));
        };
        let mode = match (marker, self.in_sequence()) {
            (Marker::LeafOpen(kind), false) => Mode::Tag(Pending::Leaf(kind)),
            (Marker::LeafOpen(kind), true) => Mode::Payload { kind, key: None },
            (Marker::DictOpen, false) => Mode::Tag(Pending::Dict),
            (Marker::SeqOpen(kind), false) => Mode::Tag(Pending::Seq(kind)),
            (Marker::NestedOpen(kind), true) => {
                self.stack.push(Frame::Seq {
                    key: None,
                    kind,
                    items: Vec::new(),
                    close: Marker::NestedClose(kind),
                });
                Mode::Idle
            }
            (Marker::ItemOpen, true) => {
                self.stack.push(Frame::Map {
                    key: None,
                    entries: Mapping::new(),
                    close: Marker::ItemClose,
                });
                Mode::Idle
            }
            (marker, _) if marker.is_close() => {
                self.close_scope(marker)?;
                Mode::Idle
            }
            (marker, in_sequence) => {
                let place = if in_sequence { "a sequence" } else { "a mapping" };
                return Err(self.error(format!("marker {marker} is not valid inside {place}")));
            }
        };
        Ok(mode)
    }

    /// Handles the key of a long-form entry.
    fn open_keyed(&mut self, key: Key, pending: Pending) -> Mode {
        match pending {
            Pending::Leaf(kind) => Mode::Payload {
                kind,
                key: Some(key),
            },
            Pending::Dict => {
                self.stack.push(Frame::Map {
                    key: Some(key),
                    entries: Mapping::new(),
                    close: Marker::DictClose,
                });
                Mode::Idle
            }
            Pending::Seq(kind) => {
                self.stack.push(Frame::Seq {
                    key: Some(key),
                    kind,
                    items: Vec::new(),
                    close: Marker::SeqClose(kind),
                });
                Mode::Idle
            }
        }
    }

    fn close_scope(&mut self, marker: Marker) -> Result<()> {
        let expected = match self.stack.last() {
            Some(Frame::Map { close, .. } | Frame::Seq { close, .. }) => *close,
            None => return Err(self.error(format!("close marker {marker} has no matching open"))),
        };
        if expected != marker {
            return Err(self.error(format!("expected {expected}, found {marker}")));
        }
        let (key, value) = match self.stack.pop() {
            Some(Frame::Map { key, entries, .. }) => (key, Value::Map(entries)),
            Some(Frame::Seq {
                key, kind, items, ..
            }) => (key, kind.build(items)),
            None => return Err(self.error("scope stack is empty")),
        };
        self.attach(key, value)
    }

    /// Inserts a finished value into the innermost open scope.
    fn attach(&mut self, key: Option<Key>, value: Value) -> Result<()> {
        let line = self.line;
        match (self.stack.last_mut(), key) {
            (None, Some(key)) => insert_unique(&mut self.root, key, value, line),
            (Some(Frame::Map { entries, .. }), Some(key)) => {
                insert_unique(entries, key, value, line)
            }
            (Some(Frame::Seq { items, .. }), None) => {
                items.push(value);
                Ok(())
            }
            _ => Err(Error::malformed(
                "entry key does not match its enclosing scope",
                line,
            )),
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::malformed(message, self.line)
    }
}

fn insert_unique(entries: &mut Mapping, key: Key, value: Value, line: usize) -> Result<()> {
    if entries.contains_key(&key) {
        return Err(Error::malformed(format!("duplicate key {key}"), line));
    }
    entries.insert(key, value);
    Ok(())
}

/// Decodes a complete line stream into a mapping.
///
/// # Errors
///
/// Returns `MalformedStream` if the stream does not follow the grammar.
pub fn decode<I, S>(lines: I) -> Result<Mapping>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoder = Decoder::new();
    for line in lines {
        decoder.feed(line.as_ref())?;
    }
    decoder.finish()
}
