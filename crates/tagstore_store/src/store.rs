//! The file-backed store.
//!
//! A [`Store`] owns one mapping and one backing file. Loading runs
//! expand then decode; flushing runs encode then compress and rewrites the
//! whole file. Mutations build the next mapping on a copy and only commit it
//! once any auto-sync flush has succeeded, so a failed operation leaves the
//! in-memory mapping untouched.

use std::fmt;
use std::path::Path;

use tagstore_codec::grammar::{validate_key, validate_value};
use tagstore_codec::{Compressed, CompressionStats, compress, decode, encode};
use tagstore_foundation::{Error, ErrorContext, ErrorKind, Key, Mapping, Result, Value};

use crate::config::StoreConfig;
use crate::persist;

/// A mapping of unique names to values, persisted to one file.
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    mapping: Mapping,
    last_compression: Option<CompressionStats>,
}

impl Store {
    /// Opens the store at `path` with default configuration.
    ///
    /// # Errors
    ///
    /// See [`Store::with_config`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(StoreConfig::new(path.as_ref()))
    }

    /// Opens a store, creating the backing file if absent and loading its
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns `MissingBackingFile` if the file cannot be created,
    /// `MalformedStream` if its contents cannot be decoded, or an I/O error.
    pub fn with_config(config: StoreConfig) -> Result<Self> {
        persist::ensure_exists(config.path())?;
        let mut store = Self {
            config,
            mapping: Mapping::new(),
            last_compression: None,
        };
        store.load()?;
        Ok(store)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Returns the in-memory mapping.
    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Returns the number of top-level names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Returns true if the store holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: impl Into<Key>) -> bool {
        self.mapping.contains_key(&key.into())
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.mapping.iter()
    }

    /// Iterates over names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.mapping.keys()
    }

    /// Returns the measurement taken by the last flush, if compression
    /// reporting is enabled and a flush has happened.
    #[must_use]
    pub fn last_compression(&self) -> Option<CompressionStats> {
        self.last_compression
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if `key` is absent.
    pub fn get(&self, key: impl Into<Key>) -> Result<&Value> {
        let key = key.into();
        self.mapping
            .get(&key)
            .ok_or_else(|| Error::missing_name(key))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds a new name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if `key` exists, `ReservedTokenCollision` or
    /// `InvalidText` if the name or any leaf cannot be encoded, or an I/O
    /// error from the auto-sync flush.
    pub fn add(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<()> {
        let (key, value) = (key.into(), value.into());
        if self.mapping.contains_key(&key) {
            return Err(Error::duplicate_name(key));
        }
        validate_key(&key)?;
        validate_value(&value)?;
        tracing::debug!(%key, kind = %value.value_type(), "add");
        let mut next = self.mapping.clone();
        next.insert(key, value);
        self.commit(next)
    }

    /// Removes a name and returns its value.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if `key` is absent, or an I/O error from the
    /// auto-sync flush.
    pub fn remove(&mut self, key: impl Into<Key>) -> Result<Value> {
        let key = key.into();
        let mut next = self.mapping.clone();
        let Some(value) = next.remove(&key) else {
            return Err(Error::missing_name(key));
        };
        tracing::debug!(%key, "remove");
        self.commit(next)?;
        Ok(value)
    }

    /// Replaces the value of an existing name and returns the old value.
    ///
    /// Behaves as a remove followed by an add, so the name moves to the end
    /// of the iteration order. Everything is validated before the mapping
    /// changes and the result is flushed once.
    ///
    /// # Errors
    ///
    /// Returns `MissingName` if `key` is absent, `ReservedTokenCollision` or
    /// `InvalidText` if the value cannot be encoded, or an I/O error.
    pub fn replace(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<Value> {
        let (key, value) = (key.into(), value.into());
        validate_value(&value)?;
        let mut next = self.mapping.clone();
        let Some(old) = next.remove(&key) else {
            return Err(Error::missing_name(key));
        };
        tracing::debug!(%key, kind = %value.value_type(), "replace");
        next.insert(key, value);
        self.commit(next)?;
        Ok(old)
    }

    /// Clears the mapping and truncates the backing file, regardless of
    /// auto-sync.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be truncated.
    pub fn reset(&mut self) -> Result<()> {
        persist::write_document(self.path(), "")?;
        self.mapping.clear();
        self.last_compression = None;
        tracing::info!(path = %self.path().display(), "store reset");
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Encodes, compresses and writes the whole mapping to the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub fn flush(&mut self) -> Result<()> {
        let stats = self.write(&self.mapping)?;
        if stats.is_some() {
            self.last_compression = stats;
        }
        Ok(())
    }

    /// Reads, expands and decodes the backing file, replacing the mapping.
    ///
    /// # Errors
    ///
    /// Returns `MalformedStream` if the file contents are malformed, or an
    /// I/O error if it cannot be read.
    pub fn load(&mut self) -> Result<()> {
        let path = self.path();
        let text = persist::read_document(path)?;
        let compressed = Compressed::parse(&text).map_err(|e| in_file(e, path, 0))?;
        // Body line n of the file holds stream line n - vocabulary - 1.
        let body_offset = compressed.vocabulary().len() + 1;
        let mapping =
            decode(compressed.expand()).map_err(|e| in_file(e, path, body_offset))?;
        tracing::info!(path = %path.display(), entries = mapping.len(), "loaded store");
        self.mapping = mapping;
        Ok(())
    }

    fn commit(&mut self, next: Mapping) -> Result<()> {
        if self.config.auto_sync {
            let stats = self.write(&next)?;
            if stats.is_some() {
                self.last_compression = stats;
            }
        }
        self.mapping = next;
        Ok(())
    }

    fn write(&self, mapping: &Mapping) -> Result<Option<CompressionStats>> {
        let lines = encode(mapping)?;
        let rendered = compress(&lines).render();
        persist::write_document(self.path(), &rendered)?;
        tracing::info!(
            path = %self.path().display(),
            entries = mapping.len(),
            bytes = rendered.len(),
            "flushed store"
        );
        if !self.config.report_compression {
            return Ok(None);
        }
        let stats = CompressionStats::measure(&lines, &rendered);
        tracing::info!(
            raw_bytes = stats.raw_bytes,
            compressed_bytes = stats.compressed_bytes,
            "compression delta {:.2}%",
            stats.delta_percent()
        );
        Ok(Some(stats))
    }
}

/// Attaches the file path, and the file line of a malformed stream error,
/// to a load error. `line_offset` is added to the line the error reports.
fn in_file(err: Error, path: &Path, line_offset: usize) -> Error {
    let mut context = ErrorContext::new().with_source(path.display().to_string());
    if let ErrorKind::MalformedStream { line, .. } = err.kind {
        context = context.with_line(line + line_offset);
    }
    err.with_context(context)
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.mapping.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
