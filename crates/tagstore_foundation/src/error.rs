//! Error types for the tagstore system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Type;
use crate::value::Key;

/// The main error type for tagstore operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate name error.
    #[must_use]
    pub fn duplicate_name(key: Key) -> Self {
        Self::new(ErrorKind::DuplicateName(key))
    }

    /// Creates a missing name error.
    #[must_use]
    pub fn missing_name(key: Key) -> Self {
        Self::new(ErrorKind::MissingName(key))
    }

    /// Creates a reserved token collision error.
    #[must_use]
    pub fn reserved_token(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::ReservedTokenCollision(token.into()))
    }

    /// Creates an error for text that cannot be written on a single line.
    #[must_use]
    pub fn invalid_text(text: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidText(text.into()))
    }

    /// Creates a malformed stream error at the given 1-indexed line.
    #[must_use]
    pub fn malformed(message: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::MalformedStream {
            message: message.into(),
            line,
        })
    }

    /// Creates a missing backing file error.
    #[must_use]
    pub fn missing_backing_file(path: &Path, reason: impl fmt::Display) -> Self {
        Self::new(ErrorKind::MissingBackingFile {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })
    }

    /// Creates an I/O error for an operation on `path`.
    #[must_use]
    pub fn io(action: &str, path: &Path, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io(format!(
            "failed to {action} '{}': {err}",
            path.display()
        )))
        .with_context(ErrorContext::new().with_source(path.display().to_string()))
    }

    /// Returns true if this is a malformed stream error.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedStream { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A name was added that already exists.
    #[error("duplicate name: {0}")]
    DuplicateName(Key),

    /// A name was read or removed that does not exist.
    #[error("missing name: {0}")]
    MissingName(Key),

    /// A name or leaf value is textually identical to a grammar marker.
    #[error("reserved token collision: {0:?} is a grammar marker")]
    ReservedTokenCollision(String),

    /// A value of this type cannot appear where it was used.
    #[error("unsupported value type for {context}: {actual}")]
    UnsupportedValueType {
        /// Where the value was used.
        context: &'static str,
        /// The type encountered.
        actual: Type,
    },

    /// Text containing a line break cannot be stored in the line format.
    #[error("text cannot contain line breaks: {0:?}")]
    InvalidText(String),

    /// The encoded stream does not follow the grammar.
    #[error("malformed stream at line {line}: {message}")]
    MalformedStream {
        /// Description of the problem.
        message: String,
        /// Line number (1-indexed).
        line: usize,
    },

    /// The backing file does not exist and could not be created.
    #[error("missing backing file '{}': {reason}", .path.display())]
    MissingBackingFile {
        /// Path of the backing file.
        path: PathBuf,
        /// Why it could not be created.
        reason: String,
    },

    /// Reading or writing the backing file failed.
    #[error("io error: {0}")]
    Io(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Backing file or other source description.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source description.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for tagstore operations.
pub type Result<T> = std::result::Result<T, Error>;
