//! Token-dictionary compression of a line stream.
//!
//! A compressed document is a vocabulary section (one token per line), a
//! single blank separator line, and a body with one line per original line
//! holding the space-separated vocabulary indices of that line's tokens.
//! Every reserved marker is seeded into the vocabulary first, in grammar
//! order, so marker indices are the same in every file.
//!
//! Tokens are the pieces of a line split on single spaces. An empty piece
//! (from leading, trailing, or doubled spaces, or an empty line) is written
//! as an empty index field and never takes a vocabulary slot, so the blank
//! separator line stays unambiguous.

use std::collections::HashMap;

use tagstore_foundation::{Error, Result};

use crate::grammar::Marker;

/// A compressed line stream: vocabulary plus index lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compressed {
    vocabulary: Vec<String>,
    body: Vec<Vec<Option<usize>>>,
}

impl Compressed {
    /// Returns the vocabulary, reserved markers first.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Returns the index lines. `None` stands for an empty token.
    #[must_use]
    pub fn body(&self) -> &[Vec<Option<usize>>] {
        &self.body
    }

    /// Returns true if this is the compressed form of an empty stream.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Renders the document text. An empty stream renders as an empty string.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut out = String::new();
        for token in &self.vocabulary {
            out.push_str(token);
            out.push('\n');
        }
        out.push('\n');
        for line in &self.body {
            for (i, index) in line.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                if let Some(index) = index {
                    out.push_str(&index.to_string());
                }
            }
            out.push('\n');
        }
        out
    }

    /// Parses rendered document text.
    ///
    /// # Errors
    ///
    /// Returns `MalformedStream` if the separator line is missing or a body
    /// field is not a valid vocabulary index.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }
        let mut lines = text.lines().enumerate();
        let mut vocabulary = Vec::new();
        let mut separated = false;
        for (_, line) in lines.by_ref() {
            if line.is_empty() {
                separated = true;
                break;
            }
            vocabulary.push(line.to_owned());
        }
        if !separated {
            return Err(Error::malformed(
                "missing blank line after vocabulary",
                vocabulary.len() + 1,
            ));
        }
        let body = lines
            .map(|(n, line)| parse_index_line(line, vocabulary.len(), n + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { vocabulary, body })
    }

    /// Restores the original line stream.
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        self.body
            .iter()
            .map(|line| {
                line.iter()
                    .map(|index| index.map_or("", |i| self.vocabulary[i].as_str()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

fn parse_index_line(
    line: &str,
    vocabulary_len: usize,
    line_number: usize,
) -> Result<Vec<Option<usize>>> {
    line.split(' ')
        .map(|field| {
            if field.is_empty() {
                return Ok(None);
            }
            let index: usize = field.parse().map_err(|_| {
                Error::malformed(format!("{field:?} is not a vocabulary index"), line_number)
            })?;
            if index >= vocabulary_len {
                return Err(Error::malformed(
                    format!("index {index} is outside a vocabulary of {vocabulary_len}"),
                    line_number,
                ));
            }
            Ok(Some(index))
        })
        .collect()
}

/// Compresses a line stream against a fresh vocabulary.
#[must_use]
pub fn compress<S: AsRef<str>>(lines: &[S]) -> Compressed {
    if lines.is_empty() {
        return Compressed::default();
    }
    let mut vocabulary: Vec<String> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for marker in Marker::ALL {
        index.insert(marker.as_str(), vocabulary.len());
        vocabulary.push(marker.as_str().to_owned());
    }

    let mut body = Vec::with_capacity(lines.len());
    for line in lines {
        let mut indices = Vec::new();
        for token in line.as_ref().split(' ') {
            if token.is_empty() {
                indices.push(None);
                continue;
            }
            let next = vocabulary.len();
            let slot = *index.entry(token).or_insert(next);
            if slot == next {
                vocabulary.push(token.to_owned());
            }
            indices.push(Some(slot));
        }
        body.push(indices);
    }
    tracing::trace!(
        lines = body.len(),
        vocabulary = vocabulary.len(),
        "compressed line stream"
    );
    Compressed { vocabulary, body }
}

/// Parses document text and restores its line stream.
///
/// # Errors
///
/// Returns `MalformedStream` if the document is not well formed.
pub fn expand(text: &str) -> Result<Vec<String>> {
    Ok(Compressed::parse(text)?.expand())
}

/// Size comparison between a line stream and its compressed document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Bytes of the uncompressed stream, one `\n` per line.
    pub raw_bytes: usize,
    /// Bytes of the rendered compressed document.
    pub compressed_bytes: usize,
}

impl CompressionStats {
    /// Measures a stream against its rendered document.
    #[must_use]
    pub fn measure<S: AsRef<str>>(lines: &[S], rendered: &str) -> Self {
        Self {
            raw_bytes: lines.iter().map(|l| l.as_ref().len() + 1).sum(),
            compressed_bytes: rendered.len(),
        }
    }

    /// Percentage of the raw size saved; negative when the document grew.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn delta_percent(&self) -> f64 {
        if self.raw_bytes == 0 {
            return 0.0;
        }
        (self.raw_bytes as f64 - self.compressed_bytes as f64) / self.raw_bytes as f64 * 100.0
    }
}
