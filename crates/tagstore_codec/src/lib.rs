//! Line grammar, structural encoder/decoder, and dictionary compression.
//!
//! This crate provides:
//! - [`grammar`] - The reserved marker tokens and payload validation
//! - [`encode`] / [`decode`] - Mapping to grammar lines and back
//! - [`compress`] / [`expand`] - Token-dictionary transform of a line stream
//! - [`to_document`] / [`from_document`] - Both layers joined

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod decoder;
pub mod dictionary;
pub mod encoder;
pub mod grammar;
pub mod scalar;

pub use decoder::{Decoder, decode};
pub use dictionary::{Compressed, CompressionStats, compress, expand};
pub use encoder::{Encoder, encode};
pub use grammar::{LeafKind, Marker, SeqKind};

use tagstore_foundation::{Mapping, Result};

/// Encodes and compresses a mapping into document text.
///
/// # Errors
///
/// Returns an error if a key or leaf cannot be encoded.
pub fn to_document(mapping: &Mapping) -> Result<String> {
    let lines = encode(mapping)?;
    Ok(compress(&lines).render())
}

/// Expands and decodes document text into a mapping.
///
/// # Errors
///
/// Returns `MalformedStream` if either layer is malformed.
pub fn from_document(text: &str) -> Result<Mapping> {
    decode(expand(text)?)
}
