//! tagstore - File-backed structured value store
//!
//! This crate re-exports all layers of the tagstore system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: tagstore_store      - Store facade, configuration, backing file
//! Layer 1: tagstore_codec      - Line grammar, encoder/decoder, dictionary
//! Layer 0: tagstore_foundation - Core types (Value, Key, Error)
//! ```

pub use tagstore_codec as codec;
pub use tagstore_foundation as foundation;
pub use tagstore_store as store;

pub use tagstore_foundation::{Error, ErrorKind, Key, Mapping, Result, Value};
pub use tagstore_store::{Store, StoreConfig};
