//! Core values, keys, collections, and errors for tagstore.
//!
//! This crate provides:
//! - [`Value`] - The tagged union of everything a store can hold
//! - [`Key`] - Scalar names for mapping entries
//! - [`Type`] - Runtime type descriptors
//! - [`Error`] - Rich error types with context
//! - Ordered collections ([`TsVec`], [`TsSet`], [`TsMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod types;
pub mod value;

pub use collections::{TsMap, TsSet, TsVec};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use types::Type;
pub use value::{Complex, Key, Value};

/// The mapping type used for every level of a store.
pub type Mapping = TsMap<Key, Value>;
