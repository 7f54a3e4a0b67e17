//! File-backed store facade for tagstore.
//!
//! This crate provides:
//! - [`Store`] - A mapping of unique names persisted through the codec
//! - [`StoreConfig`] - Backing path, auto-sync, and compression reporting
//! - [`persist`] - Whole-file reads and rewrites of the backing file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod persist;
pub mod store;

pub use config::StoreConfig;
pub use store::Store;
