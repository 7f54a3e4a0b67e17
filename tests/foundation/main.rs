//! Integration tests for Layer 0: Foundation
//!
//! Tests for values, keys, collections, errors, and serde interop.

mod collections;
mod values;
