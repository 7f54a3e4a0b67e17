//! Integration tests for Layer 2: Store
//!
//! Tests for the store facade over a real backing file.

mod invariants;
mod persistence;
mod scenarios;
