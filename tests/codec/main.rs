//! Integration tests for Layer 1: Codec
//!
//! Tests for the line grammar, structural round trips, and dictionary
//! compression.

mod grammar;
