//! Integration tests for the storage layer.
//!
//! Tests for the entity index, type indexing, and path-addressed writes.

mod index;
mod paths;
