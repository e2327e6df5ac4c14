//! Curio - Embedded in-memory entity store
//!
//! This crate re-exports all layers of the Curio system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: curio_runtime    — Snapshot persistence, dirty-flag flushing
//! Layer 1: curio_storage    — Entity index, selectors, paths, filters, requests
//! Layer 0: curio_foundation — Core types (Value, Entity, Error)
//! ```

pub use curio_foundation as foundation;
pub use curio_runtime as runtime;
pub use curio_storage as storage;
