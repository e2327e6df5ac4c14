//! Persistence and process wiring for Curio.
//!
//! This crate provides:
//! - [`snapshot`] - Snapshot serialization to and from JSON files
//! - [`Database`] - A shared store handle with dirty-driven flushing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod database;
pub mod snapshot;

pub use database::{DEFAULT_FLUSH_INTERVAL, Database, FlushHandle};
