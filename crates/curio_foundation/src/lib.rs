//! Core types and entity records for Curio.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value type for all entity data
//! - [`Entity`] - A string-keyed record with reserved identity fields
//! - [`Error`] - Error types for the adapter boundary
//!
//! Entity data is schema-free: every property is a [`Value`], and nested
//! records are maps of further values. The store above this crate never
//! inspects anything beyond the reserved `__uuid` and `__type` fields.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod value;

pub use entity::{Entity, TYPE_FIELD, UUID_FIELD};
pub use error::{Error, Result};
pub use value::{Value, ValueMap, ValueVec};
