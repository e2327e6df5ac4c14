//! Entity storage, addressing, and query evaluation for Curio.
//!
//! This crate provides:
//! - [`Selector`] - Parsed type/id scopes with property paths
//! - [`path`] - Nested property reads and auto-vivifying writes
//! - [`EntityIndex`] - The entity table and denormalized type index
//! - [`Constraint`] - The recursive boolean filter language
//! - [`Store`] - The request orchestrator and snapshot-exchange surface

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod filter;
pub mod index;
pub mod path;
pub mod request;
pub mod selector;
pub mod store;

pub use filter::{Constraint, Predicate, filter_entities};
pub use index::{EntityIndex, Snapshot};
pub use request::{
    FilterRequest, GetRequest, GetResult, Request, RequestOptions, Response, SetInstruction,
};
pub use selector::{Scope, Selector};
pub use store::Store;
