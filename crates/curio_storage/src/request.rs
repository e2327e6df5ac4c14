//! The request and response shapes of the store boundary.
//!
//! A request carries up to three independent sections plus options. Every
//! shape is validated once at deserialization; unknown fields are rejected
//! there, so the orchestrator in [`crate::store`] only ever sees well-typed
//! input. Lenient domain semantics (unknown uuids, out-of-scope filters)
//! are preserved past that boundary.

use curio_foundation::{Entity, Value};
use serde::{Deserialize, Serialize};

use crate::filter::Constraint;

/// One inbound request. Sections are processed in a fixed order: `save`,
/// then `set`, then `get` (with `options.filter` applied to the get
/// results). Absent sections are no-ops.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Request {
    /// Entities to upsert.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub save: Vec<Entity>,
    /// Property writes against already-stored entities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<SetInstruction>,
    /// Lookups to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<GetRequest>,
    /// Modifiers applied to the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
}

/// A single property write: a selector naming the target slot, and the
/// value to place there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetInstruction {
    /// Selector string; must carry an id scope to address a stored entity.
    pub prop: String,
    /// The value to assign at the selector's path.
    pub value: Value,
}

/// The lookup section: uuids and type names are independent sub-queries
/// answered side by side, not intersected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetRequest {
    /// Entities to fetch by uuid; unknown uuids are dropped silently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuids: Option<Vec<String>>,
    /// Types to fetch all entities of, concatenated in request order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

impl GetRequest {
    /// Returns true if the section asks for nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uuids.is_none() && self.types.is_none()
    }
}

/// Request modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestOptions {
    /// Filters to apply to the get results, keyed like [`GetRequest`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterRequest>,
}

/// Per-key filters for the two halves of a get result. A filter for a key
/// the get section did not ask about is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterRequest {
    /// Filter applied to the uuid lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuids: Option<Constraint>,
    /// Filter applied to the type lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Constraint>,
}

/// The answer to a request's `get` section, mirroring its keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetResult {
    /// Entities found by uuid, in request order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuids: Option<Vec<Entity>>,
    /// Entities found by type, in request order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Entity>>,
}

impl GetResult {
    /// Returns true if neither key was answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uuids.is_none() && self.types.is_none()
    }
}

/// The full response. Requests without a get section produce an empty
/// response; save and set report nothing beyond their side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Present iff the request had a non-empty get section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<GetResult>,
}
