//! Entity records with reserved identity fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Value, ValueMap};

/// Reserved field holding the entity's globally unique id.
pub const UUID_FIELD: &str = "__uuid";

/// Reserved field holding the entity's type name.
pub const TYPE_FIELD: &str = "__type";

/// A typed, uniquely-identified mutable record.
///
/// An entity is a string-keyed map of [`Value`]s with two reserved fields:
/// [`UUID_FIELD`] identifies the entity and [`TYPE_FIELD`] names its type.
/// Everything else is opaque, application-defined nested data. Entities
/// serialize transparently as plain maps.
///
/// An entity without a uuid is not storable; the store skips it silently.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity {
    fields: ValueMap,
}

impl Entity {
    /// Creates an empty entity with no fields.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: ValueMap::new(),
        }
    }

    /// Creates an entity with the given uuid and type name.
    #[must_use]
    pub fn with_identity(uuid: impl Into<String>, type_name: impl Into<String>) -> Self {
        let mut entity = Self::new();
        entity.insert(UUID_FIELD.to_string(), Value::from(uuid.into()));
        entity.insert(TYPE_FIELD.to_string(), Value::from(type_name.into()));
        entity
    }

    /// Returns the entity's uuid, if assigned.
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.fields.get(UUID_FIELD).and_then(Value::as_str)
    }

    /// Returns the entity's type name, if assigned.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.fields.get(TYPE_FIELD).and_then(Value::as_str)
    }

    /// Gets a top-level field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Sets a top-level field, replacing any previous value.
    pub fn insert(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
    }

    /// Returns the underlying field map.
    #[must_use]
    pub fn fields(&self) -> &ValueMap {
        &self.fields
    }

    /// Returns the underlying field map mutably.
    pub fn fields_mut(&mut self) -> &mut ValueMap {
        &mut self.fields
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the entity has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl From<ValueMap> for Entity {
    fn from(fields: ValueMap) -> Self {
        Self { fields }
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Map(entity.fields)
    }
}
