//! The entity table and its denormalized type index.
//!
//! Entities live in a single uuid-keyed map. A second map from type name to
//! uuid list makes "all entities of type T" a lookup instead of a scan; the
//! index accepts the duplication and keeps the two maps consistent on every
//! save. Both maps are persistent structures, so exporting a [`Snapshot`]
//! is an O(1) structural share rather than a deep copy.

use curio_foundation::Entity;
use serde::{Deserialize, Serialize};

/// Map from uuid to entity.
pub type EntityTable = im::HashMap<String, Entity>;

/// Map from type name to the uuids of entities carrying that type.
pub type TypeTable = im::HashMap<String, im::Vector<String>>;

/// A consistent, immutable copy of the full store state.
///
/// Cheap to produce thanks to structural sharing; safe to serialize or
/// inspect long after the live index has moved on. The field names on the
/// wire are fixed by the on-disk format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every stored entity, keyed by uuid.
    #[serde(default, rename = "dbEntities")]
    pub entities: EntityTable,
    /// The type index at the moment of the snapshot.
    #[serde(default, rename = "dbEntityTypes")]
    pub types: TypeTable,
}

/// The in-memory entity store: entity table plus type index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityIndex {
    entities: EntityTable,
    types: TypeTable,
}

impl EntityIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores an index from a snapshot.
    ///
    /// The persisted type lists are adopted wholesale, so per-type
    /// ordering survives a round trip exactly. They are then repaired in
    /// place: a stale or hand-edited snapshot cannot smuggle in a uuid
    /// list that disagrees with the entity table.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut index = Self {
            entities: snapshot.entities,
            types: snapshot.types,
        };
        index.rebuild_type_index();
        index
    }

    /// Exports the current state as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entities: self.entities.clone(),
            types: self.types.clone(),
        }
    }

    /// Inserts or replaces an entity, keeping the type index consistent.
    ///
    /// Returns `true` if the entity was stored. An entity without a string
    /// uuid is not addressable and is skipped; that is the only way a save
    /// can decline. When a replacement changes the entity's type, its uuid
    /// migrates from the old type's uuid list to the new one. An entity
    /// without a type is stored but reachable only by uuid.
    pub fn save(&mut self, entity: Entity) -> bool {
        let Some(uuid) = entity.uuid().map(String::from) else {
            return false;
        };
        let new_type = entity.type_name().map(String::from);
        let old_type = self
            .entities
            .get(&uuid)
            .and_then(Entity::type_name)
            .map(String::from);

        if old_type != new_type {
            if let Some(old) = &old_type {
                self.unlink_type(old, &uuid);
            }
            if let Some(new) = new_type {
                self.link_type(new, uuid.clone());
            }
        }

        self.entities.insert(uuid, entity);
        true
    }

    /// Looks up a single entity by uuid.
    #[must_use]
    pub fn entity(&self, uuid: &str) -> Option<&Entity> {
        self.entities.get(uuid)
    }

    /// Looks up a single entity mutably by uuid.
    pub fn entity_mut(&mut self, uuid: &str) -> Option<&mut Entity> {
        self.entities.get_mut(uuid)
    }

    /// Collects the entities behind a list of uuids, skipping unknown ids.
    #[must_use]
    pub fn get_by_ids(&self, uuids: &[String]) -> Vec<Entity> {
        uuids
            .iter()
            .filter_map(|uuid| self.entities.get(uuid).cloned())
            .collect()
    }

    /// Collects every entity of one type. An unknown type yields an empty
    /// list.
    #[must_use]
    pub fn get_by_type(&self, type_name: &str) -> Vec<Entity> {
        self.types
            .get(type_name)
            .into_iter()
            .flatten()
            .filter_map(|uuid| self.entities.get(uuid).cloned())
            .collect()
    }

    /// Collects the entities of several types, concatenated in request
    /// order.
    #[must_use]
    pub fn get_by_types(&self, type_names: &[String]) -> Vec<Entity> {
        type_names
            .iter()
            .flat_map(|name| self.get_by_type(name))
            .collect()
    }

    /// Returns the uuids indexed under a type, if any.
    #[must_use]
    pub fn uuids_of_type(&self, type_name: &str) -> Option<&im::Vector<String>> {
        self.types.get(type_name)
    }

    /// Iterates over every stored entity.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entities are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Repairs the type index against the entity table.
    ///
    /// The entity table is the source of truth for membership; the
    /// existing lists are the source of truth for order. Entries whose
    /// uuid is unknown, mistyped, or duplicated are dropped, surviving
    /// entries keep their relative order, and typed entities missing from
    /// their list are appended. The result satisfies the invariant that
    /// every typed entity appears exactly once under its current type and
    /// nowhere else.
    pub fn rebuild_type_index(&mut self) {
        let previous = std::mem::take(&mut self.types);
        for (type_name, uuids) in previous {
            for uuid in uuids {
                let stored_type = self.entities.get(&uuid).and_then(Entity::type_name);
                if stored_type == Some(type_name.as_str()) {
                    self.link_type(type_name.clone(), uuid);
                }
            }
        }

        let mut unindexed = Vec::new();
        for (uuid, entity) in &self.entities {
            if let Some(type_name) = entity.type_name() {
                let linked = self
                    .types
                    .get(type_name)
                    .is_some_and(|list| list.contains(uuid));
                if !linked {
                    unindexed.push((type_name.to_string(), uuid.clone()));
                }
            }
        }
        for (type_name, uuid) in unindexed {
            self.link_type(type_name, uuid);
        }
    }

    fn link_type(&mut self, type_name: String, uuid: String) {
        let list = self.types.entry(type_name).or_default();
        if !list.contains(&uuid) {
            list.push_back(uuid);
        }
    }

    fn unlink_type(&mut self, type_name: &str, uuid: &str) {
        let emptied = match self.types.get_mut(type_name) {
            Some(list) => {
                list.retain(|candidate| candidate != uuid);
                list.is_empty()
            }
            None => false,
        };
        if emptied {
            self.types.remove(type_name);
        }
    }
}
