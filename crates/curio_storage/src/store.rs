//! The request orchestrator and snapshot-exchange surface.
//!
//! [`Store`] owns the [`EntityIndex`] and a dirty flag. It processes each
//! [`Request`] section in a fixed order (save, then set, then get), raises
//! the dirty flag whenever a section mutates state, and hands out
//! snapshots for the persistence layer to flush on its own schedule.

use curio_foundation::Entity;

use crate::filter::filter_entities;
use crate::index::{EntityIndex, Snapshot};
use crate::path;
use crate::request::{FilterRequest, GetRequest, GetResult, Request, Response, SetInstruction};
use crate::selector::{Scope, Selector};

/// An in-memory entity store with change tracking.
///
/// The store is an explicit instance; callers decide how to share it.
/// It is not internally synchronized.
#[derive(Clone, Debug, Default)]
pub struct Store {
    index: EntityIndex,
    dirty: bool,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from a previously exported snapshot. The restored
    /// state is considered clean.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            index: EntityIndex::from_snapshot(snapshot),
            dirty: false,
        }
    }

    /// Replaces the store's state with a snapshot and lowers the dirty
    /// flag.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) {
        self.index = EntityIndex::from_snapshot(snapshot);
        self.dirty = false;
    }

    /// Exports the current state. O(1) thanks to structural sharing, so
    /// callers can take a snapshot without blocking further mutation.
    #[must_use]
    pub fn export_snapshot(&self) -> Snapshot {
        self.index.snapshot()
    }

    /// Processes one request: save, then set, then get with filters.
    pub fn handle_request(&mut self, request: Request) -> Response {
        let saved = self.apply_save(request.save);
        let written = self.apply_set(&request.set);
        if saved > 0 || written > 0 {
            self.dirty = true;
        }

        let filter = request.options.and_then(|options| options.filter);
        let get = request
            .get
            .map(|get| self.answer_get(&get, filter.as_ref()))
            .filter(|result| !result.is_empty());
        Response { get }
    }

    /// Returns a read-only view of the entity index.
    #[must_use]
    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    /// Returns true if state has mutated since the last flush or load.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raises the dirty flag.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Lowers the dirty flag, typically after a successful flush.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Rederives the type index from the entity table.
    pub fn rebuild_type_index(&mut self) {
        self.index.rebuild_type_index();
    }

    fn apply_save(&mut self, entities: Vec<Entity>) -> usize {
        let mut saved = 0;
        for entity in entities {
            if self.index.save(entity) {
                saved += 1;
            }
        }
        saved
    }

    /// Applies set instructions, returning how many wrote anything.
    ///
    /// A write needs an id-scoped selector with a non-empty path, and the
    /// uuid must already be stored. Anything else is skipped silently; a
    /// set can never create an entity.
    fn apply_set(&mut self, instructions: &[SetInstruction]) -> usize {
        let mut written = 0;
        for instruction in instructions {
            let Some(Selector {
                scope: Scope::Id(uuid),
                path,
            }) = Selector::parse(&instruction.prop)
            else {
                continue;
            };
            if path.is_empty() {
                continue;
            }
            if let Some(entity) = self.index.entity_mut(&uuid) {
                path::write(entity, &path, instruction.value.clone());
                written += 1;
            }
        }
        written
    }

    /// Answers the get section, applying per-key filters where both the
    /// lookup and its filter are present.
    fn answer_get(&self, get: &GetRequest, filter: Option<&FilterRequest>) -> GetResult {
        let mut uuids = get.uuids.as_deref().map(|ids| self.index.get_by_ids(ids));
        let mut types = get
            .types
            .as_deref()
            .map(|names| self.index.get_by_types(names));

        if let Some(filter) = filter {
            if let Some(constraint) = &filter.uuids {
                uuids = uuids.map(|entities| filter_entities(constraint, entities));
            }
            if let Some(constraint) = &filter.types {
                types = types.map(|entities| filter_entities(constraint, entities));
            }
        }
        GetResult { uuids, types }
    }
}
