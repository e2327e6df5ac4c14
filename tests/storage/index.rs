//! Integration tests for the entity index.
//!
//! Tests saving, type indexing, lookups, and index consistency across
//! replacement saves.

use curio::foundation::{Entity, TYPE_FIELD, Value};
use curio::storage::EntityIndex;

fn cat(uuid: &str, name: &str) -> Entity {
    let mut entity = Entity::with_identity(uuid, "Cat");
    entity.insert("name".to_string(), Value::from(name));
    entity
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn save_stores_entity_under_uuid() {
    let mut index = EntityIndex::new();
    assert!(index.save(cat("1", "Tom")));

    let entity = index.entity("1").unwrap();
    assert_eq!(entity.get("name"), Some(&Value::from("Tom")));
    assert_eq!(entity.type_name(), Some("Cat"));
}

#[test]
fn save_is_a_full_replace() {
    let mut index = EntityIndex::new();
    let mut first = cat("1", "Tom");
    first.insert("lives".to_string(), Value::Int(9));
    index.save(first);

    // The replacement lacks "lives"; it must not survive the merge-free
    // upsert.
    index.save(cat("1", "Tom"));
    assert_eq!(index.entity("1").unwrap().get("lives"), None);
}

#[test]
fn save_without_uuid_is_ignored() {
    let mut index = EntityIndex::new();
    let mut anonymous = Entity::new();
    anonymous.insert("name".to_string(), Value::from("nobody"));

    assert!(!index.save(anonymous));
    assert!(index.is_empty());
}

#[test]
fn resave_is_idempotent() {
    let mut index = EntityIndex::new();
    index.save(cat("1", "Tom"));
    let once = index.clone();

    index.save(cat("1", "Tom"));
    assert_eq!(index, once);
}

// =============================================================================
// Type indexing
// =============================================================================

#[test]
fn type_lookup_preserves_save_order() {
    let mut index = EntityIndex::new();
    index.save(cat("b", "Felix"));
    index.save(cat("a", "Tom"));
    index.save(cat("c", "Garfield"));

    let cats = index.get_by_type("Cat");
    let names: Vec<_> = cats.iter().filter_map(|e| e.get("name")).collect();
    assert_eq!(
        names,
        vec![
            &Value::from("Felix"),
            &Value::from("Tom"),
            &Value::from("Garfield")
        ]
    );
}

#[test]
fn types_are_kept_separate() {
    let mut index = EntityIndex::new();
    index.save(cat("1", "Tom"));
    index.save(Entity::with_identity("2", "Dog"));

    assert_eq!(index.get_by_type("Cat").len(), 1);
    assert_eq!(index.get_by_type("Dog").len(), 1);
    assert!(index.get_by_type("Mouse").is_empty());
}

#[test]
fn multi_type_lookup_keeps_request_order_without_dedup() {
    let mut index = EntityIndex::new();
    index.save(cat("1", "Tom"));
    index.save(Entity::with_identity("2", "Dog"));

    let found = index.get_by_types(&[
        "Dog".to_string(),
        "Cat".to_string(),
        "Dog".to_string(),
    ]);
    assert_eq!(found.len(), 3);
    assert_eq!(found[0].type_name(), Some("Dog"));
    assert_eq!(found[1].type_name(), Some("Cat"));
    assert_eq!(found[2].type_name(), Some("Dog"));
}

#[test]
fn changing_type_moves_the_uuid() {
    let mut index = EntityIndex::new();
    index.save(cat("1", "Tom"));

    let mut retyped = cat("1", "Tom");
    retyped.insert(TYPE_FIELD.to_string(), Value::from("Dog"));
    index.save(retyped);

    assert!(index.get_by_type("Cat").is_empty());
    assert_eq!(index.get_by_type("Dog").len(), 1);
}

#[test]
fn rebuild_restores_consistency() {
    let mut index = EntityIndex::new();
    index.save(cat("1", "Tom"));
    index.save(cat("2", "Felix"));
    index.rebuild_type_index();

    let uuids = index.uuids_of_type("Cat").unwrap();
    assert_eq!(uuids.len(), 2);
}

// =============================================================================
// Id lookups
// =============================================================================

#[test]
fn id_lookup_preserves_order_and_drops_unknowns() {
    let mut index = EntityIndex::new();
    index.save(cat("1", "Tom"));
    index.save(cat("2", "Felix"));

    let found = index.get_by_ids(&[
        "2".to_string(),
        "ghost".to_string(),
        "1".to_string(),
    ]);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].uuid(), Some("2"));
    assert_eq!(found[1].uuid(), Some("1"));
}
