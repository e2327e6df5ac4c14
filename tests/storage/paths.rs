//! Integration tests for selectors and path-addressed writes.
//!
//! Tests the selector grammar and the set instruction's resolve-and-write
//! behavior against live entities.

use curio::foundation::Value;
use curio::storage::{Request, Scope, Selector, Store};

fn request(json: &str) -> Request {
    serde_json::from_str(json).unwrap()
}

fn store_with_cat() -> Store {
    let mut store = Store::new();
    store.handle_request(request(
        r#"{"save": [{"__uuid": "19903040-1009", "__type": "Cat", "name": "Tom"}]}"#,
    ));
    store
}

// =============================================================================
// Selector grammar
// =============================================================================

#[test]
fn selector_splits_scope_and_path() {
    let selector = Selector::parse("[Cat].stats.lives").unwrap();
    assert_eq!(selector.scope, Scope::Type("Cat".to_string()));
    assert_eq!(selector.path, vec!["stats".to_string(), "lives".to_string()]);

    let selector = Selector::parse("<19903040-1009>.name").unwrap();
    assert_eq!(selector.scope, Scope::Id("19903040-1009".to_string()));
}

#[test]
fn malformed_scopes_do_not_parse() {
    for raw in ["name", "", "Cat.name", "[C at].name", "<abc>.name", "<>.x"] {
        assert!(Selector::parse(raw).is_none(), "{raw:?} should not parse");
    }
}

// =============================================================================
// Set against live entities
// =============================================================================

#[test]
fn set_writes_through_nested_paths() {
    let mut store = store_with_cat();
    store.handle_request(request(
        r#"{"set": [
            {"prop": "<19903040-1009>.stats.lives", "value": 9},
            {"prop": "<19903040-1009>.stats.mood", "value": "sly"}
        ]}"#,
    ));

    let entity = store.index().entity("19903040-1009").unwrap();
    let stats = entity.get("stats").unwrap().as_map().unwrap();
    assert_eq!(stats.get("lives"), Some(&Value::Int(9)));
    assert_eq!(stats.get("mood"), Some(&Value::from("sly")));
}

#[test]
fn set_overwrites_scalars_and_containers_alike() {
    let mut store = store_with_cat();
    store.handle_request(request(
        r#"{"set": [{"prop": "<19903040-1009>.stats.lives", "value": 9}]}"#,
    ));
    store.handle_request(request(
        r#"{"set": [{"prop": "<19903040-1009>.stats", "value": "gone"}]}"#,
    ));

    let entity = store.index().entity("19903040-1009").unwrap();
    assert_eq!(entity.get("stats"), Some(&Value::from("gone")));
}

#[test]
fn set_can_replace_reserved_fields() {
    // Nothing shields __type from a path write; the type index is only
    // reconciled by save, not by set.
    let mut store = store_with_cat();
    store.handle_request(request(
        r#"{"set": [{"prop": "<19903040-1009>.__type", "value": "Dog"}]}"#,
    ));

    let entity = store.index().entity("19903040-1009").unwrap();
    assert_eq!(entity.type_name(), Some("Dog"));
}

#[test]
fn set_with_complex_value() {
    let mut store = store_with_cat();
    store.handle_request(request(
        r#"{"set": [{"prop": "<19903040-1009>.toys", "value": ["ball", {"kind": "mouse"}]}]}"#,
    ));

    let entity = store.index().entity("19903040-1009").unwrap();
    let toys = entity.get("toys").unwrap().as_array().unwrap();
    assert_eq!(toys.len(), 2);
    assert_eq!(toys.get(0), Some(&Value::from("ball")));
}

#[test]
fn set_never_creates_entities() {
    let mut store = Store::new();
    store.handle_request(request(
        r#"{"set": [{"prop": "<404>.name", "value": "ghost"}]}"#,
    ));
    assert!(store.index().is_empty());
}
