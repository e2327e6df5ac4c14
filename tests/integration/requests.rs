//! End-to-end request tests.
//!
//! Whole requests enter as JSON and responses leave as JSON, the way an
//! embedding application would drive the store.

use curio::storage::{Request, Response, Store};

fn roundtrip(store: &mut Store, json: &str) -> serde_json::Value {
    let request: Request = serde_json::from_str(json).unwrap();
    let response = store.handle_request(request);
    serde_json::to_value(&response).unwrap()
}

#[test]
fn save_then_get_returns_the_entity_verbatim() {
    let mut store = Store::new();
    roundtrip(
        &mut store,
        r#"{"save": [{"__uuid": "1", "__type": "Cat", "name": "Tom"}]}"#,
    );

    let response = roundtrip(&mut store, r#"{"get": {"uuids": ["1"]}}"#);
    assert_eq!(
        response["get"]["uuids"],
        serde_json::json!([{"__uuid": "1", "__type": "Cat", "name": "Tom"}])
    );
}

#[test]
fn set_then_get_reflects_the_write() {
    let mut store = Store::new();
    roundtrip(
        &mut store,
        r#"{"save": [{"__uuid": "1", "__type": "Cat", "name": "Tom"}]}"#,
    );
    roundtrip(
        &mut store,
        r#"{"set": [{"prop": "<1>.name", "value": "Jerry"}]}"#,
    );

    let response = roundtrip(&mut store, r#"{"get": {"uuids": ["1"]}}"#);
    assert_eq!(response["get"]["uuids"][0]["name"], "Jerry");
}

#[test]
fn get_by_type_returns_only_that_type_in_save_order() {
    let mut store = Store::new();
    roundtrip(
        &mut store,
        r#"{"save": [
            {"__uuid": "1", "__type": "Cat", "name": "Tom"},
            {"__uuid": "2", "__type": "Dog", "name": "Rex"},
            {"__uuid": "3", "__type": "Cat", "name": "Felix"}
        ]}"#,
    );

    let response = roundtrip(&mut store, r#"{"get": {"types": ["Cat"]}}"#);
    let cats = response["get"]["types"].as_array().unwrap();
    assert_eq!(cats.len(), 2);
    assert_eq!(cats[0]["name"], "Tom");
    assert_eq!(cats[1]["name"], "Felix");
}

#[test]
fn filtered_get_by_type() {
    let mut store = Store::new();
    roundtrip(
        &mut store,
        r#"{"save": [
            {"__uuid": "1", "__type": "Cat", "name": "Tom"},
            {"__uuid": "2", "__type": "Cat", "name": "Jerry"}
        ]}"#,
    );

    let response = roundtrip(
        &mut store,
        r#"{
            "get": {"types": ["Cat"]},
            "options": {"filter": {"types": {"and": [
                {"prop": "[Cat].name", "eq": "Jerry"}
            ]}}}
        }"#,
    );
    let cats = response["get"]["types"].as_array().unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0]["__uuid"], "2");
}

#[test]
fn one_request_can_save_set_and_get() {
    let mut store = Store::new();
    let response = roundtrip(
        &mut store,
        r#"{
            "save": [{"__uuid": "1", "__type": "Cat", "name": "Tom"}],
            "set": [{"prop": "<1>.fed", "value": true}],
            "get": {"uuids": ["1"], "types": ["Cat"]}
        }"#,
    );

    assert_eq!(response["get"]["uuids"][0]["fed"], true);
    assert_eq!(response["get"]["types"][0]["fed"], true);
}

#[test]
fn responses_omit_what_was_not_asked() {
    let mut store = Store::new();

    let response = roundtrip(
        &mut store,
        r#"{"save": [{"__uuid": "1", "__type": "Cat"}]}"#,
    );
    assert_eq!(response, serde_json::json!({}));

    let response = roundtrip(&mut store, r#"{"get": {"uuids": ["1"]}}"#);
    assert!(response["get"].get("types").is_none());
}

#[test]
fn malformed_requests_fail_to_parse() {
    for json in [
        r#"{"drop": "everything"}"#,
        r#"{"set": [{"prop": "<1>.x"}]}"#,
        r#"{"options": {"filter": {"types": {}}}}"#,
    ] {
        assert!(
            serde_json::from_str::<Request>(json).is_err(),
            "{json} should be rejected"
        );
    }
}

#[test]
fn responses_roundtrip_through_json() {
    let mut store = Store::new();
    store.handle_request(
        serde_json::from_str(r#"{"save": [{"__uuid": "1", "__type": "Cat"}]}"#).unwrap(),
    );

    let request: Request = serde_json::from_str(r#"{"get": {"uuids": ["1"]}}"#).unwrap();
    let response = store.handle_request(request);

    let encoded = serde_json::to_string(&response).unwrap();
    let decoded: Response = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, response);
}
