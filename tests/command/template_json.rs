//! Template JSON Tests
//!
//! Configurations written the way the template editor stores them, from
//! raw JSON to rendered command documents.

use crate::common::*;
use mongoplug::{Command, ConfigurationIndex, Error, Field, Operation};
use serde_json::json;

// ============================================================================
// Distinct
// ============================================================================

#[test]
fn distinct_from_editor_json() {
    let config = from_json(
        r#"{
            "pluginSpecifiedTemplates": [
                {"key": "command", "value": "DISTINCT"},
                {"key": "collection", "value": "orders"},
                {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {},
                {"key": "distinct.query", "value": "{\"region\": \"eu\"}"},
                {"key": "distinct.key", "value": "status"}
            ]
        }"#,
    );

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    assert_eq!(cmd.operation(), Operation::Distinct);
    assert!(cmd.is_valid());
    assert_eq!(
        cmd.to_document().unwrap(),
        json!({"distinct": "orders", "key": "status", "query": {"region": "eu"}})
    );
}

#[test]
fn distinct_with_structured_query() {
    let config = TemplateBuilder::standard(Operation::Distinct, "orders")
        .set(18, mongoplug::Value::from(json!({"total": {"$gt": 100}})))
        .set(19, "customer")
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    let doc = cmd.to_document().unwrap();
    assert_eq!(doc["query"], json!({"total": {"$gt": 100}}));
}

#[test]
fn truncated_editor_json_is_invalid_not_error() {
    // Saved by an older template version that stopped before the key slot
    let config = TemplateBuilder::standard(Operation::Distinct, "orders")
        .set(18, "{}")
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    assert!(!cmd.is_valid());
    assert_eq!(cmd.missing_fields(), vec![Field::Key]);
    assert_eq!(
        cmd.to_document(),
        Err(Error::InvalidCommand {
            operation: Operation::Distinct,
            missing: vec![Field::Key],
        })
    );
}

// ============================================================================
// Other operations
// ============================================================================

#[test]
fn find_with_string_numbers() {
    let config = TemplateBuilder::standard(Operation::Find, "users")
        .set(2, r#"{"active": true}"#)
        .set(5, "25")
        .set(6, "50")
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    match &cmd {
        Command::Find(find) => {
            assert_eq!(find.limit(), Some(25));
            assert_eq!(find.skip(), Some(50));
        }
        other => panic!("Expected Find, got {:?}", other),
    }
    assert_eq!(
        cmd.to_document().unwrap(),
        json!({"find": "users", "filter": {"active": true}, "limit": 25, "skip": 50})
    );
}

#[test]
fn insert_many_documents() {
    let config = TemplateBuilder::standard(Operation::Insert, "users")
        .set(7, r#"[{"name": "ada"}, {"name": "grace"}]"#)
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    assert_eq!(
        cmd.to_document().unwrap(),
        json!({"insert": "users", "documents": [{"name": "ada"}, {"name": "grace"}]})
    );
}

#[test]
fn update_with_pipeline() {
    let config = TemplateBuilder::standard(Operation::Update, "users")
        .set(8, "{}")
        .set(9, r#"[{"$set": {"visits": {"$add": ["$visits", 1]}}}]"#)
        .set(11, "no")
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    let doc = cmd.to_document().unwrap();
    assert!(doc["updates"][0]["u"].is_array());
    assert_eq!(doc["updates"][0]["upsert"], json!(false));
    assert_eq!(doc["updates"][0]["multi"], json!(false));
}

#[test]
fn malformed_filter_reported_at_render() {
    let config = TemplateBuilder::standard(Operation::Count, "users")
        .set(17, "{status: ")
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    // Completeness only; JSON syntax is checked when rendering
    assert!(cmd.is_valid());
    assert!(matches!(
        cmd.to_document(),
        Err(Error::InvalidJson {
            field: Field::Query,
            ..
        })
    ));
}

#[test]
fn mistyped_limit_fails_construction() {
    let config = TemplateBuilder::standard(Operation::Find, "users")
        .set(2, "{}")
        .set(5, "ten")
        .build();

    let err = Command::from_action_configuration(&config, ConfigurationIndex::standard())
        .unwrap_err();
    assert_eq!(
        err,
        Error::WrongType {
            field: Field::Limit,
            expected: "Integer".to_string(),
            actual: "String".to_string(),
        }
    );
}

#[test]
fn fractional_collection_fails_construction() {
    let config =
        from_json(r#"{"pluginSpecifiedTemplates": [{"value": "COUNT"}, {"value": 1.5}]}"#);

    let err = Command::from_action_configuration(&config, ConfigurationIndex::standard())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::WrongType {
            field: Field::Collection,
            ref actual,
            ..
        } if actual == "Float"
    ));
}

#[test]
fn operator_object_query_is_plain_json() {
    let config = from_json(
        r#"{
            "pluginSpecifiedTemplates": [
                {"value": "COUNT"},
                {"value": "blobs"},
                {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {},
                {"value": {"$bytes": "AQID"}}
            ]
        }"#,
    );

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    assert_eq!(
        cmd.to_document().unwrap(),
        json!({"count": "blobs", "query": {"$bytes": "AQID"}})
    );
}

#[test]
fn structured_sort_keeps_authored_order() {
    let sort = json!({"h": 1, "a": -1, "g": 1, "b": 1, "f": -1, "c": 1, "e": 1, "d": 1});
    let config = TemplateBuilder::standard(Operation::Find, "users")
        .set(2, "{}")
        .set(3, mongoplug::Value::from(sort))
        .build();

    let cmd = Command::from_action_configuration(&config, ConfigurationIndex::standard()).unwrap();
    let doc = cmd.to_document().unwrap();
    let keys: Vec<&str> = doc["sort"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["h", "a", "g", "b", "f", "c", "e", "d"]);
}
