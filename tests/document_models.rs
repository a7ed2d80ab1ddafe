//! Document Model Tests
//!
//! Tests for curried construction over schemas only known at runtime:
//! - Schemas parsed from JSON drive the adapter
//! - Nested objects fill their own defaults
//! - Rejected calls leave the accumulator untouched

use curry_model::{CurryConfig, CurryModel, Document, Schema, ValidationMode};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

const ORDER_SCHEMA: &str = r#"{
    "name": "Order",
    "description": "A customer order",
    "fields": [
        { "name": "id", "type": "string" },
        { "name": "quantity", "type": "int", "default": 1 },
        { "name": "express", "type": "bool", "default": false },
        { "name": "tags", "type": "array", "element_type": { "type": "string" }, "default": [] },
        {
            "name": "ship_to",
            "type": "object",
            "fields": [
                { "name": "city", "type": "string" },
                { "name": "country", "type": "string", "default": "NO" }
            ]
        }
    ]
}"#;

fn order_schema() -> Schema {
    Schema::from_json(ORDER_SCHEMA).unwrap()
}

// =============================================================================
// Construction Tests
// =============================================================================

/// Eager order needs only the fields without defaults.
#[test]
fn test_eager_order() {
    let mut curry = CurryModel::<Document>::from_schema(order_schema(), CurryConfig::eager());
    assert_eq!(curry.missing_fields(), vec!["id", "ship_to"]);

    curry.call([("id", json!("o-1"))]).unwrap();
    let order = curry
        .call([("ship_to", json!({ "city": "Tromsø" }))])
        .unwrap()
        .into_model()
        .unwrap();

    assert_eq!(order.model(), "Order");
    assert_eq!(
        order.into_value(),
        json!({
            "id": "o-1",
            "quantity": 1,
            "express": false,
            "tags": [],
            "ship_to": { "city": "Tromsø", "country": "NO" }
        })
    );
}

/// Lazy order needs every field.
#[test]
fn test_lazy_order() {
    let mut curry = CurryModel::<Document>::from_schema(order_schema(), CurryConfig::lazy());

    curry
        .call([
            ("id", json!("o-2")),
            ("ship_to", json!({ "city": "Oslo", "country": "NO" })),
        ])
        .unwrap();
    assert_eq!(curry.missing_fields(), vec!["quantity", "express", "tags"]);

    let order = curry
        .call([
            ("quantity", json!("4")),
            ("express", json!("yes")),
            ("tags", json!(["gift"])),
        ])
        .unwrap()
        .into_model()
        .unwrap();

    assert_eq!(order.get("quantity"), Some(&json!(4)));
    assert_eq!(order.get("express"), Some(&json!(true)));
}

// =============================================================================
// Rejection Tests
// =============================================================================

/// Nested field errors carry the full path.
#[test]
fn test_nested_error_path() {
    let mut curry = CurryModel::<Document>::from_schema(order_schema(), CurryConfig::eager());

    let err = curry
        .call([("ship_to", json!({ "city": 7 }))])
        .unwrap_err();
    assert_eq!(err.field(), Some("ship_to.city"));
    assert!(curry.accumulated().get("ship_to").is_none());
}

/// Unknown top-level field is reported by name.
#[test]
fn test_unknown_field() {
    let mut curry = CurryModel::<Document>::from_schema(order_schema(), CurryConfig::eager());

    let err = curry.call([("priority", json!(1))]).unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(err.to_string(), "unknown field 'priority'");
}

/// Strict mode rejects what lax mode coerces.
#[test]
fn test_strict_document() {
    let config = CurryConfig::eager().with_mode(ValidationMode::Strict);
    let mut curry = CurryModel::<Document>::from_schema(order_schema(), config);

    let err = curry.call([("quantity", json!("4"))]).unwrap_err();
    assert_eq!(err.details().unwrap().actual, "string");
    assert_eq!(curry.accumulated().get("quantity"), Some(&json!(1)));
}

// =============================================================================
// Schema Tests
// =============================================================================

/// A schema whose default breaks its own type is refused at parse time.
#[test]
fn test_schema_with_bad_default() {
    let err = Schema::from_json(
        r#"{ "name": "Bad", "fields": [{ "name": "n", "type": "int", "default": "x" }] }"#,
    )
    .unwrap_err();
    assert_eq!(err.code(), "SCHEMA_MALFORMED");
}

/// Schema description survives parsing.
#[test]
fn test_schema_description() {
    let schema = order_schema();
    assert_eq!(schema.description.as_deref(), Some("A customer order"));
    assert_eq!(schema.len(), 5);
}
