//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - any: any JSON value, passed through untouched
//! - optional: the inner type or null
//! - tuple: fixed-length, per-position element types
//! - array: homogeneous array with element type
//! - object: nested object with its own ordered field list

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::errors::{SchemaError, SchemaResult};
use super::validator::{SchemaValidator, ValidationMode};

/// Supported field types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// Any JSON value, including null
    Any,
    /// The inner type, or null
    Optional {
        /// Type of a non-null value
        inner: Box<FieldType>,
    },
    /// Fixed-length sequence with one type per position
    Tuple {
        /// Element types in positional order
        elements: Vec<FieldType>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
    /// Nested object with its own field list
    Object {
        /// Nested field definitions, in declaration order
        fields: Vec<FieldDef>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Any => "any",
            FieldType::Optional { .. } => "optional",
            FieldType::Tuple { .. } => "tuple",
            FieldType::Array { .. } => "array",
            FieldType::Object { .. } => "object",
        }
    }

    /// `optional` wrapping `inner`
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional {
            inner: Box::new(inner),
        }
    }

    /// `tuple` of the given element types
    pub fn tuple(elements: impl IntoIterator<Item = FieldType>) -> Self {
        FieldType::Tuple {
            elements: elements.into_iter().collect(),
        }
    }

    /// `array` of `element_type`
    pub fn array(element_type: FieldType) -> Self {
        FieldType::Array {
            element_type: Box::new(element_type),
        }
    }

    /// `object` with the given nested fields
    pub fn object(fields: impl IntoIterator<Item = FieldDef>) -> Self {
        FieldType::Object {
            fields: fields.into_iter().collect(),
        }
    }
}

/// A single named field: its validation rule and optional default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name, unique within its schema
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Default value. A present `null` is a real default.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,
}

/// Keeps an explicit `null` default as `Some(Value::Null)`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl FieldDef {
    /// Create a field that must be supplied
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            default: None,
        }
    }

    /// Create a field that falls back to `default`
    pub fn with_default(name: impl Into<String>, field_type: FieldType, default: Value) -> Self {
        Self {
            name: name.into(),
            field_type,
            default: Some(default),
        }
    }

    /// Whether the field carries a default value
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Whether the field has no default
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Complete schema definition for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Model name, used in errors and log events
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields,
        }
    }

    /// Start building a schema field by field
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema::new(name, Vec::new()),
        }
    }

    /// Parses a schema from its JSON description and checks its structure.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let schema: Schema = serde_json::from_str(json)
            .map_err(|e| SchemaError::malformed(format!("invalid schema JSON: {}", e)))?;
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `name` is a declared field
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of declared fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(name, default)` pairs for every defaulted field
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter_map(|f| f.default.as_ref().map(|d| (f.name.as_str(), d)))
    }

    /// Validates the schema structure itself (not a record).
    ///
    /// Field names must be non-empty and unique at every nesting level, and
    /// every default must be valid for its own field type.
    pub fn validate_structure(&self) -> SchemaResult<()> {
        check_fields(&self.fields, "")?;

        let validator = SchemaValidator::new(self, ValidationMode::Strict);
        for (name, default) in self.defaults() {
            validator
                .validate_field(name, default.clone())
                .map_err(|e| {
                    SchemaError::malformed(format!("default for '{}' is invalid: {}", name, e))
                })?;
        }
        Ok(())
    }
}

fn check_fields(fields: &[FieldDef], prefix: &str) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for field in fields {
        if field.name.is_empty() {
            return Err(SchemaError::malformed(format!(
                "empty field name in '{}'",
                if prefix.is_empty() { "$root" } else { prefix }
            )));
        }
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::malformed(format!("duplicate field '{}'", path)));
        }
        check_type(&field.field_type, &path)?;
    }
    Ok(())
}

fn check_type(field_type: &FieldType, path: &str) -> SchemaResult<()> {
    match field_type {
        FieldType::Object { fields } => check_fields(fields, path),
        FieldType::Optional { inner } => check_type(inner, path),
        FieldType::Array { element_type } => check_type(element_type, path),
        FieldType::Tuple { elements } => elements
            .iter()
            .enumerate()
            .try_for_each(|(i, t)| check_type(t, &format!("{}[{}]", path, i))),
        _ => Ok(()),
    }
}

/// Incremental schema construction.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Adds a field that must be supplied
    pub fn required(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.schema.fields.push(FieldDef::required(name, field_type));
        self
    }

    /// Adds a field with a default value
    pub fn with_default(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        default: Value,
    ) -> Self {
        self.schema
            .fields
            .push(FieldDef::with_default(name, field_type, default));
        self
    }

    /// Sets the schema description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Schema {
        Schema::builder("User")
            .required("name", FieldType::String)
            .required("age", FieldType::Int)
            .with_default("active", FieldType::Bool, json!(true))
            .build()
    }

    #[test]
    fn test_schema_structure_valid() {
        let schema = sample_schema();
        assert!(schema.validate_structure().is_ok());
    }

    #[test]
    fn test_field_order_preserved() {
        let schema = sample_schema();
        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["name", "age", "active"]);
    }

    #[test]
    fn test_defaults_listed() {
        let schema = sample_schema();
        let defaults: Vec<(&str, &Value)> = schema.defaults().collect();
        assert_eq!(defaults, vec![("active", &json!(true))]);
        assert!(schema.field("name").unwrap().is_required());
        assert!(schema.field("active").unwrap().has_default());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = Schema::builder("User")
            .required("name", FieldType::String)
            .required("name", FieldType::Int)
            .build();
        let err = schema.validate_structure().unwrap_err();
        assert!(err.to_string().contains("duplicate field 'name'"));
    }

    #[test]
    fn test_nested_duplicate_rejected() {
        let address = FieldType::object([
            FieldDef::required("city", FieldType::String),
            FieldDef::required("city", FieldType::String),
        ]);
        let schema = Schema::builder("User").required("address", address).build();
        let err = schema.validate_structure().unwrap_err();
        assert!(err.to_string().contains("address.city"));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let schema = Schema::builder("User")
            .with_default("age", FieldType::Int, json!("ten"))
            .build();
        let err = schema.validate_structure().unwrap_err();
        assert!(err.to_string().contains("default for 'age'"));
    }

    #[test]
    fn test_from_json() {
        let schema = Schema::from_json(
            r#"{
                "name": "Point",
                "fields": [
                    { "name": "x", "type": "int" },
                    { "name": "label", "type": "optional", "inner": { "type": "string" }, "default": null },
                    { "name": "pair", "type": "tuple", "elements": [{ "type": "string" }, { "type": "int" }] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.name, "Point");
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field("label").unwrap().default, Some(Value::Null));
        assert!(schema.field("x").unwrap().is_required());
        assert_eq!(
            schema.field("pair").unwrap().field_type,
            FieldType::tuple([FieldType::String, FieldType::Int])
        );
    }

    #[test]
    fn test_from_json_malformed() {
        let err = Schema::from_json(r#"{ "name": "Broken", "fields": [{ "name": "x" }] }"#)
            .unwrap_err();
        assert_eq!(err.code(), "SCHEMA_MALFORMED");
    }

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(FieldType::Float.type_name(), "float");
        assert_eq!(FieldType::Bool.type_name(), "bool");
        assert_eq!(FieldType::Any.type_name(), "any");
        assert_eq!(FieldType::optional(FieldType::Int).type_name(), "optional");
        assert_eq!(FieldType::tuple([FieldType::Int]).type_name(), "tuple");
        assert_eq!(FieldType::array(FieldType::String).type_name(), "array");
        assert_eq!(FieldType::object([]).type_name(), "object");
    }
}
