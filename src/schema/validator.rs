//! Field and record validation against a schema
//!
//! Validation semantics:
//! - Every assigned field must be declared by the schema
//! - Values must match the field type, after coercion in lax mode
//! - Null is only accepted by `optional` and `any`
//! - Nested objects fill defaulted sub-fields and reject undeclared ones
//!
//! The validator never mutates its input; coerced values are returned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldDef, FieldType, Schema};

/// How strictly values are matched against field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Coerce obviously equivalent values (numeric strings, integral floats, ...)
    #[default]
    Lax,
    /// Exact JSON types only; integers are still valid floats
    Strict,
}

/// Validates single assignments and full records against one schema.
pub struct SchemaValidator<'a> {
    schema: &'a Schema,
    mode: ValidationMode,
}

impl<'a> SchemaValidator<'a> {
    /// Creates a new validator for the given schema.
    pub fn new(schema: &'a Schema, mode: ValidationMode) -> Self {
        Self { schema, mode }
    }

    /// Validates one assignment, returning the (possibly coerced) value.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if `field` is not declared by the schema
    /// - `InvalidValue` if `value` does not satisfy the field type
    pub fn validate_field(&self, field: &str, value: Value) -> SchemaResult<Value> {
        let def = self
            .schema
            .field(field)
            .ok_or_else(|| SchemaError::unknown_field(field))?;
        self.validate_value(value, &def.field_type, field)
    }

    /// Validates a full record: every declared field present, nothing extra.
    ///
    /// Returns the coerced record.
    pub fn validate_record(&self, record: &Map<String, Value>) -> SchemaResult<Map<String, Value>> {
        if let Some(extra) = record.keys().find(|k| !self.schema.contains(k)) {
            return Err(SchemaError::unknown_field(extra.as_str()));
        }

        let mut validated = Map::new();
        for def in &self.schema.fields {
            let value = record
                .get(&def.name)
                .ok_or_else(|| SchemaError::missing_field(def.name.as_str()))?;
            let value = self.validate_value(value.clone(), &def.field_type, &def.name)?;
            validated.insert(def.name.clone(), value);
        }
        Ok(validated)
    }

    fn validate_value(&self, value: Value, expected: &FieldType, path: &str) -> SchemaResult<Value> {
        match expected {
            FieldType::Any => Ok(value),
            FieldType::Optional { inner } => {
                if value.is_null() {
                    Ok(Value::Null)
                } else {
                    self.validate_value(value, inner, path)
                }
            }
            _ if value.is_null() => Err(SchemaError::InvalidValue(
                ValidationDetails::null_value(path),
            )),
            FieldType::String => match value {
                Value::String(_) => Ok(value),
                other => Err(type_error(path, expected, &other)),
            },
            FieldType::Int => self.coerce_int(value, path),
            FieldType::Float => self.coerce_float(value, path),
            FieldType::Bool => self.coerce_bool(value, path),
            FieldType::Tuple { elements } => {
                let items = match value {
                    Value::Array(items) => items,
                    other => return Err(type_error(path, expected, &other)),
                };
                if items.len() != elements.len() {
                    return Err(SchemaError::InvalidValue(ValidationDetails::wrong_length(
                        path,
                        elements.len(),
                        items.len(),
                    )));
                }
                items
                    .into_iter()
                    .zip(elements)
                    .enumerate()
                    .map(|(i, (item, t))| self.validate_value(item, t, &format!("{}[{}]", path, i)))
                    .collect::<SchemaResult<Vec<_>>>()
                    .map(Value::Array)
            }
            FieldType::Array { element_type } => {
                let items = match value {
                    Value::Array(items) => items,
                    other => return Err(type_error(path, expected, &other)),
                };
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.validate_value(item, element_type, &format!("{}[{}]", path, i))
                    })
                    .collect::<SchemaResult<Vec<_>>>()
                    .map(Value::Array)
            }
            FieldType::Object { fields } => match value {
                Value::Object(obj) => self.validate_object(obj, fields, path).map(Value::Object),
                other => Err(type_error(path, expected, &other)),
            },
        }
    }

    fn validate_object(
        &self,
        mut obj: Map<String, Value>,
        fields: &[FieldDef],
        path: &str,
    ) -> SchemaResult<Map<String, Value>> {
        if let Some(extra) = obj.keys().find(|k| !fields.iter().any(|f| &f.name == *k)) {
            return Err(SchemaError::unknown_field(make_path(path, extra)));
        }

        let mut validated = Map::new();
        for def in fields {
            let field_path = make_path(path, &def.name);
            let value = match (obj.remove(&def.name), &def.default) {
                (Some(value), _) => self.validate_value(value, &def.field_type, &field_path)?,
                (None, Some(default)) => default.clone(),
                (None, None) => return Err(SchemaError::missing_field(field_path)),
            };
            validated.insert(def.name.clone(), value);
        }
        Ok(validated)
    }

    fn coerce_int(&self, value: Value, path: &str) -> SchemaResult<Value> {
        // u64 values above i64::MAX are out of range
        if value.is_i64() {
            return Ok(value);
        }
        if self.mode == ValidationMode::Lax {
            match &value {
                Value::Number(n) => {
                    if let Some(f) = n.as_f64() {
                        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                            return Ok(Value::from(f as i64));
                        }
                    }
                }
                Value::String(s) => {
                    if let Ok(i) = s.trim().parse::<i64>() {
                        return Ok(Value::from(i));
                    }
                }
                _ => {}
            }
        }
        Err(type_error(path, &FieldType::Int, &value))
    }

    fn coerce_float(&self, value: Value, path: &str) -> SchemaResult<Value> {
        // Integers are accepted as floats in both modes
        if value.is_number() {
            return Ok(value);
        }
        if self.mode == ValidationMode::Lax {
            if let Value::String(s) = &value {
                if let Some(n) = s.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                    return Ok(Value::Number(n));
                }
            }
        }
        Err(type_error(path, &FieldType::Float, &value))
    }

    fn coerce_bool(&self, value: Value, path: &str) -> SchemaResult<Value> {
        if value.is_boolean() {
            return Ok(value);
        }
        if self.mode == ValidationMode::Lax {
            let coerced = match &value {
                Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => Some(true),
                    "false" | "no" | "off" | "0" => Some(false),
                    _ => None,
                },
                Value::Number(n) => match n.as_i64() {
                    Some(1) => Some(true),
                    Some(0) => Some(false),
                    _ => None,
                },
                _ => None,
            };
            if let Some(b) = coerced {
                return Ok(Value::Bool(b));
            }
        }
        Err(type_error(path, &FieldType::Bool, &value))
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() {
                "int"
            } else if n.is_u64() {
                "u64"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Creates a type mismatch error.
fn type_error(field_path: &str, expected: &FieldType, actual: &Value) -> SchemaError {
    SchemaError::InvalidValue(ValidationDetails::type_mismatch(
        field_path,
        expected.type_name(),
        json_type_name(actual),
    ))
}
