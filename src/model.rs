//! Model construction
//!
//! A model is anything that can be built from a complete, validated set of
//! field values. Typed models additionally bind a static schema through
//! [`Model`]; schemas known only at runtime use [`Document`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;

use crate::curry::{CurryError, CurryResult};
use crate::schema::{Schema, SchemaValidator, ValidationMode};

/// Field name to value mapping handed to constructors.
pub type FieldValues = Map<String, Value>;

/// Builds an instance from a full set of field values.
pub trait FromFields: Sized {
    /// Construct from `fields`, which cover exactly the schema's field set.
    fn from_fields(schema: &Schema, fields: FieldValues) -> CurryResult<Self>;
}

/// A typed model with a schema known at compile time.
pub trait Model: FromFields {
    fn schema() -> Schema;
}

/// Validates the full record, then deserializes it into `T`.
///
/// Typed models implement [`FromFields`] by delegating here.
pub fn construct_typed<T: DeserializeOwned>(schema: &Schema, fields: FieldValues) -> CurryResult<T> {
    let validated = validate_for_construction(schema, &fields)?;
    serde_json::from_value(Value::Object(validated))
        .map_err(|e| CurryError::construction(schema.name.as_str(), e.to_string()))
}

/// Full-record check; any failure is a construction failure.
fn validate_for_construction(schema: &Schema, fields: &FieldValues) -> CurryResult<FieldValues> {
    SchemaValidator::new(schema, ValidationMode::Strict)
        .validate_record(fields)
        .map_err(|e| CurryError::construction(schema.name.as_str(), e.to_string()))
}

/// A dynamically typed model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    model: String,
    values: FieldValues,
}

impl Document {
    /// Name of the schema this document was built from
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Converts the document into a JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

impl FromFields for Document {
    fn from_fields(schema: &Schema, fields: FieldValues) -> CurryResult<Self> {
        // Values arrive already coerced, so strict revalidation is idempotent
        let values = validate_for_construction(schema, &fields)?;
        Ok(Document {
            model: schema.name.clone(),
            values,
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.model)?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}
