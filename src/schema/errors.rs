//! Schema error types
//!
//! Error codes:
//! - SCHEMA_UNKNOWN_FIELD
//! - SCHEMA_FIELD_VALIDATION_FAILED
//! - SCHEMA_MISSING_FIELD
//! - SCHEMA_MALFORMED

use std::fmt;
use thiserror::Error;

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "address.city" or "pair[1]")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn wrong_length(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::new(
            field,
            format!("{} elements", expected),
            format!("{} elements", actual),
        )
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Errors raised while checking schemas and the values assigned to them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field name is not declared by the schema
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// Value violates the field's type rule
    #[error("validation failed: {0}")]
    InvalidValue(ValidationDetails),

    /// Declared field absent from a full record
    #[error("missing field '{field}'")]
    MissingField { field: String },

    /// Schema definition itself is unusable
    #[error("malformed schema: {reason}")]
    Malformed { reason: String },
}

impl SchemaError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        SchemaError::UnknownField {
            field: field.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        SchemaError::MissingField {
            field: field.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownField { .. } => "SCHEMA_UNKNOWN_FIELD",
            SchemaError::InvalidValue(_) => "SCHEMA_FIELD_VALIDATION_FAILED",
            SchemaError::MissingField { .. } => "SCHEMA_MISSING_FIELD",
            SchemaError::Malformed { .. } => "SCHEMA_MALFORMED",
        }
    }

    /// Returns the offending field path, if the error concerns one field
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaError::UnknownField { field } | SchemaError::MissingField { field } => {
                Some(field)
            }
            SchemaError::InvalidValue(details) => Some(&details.field),
            SchemaError::Malformed { .. } => None,
        }
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        match self {
            SchemaError::InvalidValue(details) => Some(details),
            _ => None,
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
