//! Errors raised by the currying adapter

use thiserror::Error;

use crate::schema::{SchemaError, ValidationDetails};

/// Result type for adapter operations
pub type CurryResult<T> = Result<T, CurryError>;

/// Currying adapter errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurryError {
    /// A supplied field was unknown or its value invalid
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Every field was present but the model refused them
    #[error("failed to construct '{model}': {reason}")]
    Construction { model: String, reason: String },

    /// The model was already produced by an earlier call
    #[error("'{model}' was already constructed; the adapter accepts no further fields")]
    AlreadyComplete { model: String },
}

impl CurryError {
    pub fn construction(model: impl Into<String>, reason: impl Into<String>) -> Self {
        CurryError::Construction {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CurryError::Schema(e) => e.code(),
            CurryError::Construction { .. } => "CURRY_CONSTRUCTION_FAILED",
            CurryError::AlreadyComplete { .. } => "CURRY_ALREADY_COMPLETE",
        }
    }

    /// Returns the offending field path, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CurryError::Schema(e) => e.field(),
            _ => None,
        }
    }

    /// Returns validation details for a rejected value
    pub fn details(&self) -> Option<&ValidationDetails> {
        match self {
            CurryError::Schema(e) => e.details(),
            _ => None,
        }
    }

    /// Whether the error was caused by an unrecognized field name
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, CurryError::Schema(SchemaError::UnknownField { .. }))
    }
}
