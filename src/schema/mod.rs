//! Schema subsystem
//!
//! A schema is an ordered list of named fields, each with a type rule and an
//! optional default. The validator checks single assignments as they arrive
//! and full records at construction time.
//!
//! # Design Principles
//!
//! - Schemas are immutable once handed to an adapter
//! - Validation never mutates its input; coerced values are returned
//! - Errors always name the offending field path
//! - Deterministic validation

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult, ValidationDetails};
pub use types::{FieldDef, FieldType, Schema, SchemaBuilder};
pub use validator::{SchemaValidator, ValidationMode};
