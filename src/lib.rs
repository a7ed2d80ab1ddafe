//! curry-model - Curried, eagerly validated construction of schema-defined models
//!
//! ```ignore
//! let mut curry = CurryModel::<MyModel>::new(true);
//! curry.call([("x", json!("1"))])?;
//! curry.call([("y", json!(2))])?;
//! let model = curry.call([("z", json!(["3", 4]))])?.into_model();
//! ```

pub mod config;
pub mod curry;
pub mod model;
pub mod observability;
pub mod schema;

pub use config::CurryConfig;
pub use curry::{Curried, CurryError, CurryModel, CurryResult, CurryState};
pub use model::{construct_typed, Document, FieldValues, FromFields, Model};
pub use schema::{FieldDef, FieldType, Schema, SchemaError, SchemaValidator, ValidationMode};
