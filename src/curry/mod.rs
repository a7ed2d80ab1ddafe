//! Currying adapter subsystem
//!
//! Supplies a model's fields across several calls. Each assignment is
//! validated as it arrives; the model is built once the last field lands.

mod adapter;
mod errors;

pub use adapter::{Curried, CurryModel, CurryState};
pub use errors::{CurryError, CurryResult};
