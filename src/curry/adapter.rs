//! The currying adapter.
//!
//! `CurryModel<M>` accumulates field assignments across calls, validating
//! each one as it arrives, and builds `M` once the accumulated key set equals
//! the schema's field set.
//!
//! State machine:
//!
//! ```text
//!   Incomplete --call (fields missing)--> Incomplete
//!   Incomplete --call (all fields)------> Complete   (emits M)
//!   Complete   --call-----------------> error, no change
//! ```
//!
//! Each call is atomic with respect to field validation: if any pair fails,
//! nothing from that call is committed. A construction failure happens after
//! the commit, so the call's fields stay in the accumulator.

use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

use super::errors::{CurryError, CurryResult};
use crate::config::CurryConfig;
use crate::model::{FieldValues, FromFields, Model};
use crate::observability::Event;
use crate::schema::{Schema, SchemaValidator};

/// Lifecycle state of an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurryState {
    /// Still accepting fields
    Incomplete,
    /// Model produced; terminal
    Complete,
}

/// Outcome of a successful [`CurryModel::call`].
#[derive(Debug)]
pub enum Curried<'a, M: FromFields> {
    /// Fields are still missing; the same adapter is handed back
    Partial(&'a mut CurryModel<M>),
    /// Every field was present and the model was built
    Complete(M),
}

impl<'a, M: FromFields> Curried<'a, M> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Curried::Complete(_))
    }

    /// The constructed model, if this call completed it
    pub fn into_model(self) -> Option<M> {
        match self {
            Curried::Complete(model) => Some(model),
            Curried::Partial(_) => None,
        }
    }

    /// The adapter, if more fields are needed
    pub fn into_partial(self) -> Option<&'a mut CurryModel<M>> {
        match self {
            Curried::Partial(adapter) => Some(adapter),
            Curried::Complete(_) => None,
        }
    }

    /// Supplies more fields to a partial adapter.
    ///
    /// Chaining past completion fails with `AlreadyComplete`.
    pub fn and_call<I, K>(self, kwargs: I) -> CurryResult<Curried<'a, M>>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        match self {
            Curried::Partial(adapter) => adapter.call(kwargs),
            Curried::Complete(_) => Err(CurryError::AlreadyComplete {
                model: std::any::type_name::<M>().to_string(),
            }),
        }
    }
}

/// Currying adapter over a model constructor.
pub struct CurryModel<M: FromFields> {
    schema: Schema,
    config: CurryConfig,
    accumulated: FieldValues,
    state: CurryState,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> CurryModel<M> {
    /// Creates an adapter for `M` with lax validation.
    pub fn new(eager: bool) -> Self {
        let config = if eager {
            CurryConfig::eager()
        } else {
            CurryConfig::lazy()
        };
        Self::with_config(config)
    }

    pub fn with_config(config: CurryConfig) -> Self {
        Self::from_schema(M::schema(), config)
    }
}

impl<M: Model> Default for CurryModel<M> {
    fn default() -> Self {
        Self::with_config(CurryConfig::default())
    }
}

impl<M: FromFields> CurryModel<M> {
    /// Creates an adapter over an explicit schema.
    ///
    /// No validation happens here; defaults are taken as given.
    pub fn from_schema(schema: Schema, config: CurryConfig) -> Self {
        let accumulated: FieldValues = if config.eager {
            schema
                .defaults()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect()
        } else {
            FieldValues::new()
        };

        tracing::debug!(
            event = %Event::CurryCreated,
            model = %schema.name,
            eager = config.eager,
            seeded = accumulated.len(),
            "curry adapter created"
        );

        Self {
            schema,
            config,
            accumulated,
            state: CurryState::Incomplete,
            _model: PhantomData,
        }
    }

    /// Supplies a batch of field assignments.
    ///
    /// Returns [`Curried::Complete`] with the built model once every schema
    /// field has a value, otherwise [`Curried::Partial`] with this adapter.
    ///
    /// # Errors
    ///
    /// - `Schema(UnknownField)` / `Schema(InvalidValue)` for the first bad pair;
    ///   nothing from this call is committed
    /// - `Construction` if the model rejects the complete field set, including
    ///   a failed full-record check; this call's fields stay committed and the
    ///   adapter stays incomplete so a field can be overwritten
    /// - `AlreadyComplete` if the model was already produced
    pub fn call<I, K>(&mut self, kwargs: I) -> CurryResult<Curried<'_, M>>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        if self.state == CurryState::Complete {
            tracing::warn!(
                event = %Event::CallAfterComplete,
                model = %self.schema.name,
                "call on completed adapter"
            );
            return Err(CurryError::AlreadyComplete {
                model: self.schema.name.clone(),
            });
        }

        let staged = self.stage(kwargs)?;
        self.accumulated.extend(staged);

        if !self.is_satisfied() {
            tracing::debug!(
                event = %Event::CurryPending,
                model = %self.schema.name,
                missing = ?self.missing_fields(),
                "fields still missing"
            );
            return Ok(Curried::Partial(self));
        }

        match M::from_fields(&self.schema, self.accumulated.clone()) {
            Ok(model) => {
                self.state = CurryState::Complete;
                tracing::debug!(
                    event = %Event::ModelConstructed,
                    model = %self.schema.name,
                    "model constructed"
                );
                Ok(Curried::Complete(model))
            }
            Err(e) => {
                tracing::warn!(
                    event = %Event::ConstructionFailed,
                    model = %self.schema.name,
                    error = %e,
                    "model construction failed"
                );
                Err(e)
            }
        }
    }

    /// Validates every pair before anything is committed.
    fn stage<I, K>(&self, kwargs: I) -> CurryResult<Vec<(String, Value)>>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let validator = SchemaValidator::new(&self.schema, self.config.mode);
        let mut staged = Vec::new();

        for (field, value) in kwargs {
            let field = field.into();
            match validator.validate_field(&field, value) {
                Ok(value) => {
                    tracing::trace!(
                        event = %Event::FieldAccepted,
                        model = %self.schema.name,
                        field = %field,
                        "field accepted"
                    );
                    staged.push((field, value));
                }
                Err(e) => {
                    tracing::warn!(
                        event = %Event::FieldRejected,
                        model = %self.schema.name,
                        field = %field,
                        error = %e,
                        "field rejected"
                    );
                    return Err(e.into());
                }
            }
        }
        Ok(staged)
    }

    /// Accumulated key set equals the schema field set.
    fn is_satisfied(&self) -> bool {
        self.accumulated.len() == self.schema.len()
            && self
                .schema
                .field_names()
                .all(|name| self.accumulated.contains_key(name))
    }

    /// Field values accumulated so far
    pub fn accumulated(&self) -> &FieldValues {
        &self.accumulated
    }

    /// Schema fields not yet assigned, in declaration order
    pub fn missing_fields(&self) -> Vec<&str> {
        self.schema
            .field_names()
            .filter(|name| !self.accumulated.contains_key(*name))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.state == CurryState::Complete
    }

    pub fn state(&self) -> CurryState {
        self.state
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &CurryConfig {
        &self.config
    }
}

impl<M: FromFields> fmt::Debug for CurryModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurryModel")
            .field("model", &self.schema.name)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("accumulated", &self.accumulated)
            .finish()
    }
}

impl<M: FromFields> fmt::Display for CurryModel<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CurryModel object {}",
            Value::Object(self.accumulated.clone())
        )
    }
}
