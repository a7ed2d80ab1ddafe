//! Observable events for curried construction
//!
//! Events are explicit and typed. Their string form is what appears in the
//! `event` field of every `tracing` record the adapter emits.

use std::fmt;

/// Observable events in an adapter's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Adapter created and accumulator seeded
    CurryCreated,
    /// One field passed validation and was staged
    FieldAccepted,
    /// One field failed validation; the call was rejected
    FieldRejected,
    /// Call committed but fields are still missing
    CurryPending,
    /// All fields present and the model was built
    ModelConstructed,
    /// All fields present but the model refused them
    ConstructionFailed,
    /// Call made after the model was already produced
    CallAfterComplete,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::CurryCreated => "CURRY_CREATED",
            Event::FieldAccepted => "FIELD_ACCEPTED",
            Event::FieldRejected => "FIELD_REJECTED",
            Event::CurryPending => "CURRY_PENDING",
            Event::ModelConstructed => "MODEL_CONSTRUCTED",
            Event::ConstructionFailed => "CONSTRUCTION_FAILED",
            Event::CallAfterComplete => "CALL_AFTER_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
