//! Observability for curried construction
//!
//! The library emits structured `tracing` records and never installs a
//! subscriber; the host application decides where records go.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on validation or construction
//! 3. Every record carries an `event` field naming an [`Event`]
//! 4. Rejections log at WARN, progress at DEBUG, per-field detail at TRACE
//!
//! # Usage
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("curry_model=debug")
//!     .init();
//! ```

mod events;

pub use events::Event;
