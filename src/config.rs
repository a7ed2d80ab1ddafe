//! Adapter configuration
//!
//! Controls how a `CurryModel` seeds its accumulator and how strictly it
//! validates incoming values. Derives serde so a host application can embed
//! it in its own configuration file.

use serde::{Deserialize, Serialize};

use crate::schema::ValidationMode;

/// Configuration for a currying adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurryConfig {
    /// Seed the accumulator with schema defaults at construction.
    pub eager: bool,
    /// Coercion policy for incoming values.
    pub mode: ValidationMode,
}

impl Default for CurryConfig {
    fn default() -> Self {
        Self {
            eager: true,
            mode: ValidationMode::Lax,
        }
    }
}

impl CurryConfig {
    /// Defaults are pre-populated.
    pub fn eager() -> Self {
        Self::default()
    }

    /// Every field, defaulted or not, must be supplied explicitly.
    pub fn lazy() -> Self {
        Self {
            eager: false,
            ..Self::default()
        }
    }

    /// Switch to exact type matching.
    pub fn strict(self) -> Self {
        self.with_mode(ValidationMode::Strict)
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }
}
