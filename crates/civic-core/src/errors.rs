//! Cross-cutting error types for Civic Architect.
//!
//! Capability errors (`AnalysisError`) live in `civic-gemini`; this module only
//! covers failures that are decided locally, before or after any network call.

use thiserror::Error;

/// Errors that can be raised by any Civic crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed a local guard (empty policy text, unusable evidence).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup by id returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
