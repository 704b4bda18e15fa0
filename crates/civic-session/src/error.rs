//! Session error types.

use civic_core::errors::CoreError;
use civic_gemini::AnalysisError;
use thiserror::Error;

/// Errors returned by the orchestrator and the speech player.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A local guard failed: invalid input, unknown history id, or a
    /// transition the state machine does not allow.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The primary analysis failed. The session is now in the `Error` state.
    #[error("simulation failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// The audio output rejected a buffer.
    #[error("audio output failed: {0}")]
    Sink(String),
}

impl SessionError {
    /// Whether this is a local guard failure that left the session untouched.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Core(_))
    }
}
