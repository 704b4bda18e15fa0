//! Capability error types.

use thiserror::Error;

/// Errors from the primary analysis call.
///
/// [`AnalysisError::Configuration`] is raised before any network I/O; every
/// other variant means the capability was unreachable or returned something
/// unusable. None of them are retried automatically.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No credential is available for the capability.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The capability answered, but without usable structured output.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl AnalysisError {
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub(crate) fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }
}
