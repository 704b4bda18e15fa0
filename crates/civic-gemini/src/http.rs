//! Status handling for `generateContent` responses.
//!
//! Gemini reports failures as `{"error": {"code", "message", "status"}}`.
//! The message is lifted out of that envelope so errors read as the API
//! wrote them; any other body is kept verbatim.

use serde::Deserialize;

use crate::error::AnalysisError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Pass a successful response through, or turn the failure into an
/// [`AnalysisError`]: [`AnalysisError::RateLimited`] for 429,
/// [`AnalysisError::Api`] for every other non-success status.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, AnalysisError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(AnalysisError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(AnalysisError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody {
                message,
                status: Some(status),
            },
        }) => format!("{status}: {message}"),
        Ok(ErrorEnvelope { error }) => error.message,
        Err(_) => body.trim().to_string(),
    }
}
