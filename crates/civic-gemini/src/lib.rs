//! # civic-gemini
//!
//! HTTP client for the three hosted capabilities Civic Architect relies on:
//! - grounded, schema-constrained policy analysis (`analysis`)
//! - "future state" image generation (`media`)
//! - speech synthesis for narration and stakeholder role-play (`media`)
//!
//! All three are gated by the API credential in [`GeminiConfig`]. Analysis
//! failures surface as [`AnalysisError`]; image and speech are best-effort
//! and degrade to `None`.

pub mod analysis;
pub mod media;
pub mod prompt;
pub mod schema;
pub mod service;
pub mod wire;

mod error;
mod http;

pub use error::AnalysisError;
pub use media::voice_for_group;
pub use service::AnalysisService;

use civic_config::GeminiConfig;

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client for the given configuration.
    ///
    /// The per-request timeout is applied per call (see
    /// [`GeminiConfig::request_timeout`]) so that a timeout of `0` disables it.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("civic-architect/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("reqwest client should build"),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Whether a credential is available for any capability.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(model)
        )
    }

    /// POST a `generateContent` body to `model` and decode the response.
    async fn generate(
        &self,
        model: &str,
        body: &wire::GenerateContentRequest,
    ) -> Result<wire::GenerateContentResponse, AnalysisError> {
        let url = self.endpoint(model);
        let mut request = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.config.api_key.trim())
            .json(body);
        if let Some(timeout) = self.config.request_timeout() {
            request = request.timeout(timeout);
        }

        tracing::debug!(model, "calling generateContent");
        let resp = http::check_response(request.send().await?).await?;
        Ok(resp.json().await?)
    }
}
