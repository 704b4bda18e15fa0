//! The capability seam the session layer is written against.

use async_trait::async_trait;
use civic_core::entities::{PolicyAnalysis, Stakeholder};
use civic_core::media::{AudioBuffer, GeneratedImage};
use civic_core::request::AnalysisRequest;

use crate::{AnalysisError, GeminiClient};

/// Analysis, image, and speech capabilities.
///
/// [`GeminiClient`] is the production implementation; tests substitute
/// scripted services to control ordering and timing.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Run the structured analysis.
    ///
    /// The returned analysis carries a fresh id and creation timestamp.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<PolicyAnalysis, AnalysisError>;

    /// Render the visualization prompt. `None` on any failure.
    async fn generate_image(&self, prompt: &str) -> Option<GeneratedImage>;

    /// Read text aloud. `None` on any failure.
    async fn generate_speech(&self, text: &str) -> Option<AudioBuffer>;

    /// Role-play a stakeholder's concern. `None` on any failure.
    async fn generate_stakeholder_speech(&self, stakeholder: &Stakeholder) -> Option<AudioBuffer>;
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<PolicyAnalysis, AnalysisError> {
        Self::analyze(self, request).await
    }

    async fn generate_image(&self, prompt: &str) -> Option<GeneratedImage> {
        Self::generate_image(self, prompt).await
    }

    async fn generate_speech(&self, text: &str) -> Option<AudioBuffer> {
        Self::generate_speech(self, text).await
    }

    async fn generate_stakeholder_speech(&self, stakeholder: &Stakeholder) -> Option<AudioBuffer> {
        Self::generate_stakeholder_speech(self, stakeholder).await
    }
}
