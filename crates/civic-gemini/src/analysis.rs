//! Grounded structured analysis.

use chrono::Utc;
use civic_core::entities::{
    BlueprintStrategy, Diagnosis, EvidenceAnalysis, NewsArticle, PolicyAnalysis, ResearchPaper,
    Stakeholder, TimelineEvent, Viability,
};
use civic_core::ids::new_analysis_id;
use civic_core::request::AnalysisRequest;
use serde::Deserialize;

use crate::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    ThinkingConfig, Tool,
};
use crate::{AnalysisError, GeminiClient, prompt, schema};

/// The model-authored part of a [`PolicyAnalysis`].
///
/// Every field in [`schema::REQUIRED_FIELDS`] is non-optional here, so a
/// response that omits one fails to deserialize.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    title: String,
    executive_summary: String,
    diagnosis: Diagnosis,
    blueprint: BlueprintStrategy,
    shadow_timeline: Vec<TimelineEvent>,
    viability: Viability,
    stakeholders: Vec<Stakeholder>,
    research_papers: Vec<ResearchPaper>,
    news_articles: Vec<NewsArticle>,
    visualization_prompt: String,
    #[serde(default)]
    evidence_analysis: Option<EvidenceAnalysis>,
}

impl AnalysisPayload {
    fn validate(&self) -> Result<(), civic_core::errors::CoreError> {
        self.viability.validate()?;
        for event in &self.shadow_timeline {
            event.validate()?;
        }
        for stakeholder in &self.stakeholders {
            stakeholder.validate()?;
        }
        Ok(())
    }
}

/// Strip a Markdown code fence some models wrap JSON output in.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

/// Build the `generateContent` body for an analysis request.
///
/// Evidence, when attached, goes in as an inline part ahead of the prompt
/// text.
#[must_use]
pub fn build_analysis_request(
    request: &AnalysisRequest,
    thinking_budget: u32,
) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    if let Some(evidence) = request.evidence() {
        parts.push(Part::inline(&evidence.mime_type, &evidence.data));
    }
    parts.push(Part::text(prompt::analysis_prompt(request)));

    GenerateContentRequest {
        contents: vec![Content { parts }],
        tools: vec![Tool::google_search()],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(schema::analysis_schema()),
            thinking_config: Some(ThinkingConfig { thinking_budget }),
            ..GenerationConfig::default()
        }),
    }
}

/// Turn a raw response into a stamped, validated [`PolicyAnalysis`].
///
/// Sources come from the response's grounding metadata (web chunks only, in
/// emission order). The request's evidence and policy text are echoed as
/// `input_evidence` and `raw_input`.
///
/// # Errors
///
/// Returns [`AnalysisError::Upstream`] if the response carries no text, the
/// text is not JSON matching the analysis contract, or a value is out of
/// range.
pub fn map_analysis_response(
    response: &GenerateContentResponse,
    request: &AnalysisRequest,
) -> Result<PolicyAnalysis, AnalysisError> {
    let text = response
        .text()
        .ok_or_else(|| AnalysisError::upstream(response.empty_reason()))?;

    let payload: AnalysisPayload = serde_json::from_str(strip_code_fence(&text))
        .map_err(|e| AnalysisError::upstream(format!("malformed analysis payload: {e}")))?;
    payload
        .validate()
        .map_err(|e| AnalysisError::upstream(e.to_string()))?;

    Ok(PolicyAnalysis {
        id: new_analysis_id(),
        created_at: Utc::now(),
        title: payload.title,
        executive_summary: payload.executive_summary,
        diagnosis: payload.diagnosis,
        blueprint: payload.blueprint,
        shadow_timeline: payload.shadow_timeline,
        viability: payload.viability,
        stakeholders: payload.stakeholders,
        research_papers: payload.research_papers,
        news_articles: payload.news_articles,
        visualization_prompt: payload.visualization_prompt,
        sources: response.grounding_sources(),
        evidence_analysis: payload.evidence_analysis,
        input_evidence: request.evidence().cloned(),
        raw_input: request.policy_text().to_string(),
    })
}

impl GeminiClient {
    /// Run the grounded, schema-constrained analysis.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] without any network I/O when
    /// no credential is configured, and the transport, status, or
    /// [`AnalysisError::Upstream`] errors of the call otherwise.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<PolicyAnalysis, AnalysisError> {
        if !self.is_configured() {
            return Err(AnalysisError::Configuration(
                "no API key configured (set GEMINI_API_KEY)".into(),
            ));
        }

        let body = build_analysis_request(request, self.config.thinking_budget);
        let response = self.generate(&self.config.analysis_model, &body).await?;
        let analysis = map_analysis_response(&response, request)?;
        tracing::info!(
            id = %analysis.id,
            title = %analysis.title,
            sources = analysis.sources.len(),
            "analysis complete"
        );
        Ok(analysis)
    }
}
