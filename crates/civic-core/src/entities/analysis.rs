use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    BlueprintStrategy, Diagnosis, Evidence, EvidenceAnalysis, NewsArticle, ResearchPaper, Source,
    Stakeholder, TimelineEvent, Viability,
};

/// The result of one successful analysis run.
///
/// Created exactly once per successful call and treated as an immutable value
/// afterwards. A visualization image generated later is tracked by the result
/// store next to the record, never written into it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAnalysis {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub executive_summary: String,
    pub diagnosis: Diagnosis,
    pub blueprint: BlueprintStrategy,
    pub shadow_timeline: Vec<TimelineEvent>,
    pub viability: Viability,
    pub stakeholders: Vec<Stakeholder>,
    pub research_papers: Vec<ResearchPaper>,
    pub news_articles: Vec<NewsArticle>,
    pub visualization_prompt: String,
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_analysis: Option<EvidenceAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_evidence: Option<Evidence>,
    pub raw_input: String,
}

impl PolicyAnalysis {
    /// The visualization prompt, if the model produced a usable one.
    #[must_use]
    pub fn visualization_prompt(&self) -> Option<&str> {
        let prompt = self.visualization_prompt.trim();
        (!prompt.is_empty()).then_some(prompt)
    }

    /// Stakeholders sorted by influence, strongest first. Ties keep emission order.
    #[must_use]
    pub fn stakeholders_by_influence(&self) -> Vec<&Stakeholder> {
        let mut ranked: Vec<&Stakeholder> = self.stakeholders.iter().collect();
        ranked.sort_by(|a, b| b.influence.cmp(&a.influence));
        ranked
    }
}
