use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A web source cited by the capability's grounding metadata.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// An academic study the model cites for the diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchPaper {
    pub title: String,
    /// University, research center, or place of study.
    pub institution: String,
    pub year: i32,
    /// Why this research matters to the simulation.
    pub relevance: String,
    pub uri: String,
}

/// A news report describing the public pain point.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    /// Publishing organization.
    pub source: String,
    /// Free-form date string as emitted by the model (e.g. `2024-10-12 14:30`).
    pub date: String,
    pub description: String,
    pub uri: String,
}
