use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PrecedentOutcome;

/// Root-cause analysis separating the systemic issue from its symptoms.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub root_cause: String,
    pub symptoms: Vec<String>,
    pub historical_precedents: Vec<HistoricalPrecedent>,
}

/// A real-world case the model found comparable.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPrecedent {
    /// City/country and year.
    pub case_name: String,
    pub outcome: PrecedentOutcome,
    pub relevance: String,
}
