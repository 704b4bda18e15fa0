use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coordinated strategy across government, civil society, and individuals.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintStrategy {
    pub government: GovernmentActions,
    pub society: SocietyActions,
    pub individual: IndividualActions,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GovernmentActions {
    pub policy_changes: Vec<String>,
    pub infrastructure: Vec<String>,
    pub enforcement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SocietyActions {
    pub ngo_role: String,
    pub mobilization_events: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndividualActions {
    pub daily_actions: Vec<String>,
    pub incentives: String,
}
