use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ImpactType, RiskLevel};
use crate::errors::CoreError;

/// One step of the simulated shadow timeline.
///
/// Sequence order is the model's emission order; chronology is a convention
/// of the prompt, not something this type enforces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Years into the future (e.g. 2, 5, 10, 20).
    pub year_offset: u32,
    pub scenario_description: String,
    pub impact_type: ImpactType,
    pub risk_level: RiskLevel,
}

impl TimelineEvent {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `year_offset` is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.year_offset == 0 {
            return Err(CoreError::validation(
                "timeline event has yearOffset 0 (expected a positive integer)",
            ));
        }
        Ok(())
    }
}
