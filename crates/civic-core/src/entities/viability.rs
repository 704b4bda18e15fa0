use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::CostBand;
use crate::errors::CoreError;

/// Budget band and success estimate.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Viability {
    pub cost_band: CostBand,
    pub cost_reasoning: String,
    /// 0-100.
    pub success_probability: u8,
    pub success_factors: Vec<String>,
}

impl Viability {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `success_probability` exceeds 100.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.success_probability > 100 {
            return Err(CoreError::validation(format!(
                "successProbability {} is out of range (expected 0-100)",
                self.success_probability
            )));
        }
        Ok(())
    }
}
