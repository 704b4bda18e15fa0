use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Sentiment;
use crate::errors::CoreError;

/// A group, institution, or leader with a stake in the policy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub group: String,
    pub sentiment: Sentiment,
    /// Primary motivation or fear, first person.
    pub concern: String,
    /// Power level, 0-100.
    pub influence: u8,
    pub required_actions: Vec<String>,
}

impl Stakeholder {
    pub const MAX_INFLUENCE: u8 = 100;

    /// Check value ranges the schema cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `influence` exceeds 100.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.influence > Self::MAX_INFLUENCE {
            return Err(CoreError::validation(format!(
                "stakeholder '{}' has influence {} (expected 0-100)",
                self.group, self.influence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stakeholder(influence: u8) -> Stakeholder {
        Stakeholder {
            group: "Local Unions".into(),
            sentiment: Sentiment::Mixed,
            concern: "We worry about job losses.".into(),
            influence,
            required_actions: vec!["Negotiate retraining".into()],
        }
    }

    #[test]
    fn influence_bounds() {
        assert!(stakeholder(0).validate().is_ok());
        assert!(stakeholder(100).validate().is_ok());
        assert!(matches!(
            stakeholder(101).validate(),
            Err(CoreError::Validation(_))
        ));
    }
}
