//! The validated input of one analysis run.

use serde::Serialize;

use crate::entities::Evidence;
use crate::errors::CoreError;

/// Policy text, optional geography, and optional evidence, checked before submission.
///
/// Construction is the submission guard: a request with empty or
/// whitespace-only policy text cannot exist, so it can never reach the
/// reasoning capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    policy_text: String,
    geography: Option<String>,
    evidence: Option<Evidence>,
}

impl AnalysisRequest {
    /// Validate and build a request.
    ///
    /// An empty or whitespace-only `geography` is treated as absent. The policy
    /// text is kept verbatim (it is echoed back as `rawInput`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `policy_text` is blank, or if the
    /// evidence has an empty MIME type or no data.
    pub fn new(
        policy_text: impl Into<String>,
        geography: Option<String>,
        evidence: Option<Evidence>,
    ) -> Result<Self, CoreError> {
        let policy_text = policy_text.into();
        if policy_text.trim().is_empty() {
            return Err(CoreError::validation("policy text must not be empty"));
        }

        if let Some(evidence) = &evidence {
            if evidence.mime_type.trim().is_empty() {
                return Err(CoreError::validation(format!(
                    "evidence '{}' has no MIME type",
                    evidence.filename
                )));
            }
            if evidence.data.is_empty() {
                return Err(CoreError::validation(format!(
                    "evidence '{}' has no data",
                    evidence.filename
                )));
            }
        }

        let geography = geography
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        Ok(Self {
            policy_text,
            geography,
            evidence,
        })
    }

    #[must_use]
    pub fn policy_text(&self) -> &str {
        &self.policy_text
    }

    #[must_use]
    pub fn geography(&self) -> Option<&str> {
        self.geography.as_deref()
    }

    #[must_use]
    pub const fn evidence(&self) -> Option<&Evidence> {
        self.evidence.as_ref()
    }
}
