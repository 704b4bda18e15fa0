use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceMediaType;

/// User-supplied media attached to an analysis request.
///
/// `data` holds the file bytes base64-encoded (standard alphabet, padded).
/// Produced by [`crate::encoder::EvidenceDraft::finish`]; immutable once a
/// request owns it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub filename: String,
    pub mime_type: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Evidence {
    #[must_use]
    pub fn media_type(&self) -> EvidenceMediaType {
        EvidenceMediaType::from_mime(&self.mime_type)
    }

    /// `data:` URI suitable for embedding an image preview.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The model's forensic audit of the attached evidence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceAnalysis {
    pub media_type: EvidenceMediaType,
    /// What the model sees in the media.
    pub visual_context: String,
    pub detected_risks: Vec<String>,
    /// Movement and flow patterns; only meaningful for video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavioral_patterns: Option<Vec<String>>,
}
