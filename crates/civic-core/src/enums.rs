//! Report enums and the application state machine.
//!
//! Report enums serialize with the exact spellings used by the structured-output
//! schema (`"Economic"`, `"Mega-Project"`, `"pdf"`), so the same types parse model
//! output and round-trip through JSON export. [`AppState`] provides
//! `allowed_next_states()` to enforce valid transitions in the orchestrator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ImpactType
// ---------------------------------------------------------------------------

/// Domain a shadow-timeline event mostly affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ImpactType {
    Economic,
    Social,
    Environmental,
    Trust,
}

impl ImpactType {
    pub const ALL: [Self; 4] = [
        Self::Economic,
        Self::Social,
        Self::Environmental,
        Self::Trust,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economic => "Economic",
            Self::Social => "Social",
            Self::Environmental => "Environmental",
            Self::Trust => "Trust",
        }
    }
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Severity attached to a shadow-timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RiskLevel {
    Critical,
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Moderate, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// A stakeholder group's stance towards the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl Sentiment {
    pub const ALL: [Self; 4] = [Self::Positive, Self::Neutral, Self::Negative, Self::Mixed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PrecedentOutcome
// ---------------------------------------------------------------------------

/// How a historical precedent turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PrecedentOutcome {
    Success,
    Failure,
    Mixed,
}

impl PrecedentOutcome {
    pub const ALL: [Self; 3] = [Self::Success, Self::Failure, Self::Mixed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for PrecedentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CostBand
// ---------------------------------------------------------------------------

/// Rough budget band for implementing the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CostBand {
    Low,
    Medium,
    High,
    #[serde(rename = "Mega-Project")]
    MegaProject,
}

impl CostBand {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::MegaProject];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::MegaProject => "Mega-Project",
        }
    }
}

impl fmt::Display for CostBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceMediaType
// ---------------------------------------------------------------------------

/// Media kind the model reports for the audited evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceMediaType {
    Image,
    Video,
    Pdf,
    None,
}

impl EvidenceMediaType {
    pub const ALL: [Self; 4] = [Self::Image, Self::Video, Self::Pdf, Self::None];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::None => "none",
        }
    }

    /// Classify a MIME type the way the evidence encoder accepts it.
    #[must_use]
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else if mime_type.starts_with("video/") {
            Self::Video
        } else if mime_type == "application/pdf" {
            Self::Pdf
        } else {
            Self::None
        }
    }
}

impl fmt::Display for EvidenceMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Top-level view state of one analysis session.
///
/// ```text
/// idle → analyzing → results
///                  → error
/// results | error → idle            (reset)
/// idle | results | error → results  (select history)
/// idle | results | error → about    (show about)
/// about → idle | results
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    Idle,
    Analyzing,
    Results,
    Error,
    About,
}

impl AppState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Analyzing, Self::Results, Self::About],
            Self::Analyzing => &[Self::Results, Self::Error],
            Self::Results | Self::Error => &[Self::Idle, Self::Results, Self::About],
            Self::About => &[Self::Idle, Self::Results],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Analyzing => "analyzing",
            Self::Results => "results",
            Self::Error => "error",
            Self::About => "about",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
