//! Entity structs for the Civic Architect report.
//!
//! Every struct serializes with camelCase field names, matching both the
//! structured-output schema sent to the reasoning capability and the JSON
//! export format. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod analysis;
mod blueprint;
mod citations;
mod diagnosis;
mod evidence;
mod stakeholder;
mod timeline;
mod viability;

pub use analysis::PolicyAnalysis;
pub use blueprint::{BlueprintStrategy, GovernmentActions, IndividualActions, SocietyActions};
pub use citations::{NewsArticle, ResearchPaper, Source};
pub use diagnosis::{Diagnosis, HistoricalPrecedent};
pub use evidence::{Evidence, EvidenceAnalysis};
pub use stakeholder::Stakeholder;
pub use timeline::TimelineEvent;
pub use viability::Viability;
