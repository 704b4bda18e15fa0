//! Opaque identifiers for analysis runs.

/// Generate a fresh, session-unique analysis id (UUID v4, hyphenated).
#[must_use]
pub fn new_analysis_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
