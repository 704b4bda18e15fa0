//! Pretty-printed JSON export of a single analysis.
//!
//! Nothing is stripped: the export is the record, and reading it back yields
//! an equal value.

use std::path::Path;

use civic_core::entities::PolicyAnalysis;

use crate::ReportError;

/// Serialize `analysis` as indented JSON.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if serialization fails.
pub fn to_json(analysis: &PolicyAnalysis) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Parse a previously exported analysis.
///
/// # Errors
///
/// Returns [`ReportError::Json`] if `text` is not a valid analysis record.
pub fn from_json(text: &str) -> Result<PolicyAnalysis, ReportError> {
    Ok(serde_json::from_str(text)?)
}

/// Write the JSON export to `path`.
///
/// # Errors
///
/// Returns [`ReportError`] on serialization or I/O failure.
pub fn write_json(analysis: &PolicyAnalysis, path: &Path) -> Result<(), ReportError> {
    let text = to_json(analysis)?;
    std::fs::write(path, text).map_err(|e| ReportError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote JSON export");
    Ok(())
}

/// Read a JSON export from `path`.
///
/// # Errors
///
/// Returns [`ReportError`] if the file cannot be read or parsed.
pub fn read_json(path: &Path) -> Result<PolicyAnalysis, ReportError> {
    let text = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    from_json(&text)
}

#[cfg(test)]
mod tests {
    use civic_core::testing::sample_analysis;

    use super::*;

    #[test]
    fn export_is_indented() {
        let text = to_json(&sample_analysis("a-1", "Bag Ban")).unwrap();
        assert!(text.starts_with("{\n  \"id\": \"a-1\""));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(from_json("{\"id\": 1}"), Err(ReportError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
