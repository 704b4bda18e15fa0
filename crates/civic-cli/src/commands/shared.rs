use std::path::{Path, PathBuf};

use anyhow::Context;
use civic_core::entities::{PolicyAnalysis, Stakeholder};
use civic_core::media::GeneratedImage;
use civic_session::SessionError;
use serde::Serialize;

/// A file written by a command.
#[derive(Debug, Serialize)]
pub struct WrittenFile {
    pub kind: &'static str,
    pub path: PathBuf,
}

/// Read a saved JSON analysis.
pub fn load_analysis(path: &Path) -> anyhow::Result<PolicyAnalysis> {
    civic_report::read_json(path)
        .with_context(|| format!("failed to load analysis from {}", path.display()))
}

/// Convert a session error, adding a setup hint when the credential is missing.
pub fn explain(error: SessionError) -> anyhow::Error {
    let missing_key = matches!(&error, SessionError::Analysis(e) if e.is_configuration());
    let error = anyhow::Error::new(error);
    if missing_key {
        error.context("set GEMINI_API_KEY (or CIVIC_GEMINI__API_KEY) to run simulations")
    } else {
        error
    }
}

/// Stakeholder by its 1-based position in the record.
pub fn stakeholder_at(analysis: &PolicyAnalysis, number: usize) -> anyhow::Result<&Stakeholder> {
    number
        .checked_sub(1)
        .and_then(|index| analysis.stakeholders.get(index))
        .with_context(|| {
            format!(
                "no stakeholder #{number} (this analysis lists {})",
                analysis.stakeholders.len()
            )
        })
}

/// Decode and save a generated image.
pub fn save_image(image: &GeneratedImage, path: &Path) -> anyhow::Result<()> {
    let bytes = image.to_bytes()?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write image to {}", path.display()))
}

/// Default image path for an analysis: `<dir>/visualization-<id>.<ext>`.
pub fn default_image_path(dir: &Path, analysis: &PolicyAnalysis, image: &GeneratedImage) -> PathBuf {
    dir.join(format!("visualization-{}.{}", analysis.id, image.extension()))
}

/// Default JSON export name, next to the HTML report name.
pub fn json_filename(title: &str) -> String {
    let html = civic_report::report_filename(title);
    format!("{}.json", html.trim_end_matches(".html"))
}
