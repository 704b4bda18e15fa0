use civic_gemini::schema::{SCHEMA_VERSION, analysis_schema};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Handle `civic schema`.
///
/// The table format has no useful rendering of a nested schema, so it falls
/// back to pretty JSON.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    tracing::debug!(version = SCHEMA_VERSION, "printing analysis schema");
    let format = match flags.format {
        OutputFormat::Table => OutputFormat::Json,
        other => other,
    };
    output(&analysis_schema(), format)
}
