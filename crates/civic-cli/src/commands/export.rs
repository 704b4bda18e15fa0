use crate::cli::root_commands::ExportArgs;
use crate::cli::{ExportFormat, GlobalFlags};
use crate::commands::shared::{self, WrittenFile};
use crate::context::AppContext;
use crate::output::output;

/// Handle `civic export`.
///
/// A saved record carries no visualization, so re-exported HTML reports
/// have no image section.
pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let analysis = shared::load_analysis(&args.input)?;

    let written = match (args.to, &args.out) {
        (ExportFormat::Html, out) => {
            let dir = out.clone().unwrap_or_else(|| ctx.export_dir());
            WrittenFile {
                kind: "html",
                path: civic_report::write_html(&analysis, None, &dir)?,
            }
        }
        (ExportFormat::Json, Some(path)) => {
            civic_report::write_json(&analysis, path)?;
            WrittenFile {
                kind: "json",
                path: path.clone(),
            }
        }
        (ExportFormat::Json, None) => {
            println!("{}", civic_report::to_json(&analysis)?);
            return Ok(());
        }
    };

    output(&written, flags.format)
}
