use anyhow::Context;
use civic_session::InputForm;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::shared::{self, WrittenFile};
use crate::context::AppContext;
use crate::output::report::print_analysis;
use crate::progress::Progress;

/// Handle `civic analyze`.
pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let form = build_form(args)?;
    let mut orchestrator = ctx.orchestrator(!args.no_image);

    let progress = Progress::spinner("Simulating policy outcomes...");
    let analysis = match orchestrator.submit_form(&form).await {
        Ok(analysis) => {
            progress.finish_clear();
            analysis
        }
        Err(error) => {
            progress.finish_err("Simulation failed");
            return Err(shared::explain(error));
        }
    };

    let wants_image = args.image_out.is_some() || args.html_out.is_some();
    let image = if orchestrator.image_pending() && (ctx.config.general.wait_for_image || wants_image)
    {
        let progress = Progress::spinner("Rendering future-state visualization...");
        let image = orchestrator.wait_for_image().await;
        if image.is_some() {
            progress.finish_clear();
        } else {
            progress.finish_err("No visualization generated");
        }
        image
    } else {
        None
    };

    let mut written = Vec::new();
    if let Some(path) = &args.json_out {
        civic_report::write_json(&analysis, path)?;
        written.push(WrittenFile {
            kind: "json",
            path: path.clone(),
        });
    }
    if let Some(dir) = &args.html_out {
        let path = civic_report::write_html(&analysis, image.as_ref(), dir)?;
        written.push(WrittenFile { kind: "html", path });
    }
    if let Some(path) = &args.image_out {
        match &image {
            Some(image) => {
                shared::save_image(image, path)?;
                written.push(WrittenFile {
                    kind: "image",
                    path: path.clone(),
                });
            }
            None => tracing::warn!(path = %path.display(), "no visualization to save"),
        }
    }

    print_analysis(&analysis, flags.format)?;
    if !flags.quiet {
        for file in &written {
            eprintln!("wrote {} to {}", file.kind, file.path.display());
        }
    }
    Ok(())
}

fn build_form(args: &AnalyzeArgs) -> anyhow::Result<InputForm> {
    let mut form = InputForm::new(args.policy.clone());
    if let Some(geography) = &args.geography {
        form.geography.clone_from(geography);
    }
    if let Some(path) = &args.evidence {
        form.attach(path)
            .with_context(|| format!("failed to attach evidence {}", path.display()))?;
        if let Some(caption) = &args.caption {
            form.set_caption(caption.clone());
        }
    }
    Ok(form)
}
