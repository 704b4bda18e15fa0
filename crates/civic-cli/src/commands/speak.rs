use std::path::PathBuf;

use anyhow::{Context, bail};
use serde::Serialize;

use crate::audio::write_wav;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::SpeakArgs;
use crate::commands::shared;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakResponse {
    speaker: String,
    path: PathBuf,
    seconds: f32,
}

/// Handle `civic speak`.
pub async fn handle(args: &SpeakArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.config
        .gemini
        .require()
        .context("speech synthesis needs a Gemini API key (set GEMINI_API_KEY)")?;
    let analysis = shared::load_analysis(&args.input)?;

    let (speaker, audio) = match args.stakeholder {
        Some(number) => {
            let stakeholder = shared::stakeholder_at(&analysis, number)?;
            let progress = Progress::spinner(&format!("Voicing {}...", stakeholder.group));
            let audio = ctx.client.generate_stakeholder_speech(stakeholder).await;
            progress.finish_clear();
            (stakeholder.group.clone(), audio)
        }
        None => {
            let progress = Progress::spinner("Narrating executive summary...");
            let audio = ctx.client.generate_speech(&analysis.executive_summary).await;
            progress.finish_clear();
            ("narrator".to_string(), audio)
        }
    };

    let Some(audio) = audio else {
        bail!("no audio was generated for {speaker} (run with --verbose for details)");
    };
    write_wav(&audio, &args.out)?;

    output(
        &SpeakResponse {
            speaker,
            path: args.out.clone(),
            seconds: audio.duration().as_secs_f32(),
        },
        flags.format,
    )
}
