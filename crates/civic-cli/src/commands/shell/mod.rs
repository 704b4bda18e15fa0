//! `civic shell`: a line-oriented front end over one analysis session.
//!
//! Every command maps onto one orchestrator transition or one form edit.
//! Speech requests run as background tasks so the prompt stays responsive
//! and a newer `play` can supersede one that is still loading.

mod parse;

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use civic_core::entities::{PolicyAnalysis, Stakeholder};
use civic_core::enums::AppState;
use civic_gemini::GeminiClient;
use civic_session::{AnalysisOrchestrator, InputForm, PlaybackState, SpeechPlayer, SpeechTarget};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::audio::WavFileSink;
use crate::cli::root_commands::ShellArgs;
use crate::cli::{ExportFormat, GlobalFlags};
use crate::commands::shared;
use crate::context::AppContext;
use crate::output::output;
use crate::output::report::{history_rows, print_analysis};
use crate::progress::Progress;

use parse::{HELP, ShellCommand, parse_line};

/// Handle `civic shell`.
pub async fn handle(args: &ShellArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let audio_dir = args.audio_dir.clone().unwrap_or_else(|| ctx.export_dir());
    let sink = Arc::new(WavFileSink::new(audio_dir));
    let mut shell = Shell {
        ctx,
        flags,
        orchestrator: ctx.orchestrator(!args.no_image),
        player: SpeechPlayer::new(Arc::clone(&ctx.client), Arc::clone(&sink)),
        sink,
        form: InputForm::default(),
    };

    if !flags.quiet {
        eprintln!("Civic Architect. Type 'help' for commands.");
    }
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    shell.prompt();
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => {
                if let Err(error) = shell.execute(command).await {
                    eprintln!("error: {error:#}");
                }
            }
            Err(message) => eprintln!("{message}"),
        }
        shell.prompt();
    }

    shell.player.stop().await;
    Ok(())
}

struct Shell<'a> {
    ctx: &'a AppContext,
    flags: &'a GlobalFlags,
    orchestrator: AnalysisOrchestrator<GeminiClient>,
    player: SpeechPlayer<GeminiClient, WavFileSink>,
    sink: Arc<WavFileSink>,
    form: InputForm,
}

impl Shell<'_> {
    fn prompt(&self) {
        if self.flags.quiet {
            return;
        }
        eprint!("civic ({})> ", self.orchestrator.phase());
        let _ = std::io::stderr().flush();
    }

    fn note(&self, message: &str) {
        if !self.flags.quiet {
            eprintln!("{message}");
        }
    }

    fn current(&self) -> anyhow::Result<Arc<PolicyAnalysis>> {
        self.orchestrator
            .current()
            .context("no analysis is open (submit one or select from history)")
    }

    async fn execute(&mut self, command: ShellCommand) -> anyhow::Result<()> {
        match command {
            ShellCommand::Submit(text) => self.submit(text).await,
            ShellCommand::Geo(place) => {
                self.form.geography = place;
                if self.form.geography.is_empty() {
                    self.note("geography cleared");
                } else {
                    self.note(&format!("geography: {}", self.form.geography));
                }
                Ok(())
            }
            ShellCommand::Attach(path) => {
                let draft = self.form.attach(&path)?;
                let message = format!("attached {} ({})", draft.filename(), draft.mime_type());
                self.note(&message);
                Ok(())
            }
            ShellCommand::Caption(caption) => {
                if !self.form.set_caption(caption) {
                    bail!("no evidence attached");
                }
                Ok(())
            }
            ShellCommand::Detach => {
                match self.form.detach() {
                    Some(draft) => self.note(&format!("removed {}", draft.filename())),
                    None => self.note("nothing attached"),
                }
                Ok(())
            }
            ShellCommand::History => {
                output(&history_rows(&self.orchestrator.snapshot().store), self.flags.format)
            }
            ShellCommand::Select(key) => self.select(&key).await,
            ShellCommand::Reset => {
                self.player.stop().await;
                self.orchestrator.reset().map_err(shared::explain)
            }
            ShellCommand::About => {
                self.orchestrator.show_about().map_err(shared::explain)?;
                println!("{}", civic_report::about::about_text());
                Ok(())
            }
            ShellCommand::Back => {
                let state = self.orchestrator.close_about().map_err(shared::explain)?;
                if state == AppState::Results {
                    self.show().await
                } else {
                    Ok(())
                }
            }
            ShellCommand::Show => self.show().await,
            ShellCommand::Image(path) => self.image(path).await,
            ShellCommand::Play(number) => {
                let analysis = self.current()?;
                let stakeholder = shared::stakeholder_at(&analysis, number)?.clone();
                self.speak(SpeechJob::Stakeholder(stakeholder)).await;
                Ok(())
            }
            ShellCommand::Narrate => {
                let summary = self.current()?.executive_summary.clone();
                self.speak(SpeechJob::Narration(summary)).await;
                Ok(())
            }
            ShellCommand::Stop => {
                self.player.stop().await;
                Ok(())
            }
            ShellCommand::Export(format, path) => self.export(format, path),
            ShellCommand::Help => {
                println!("{HELP}");
                Ok(())
            }
            ShellCommand::Quit | ShellCommand::Empty => Ok(()),
        }
    }

    async fn submit(&mut self, text: Option<String>) -> anyhow::Result<()> {
        if let Some(text) = text {
            self.form.policy_text = text;
        }

        let progress = Progress::spinner("Simulating policy outcomes...");
        match self.orchestrator.submit_form(&self.form).await {
            Ok(analysis) => {
                progress.finish_clear();
                print_analysis(&analysis, self.flags.format)?;
                if self.orchestrator.image_pending() {
                    self.note("visualization rendering in the background ('image' to save it)");
                }
                Ok(())
            }
            Err(error) if error.is_rejected() => {
                progress.finish_clear();
                Err(shared::explain(error))
            }
            Err(error) => {
                progress.finish_err("Simulation failed ('reset' to try again)");
                Err(shared::explain(error))
            }
        }
    }

    /// Accepts a 1-based history number or a full id.
    async fn select(&mut self, key: &str) -> anyhow::Result<()> {
        let id = {
            let view = self.orchestrator.snapshot();
            key.parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| view.store.history().get(index))
                .map_or_else(|| key.to_string(), |item| item.id.clone())
        };

        self.player.stop().await;
        let analysis = self.orchestrator.select_history(&id).map_err(shared::explain)?;
        print_analysis(&analysis, self.flags.format)
    }

    async fn show(&self) -> anyhow::Result<()> {
        let view = self.orchestrator.snapshot();
        match view.phase {
            AppState::Idle | AppState::Analyzing => {
                let evidence = self.form.evidence().map_or_else(
                    || "-".to_string(),
                    |draft| {
                        let caption = draft.caption();
                        if caption.is_empty() {
                            draft.filename().to_string()
                        } else {
                            format!("{} ({caption})", draft.filename())
                        }
                    },
                );
                println!("policy:    {}", self.form.policy_text);
                println!("geography: {}", self.form.geography);
                println!("evidence:  {evidence}");
            }
            AppState::Results => {
                let analysis = self.current()?;
                print_analysis(&analysis, self.flags.format)?;
                let image = if view.store.generated_image().is_some() {
                    "ready"
                } else if self.orchestrator.image_pending() {
                    "rendering"
                } else {
                    "none"
                };
                self.note(&format!("visualization: {image}"));
                self.note(&format!("speech: {}", describe(&self.player.state().await)));
            }
            AppState::Error => {
                println!(
                    "simulation failed: {}",
                    view.error.as_deref().unwrap_or("unknown error")
                );
            }
            AppState::About => println!("{}", civic_report::about::about_text()),
        }
        Ok(())
    }

    async fn image(&mut self, path: Option<PathBuf>) -> anyhow::Result<()> {
        let analysis = self.current()?;
        let image = if self.orchestrator.image_pending() {
            let progress = Progress::spinner("Rendering future-state visualization...");
            let image = self.orchestrator.wait_for_image().await;
            progress.finish_clear();
            image
        } else {
            self.orchestrator.snapshot().store.generated_image().cloned()
        };

        let Some(image) = image else {
            bail!("no visualization is available for this analysis");
        };
        let path = path
            .unwrap_or_else(|| shared::default_image_path(&self.ctx.export_dir(), &analysis, &image));
        shared::save_image(&image, &path)?;
        self.note(&format!("wrote image to {}", path.display()));
        Ok(())
    }

    /// Start speech in the background. The ticket is taken before the task
    /// is spawned, so the last `play` typed is the one that plays.
    async fn speak(&self, job: SpeechJob) {
        let target = job.target();
        let speaker = label(&target);
        let ticket = self.player.begin(target).await;
        let player = self.player.clone();
        let sink = Arc::clone(&self.sink);
        let quiet = self.flags.quiet;
        self.note(&format!("loading speech for {speaker}..."));

        tokio::spawn(async move {
            let outcome = match &job {
                SpeechJob::Stakeholder(stakeholder) => {
                    player.load_stakeholder(ticket, stakeholder).await
                }
                SpeechJob::Narration(text) => player.load_narration(ticket, text).await,
            };
            match outcome {
                Ok(true) => {
                    if let (false, Some(path)) = (quiet, sink.last_written()) {
                        eprintln!("\n{speaker} speaking: {}", path.display());
                    }
                }
                Ok(false) => tracing::debug!(%speaker, "speech superseded or unavailable"),
                Err(error) => tracing::warn!(%error, %speaker, "speech playback failed"),
            }
        });
    }

    fn export(&self, format: ExportFormat, path: Option<PathBuf>) -> anyhow::Result<()> {
        let analysis = self.current()?;
        let written = match format {
            ExportFormat::Html => {
                let dir = path.unwrap_or_else(|| self.ctx.export_dir());
                let image = self.orchestrator.snapshot().store.generated_image().cloned();
                civic_report::write_html(&analysis, image.as_ref(), &dir)?
            }
            ExportFormat::Json => {
                let path = path.unwrap_or_else(|| {
                    self.ctx.export_dir().join(shared::json_filename(&analysis.title))
                });
                civic_report::write_json(&analysis, &path)?;
                path
            }
        };
        self.note(&format!("wrote {}", written.display()));
        Ok(())
    }
}

enum SpeechJob {
    Stakeholder(Stakeholder),
    Narration(String),
}

impl SpeechJob {
    fn target(&self) -> SpeechTarget {
        match self {
            Self::Stakeholder(stakeholder) => SpeechTarget::Stakeholder(stakeholder.group.clone()),
            Self::Narration(_) => SpeechTarget::Narration,
        }
    }
}

fn label(target: &SpeechTarget) -> String {
    match target {
        SpeechTarget::Narration => "narrator".to_string(),
        SpeechTarget::Stakeholder(group) => group.clone(),
    }
}

fn describe(state: &PlaybackState) -> String {
    match state {
        PlaybackState::Idle => "idle".to_string(),
        PlaybackState::Loading(target) => format!("loading {}", label(target)),
        PlaybackState::Playing(target) => format!("playing {}", label(target)),
    }
}
