use std::path::PathBuf;

use clap::{ArgGroup, Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Simulate one policy and print the analysis.
    Analyze(AnalyzeArgs),
    /// Interactive session: submit, browse history, listen, export.
    Shell(ShellArgs),
    /// Synthesize speech for a saved analysis.
    Speak(SpeakArgs),
    /// Re-export a saved JSON analysis.
    Export(ExportArgs),
    /// Print the structured-output schema sent with every analysis.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Policy idea or problem statement.
    pub policy: String,

    /// Target city, region, or context.
    #[arg(short, long)]
    pub geography: Option<String>,

    /// Site photo, walkthrough video, or PDF to audit alongside the policy.
    #[arg(short, long)]
    pub evidence: Option<PathBuf>,

    /// Caption for the attached evidence.
    #[arg(short, long, requires = "evidence")]
    pub caption: Option<String>,

    /// Skip the future-state visualization.
    #[arg(long)]
    pub no_image: bool,

    /// Save the visualization to this file.
    #[arg(long, conflicts_with = "no_image")]
    pub image_out: Option<PathBuf>,

    /// Write the standalone HTML report into this directory.
    #[arg(long)]
    pub html_out: Option<PathBuf>,

    /// Write the JSON record to this file.
    #[arg(long)]
    pub json_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ShellArgs {
    /// Skip the future-state visualization for every run.
    #[arg(long)]
    pub no_image: bool,

    /// Directory for synthesized speech (defaults to the export directory).
    #[arg(long)]
    pub audio_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["stakeholder", "summary"])))]
pub struct SpeakArgs {
    /// Saved analysis (JSON export).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Stakeholder to voice, 1-based as listed by `show`.
    #[arg(short, long)]
    pub stakeholder: Option<usize>,

    /// Narrate the executive summary instead.
    #[arg(long)]
    pub summary: bool,

    /// WAV file to write.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Html,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Saved analysis (JSON export).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target format.
    #[arg(short, long, value_enum)]
    pub to: ExportFormat,

    /// HTML: output directory (defaults to the export directory).
    /// JSON: output file (defaults to stdout).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
