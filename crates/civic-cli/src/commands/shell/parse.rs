use std::path::PathBuf;

use crate::cli::ExportFormat;

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Submit the form, optionally replacing the policy text first.
    Submit(Option<String>),
    Geo(String),
    Attach(PathBuf),
    Caption(String),
    Detach,
    History,
    /// A history number or an analysis id.
    Select(String),
    Reset,
    About,
    Back,
    Show,
    Image(Option<PathBuf>),
    /// 1-based stakeholder number.
    Play(usize),
    Stop,
    Narrate,
    Export(ExportFormat, Option<PathBuf>),
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
commands:
  submit [policy]        run the simulation (text replaces the form's policy)
  geo [place]            set or clear the target geography
  attach <path>          attach a photo, video, or PDF as evidence
  caption <text>         caption the attached evidence
  detach                 remove the attachment
  history                list past analyses
  select <n|id>          reopen a past analysis
  reset                  back to a new analysis
  about / back           show or leave the About view
  show                   print the current view
  image [path]           wait for and save the visualization
  play <n>               hear stakeholder n
  narrate                hear the executive summary
  stop                   stop speech
  export html|json [path]
  quit";

/// Parse one input line. Verbs are case-insensitive; the rest of the line
/// is the argument, trimmed.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match verb.to_ascii_lowercase().as_str() {
        "submit" | "run" => Ok(ShellCommand::Submit(arg)),
        "geo" | "geography" => Ok(ShellCommand::Geo(rest.to_string())),
        "attach" => arg
            .map(|path| ShellCommand::Attach(PathBuf::from(path)))
            .ok_or_else(|| usage("attach <path>")),
        "caption" => Ok(ShellCommand::Caption(rest.to_string())),
        "detach" => Ok(ShellCommand::Detach),
        "history" | "ls" => Ok(ShellCommand::History),
        "select" | "open" => arg
            .map(ShellCommand::Select)
            .ok_or_else(|| usage("select <number|id>")),
        "reset" | "new" => Ok(ShellCommand::Reset),
        "about" => Ok(ShellCommand::About),
        "back" | "close" => Ok(ShellCommand::Back),
        "show" => Ok(ShellCommand::Show),
        "image" => Ok(ShellCommand::Image(arg.map(PathBuf::from))),
        "play" => rest
            .parse::<usize>()
            .ok()
            .filter(|number| *number >= 1)
            .map(ShellCommand::Play)
            .ok_or_else(|| usage("play <stakeholder number>")),
        "stop" => Ok(ShellCommand::Stop),
        "narrate" => Ok(ShellCommand::Narrate),
        "export" => parse_export(rest),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn parse_export(rest: &str) -> Result<ShellCommand, String> {
    let (format, path) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(format, path)| (format, path.trim()));
    let format = match format.to_ascii_lowercase().as_str() {
        "html" => ExportFormat::Html,
        "json" => ExportFormat::Json,
        _ => return Err(usage("export html|json [path]")),
    };
    let path = (!path.is_empty()).then(|| PathBuf::from(path));
    Ok(ShellCommand::Export(format, path))
}

fn usage(text: &str) -> String {
    format!("usage: {text}")
}
