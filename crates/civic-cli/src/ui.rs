use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("COLUMNS").ok().as_deref(),
    ));
}

/// Spinners draw on stderr, so they stay on for JSON output as long as
/// stderr is a terminal.
fn resolve(
    flags: &GlobalFlags,
    stdout_tty: bool,
    stderr_tty: bool,
    no_color: bool,
    columns: Option<&str>,
) -> UiPrefs {
    let table_color =
        stdout_tty && flags.format == OutputFormat::Table && !flags.quiet && !no_color;
    let progress = stderr_tty && !flags.quiet;
    let term_width = columns
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    UiPrefs {
        table_color,
        progress,
        term_width,
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
        }
    }

    #[test]
    fn color_only_for_tables_on_a_terminal() {
        assert!(resolve(&flags(OutputFormat::Table, false), true, true, false, None).table_color);
        assert!(!resolve(&flags(OutputFormat::Json, false), true, true, false, None).table_color);
        assert!(!resolve(&flags(OutputFormat::Table, false), false, true, false, None).table_color);
        assert!(!resolve(&flags(OutputFormat::Table, false), true, true, true, None).table_color);
    }

    #[test]
    fn quiet_disables_progress() {
        assert!(resolve(&flags(OutputFormat::Json, false), false, true, false, None).progress);
        assert!(!resolve(&flags(OutputFormat::Json, true), false, true, false, None).progress);
        assert!(!resolve(&flags(OutputFormat::Json, false), true, false, false, None).progress);
    }

    #[test]
    fn narrow_or_invalid_columns_are_ignored() {
        let f = flags(OutputFormat::Table, false);
        assert_eq!(resolve(&f, true, true, false, Some("120")).term_width, Some(120));
        assert_eq!(resolve(&f, true, true, false, Some("20")).term_width, None);
        assert_eq!(resolve(&f, true, true, false, Some("wide")).term_width, None);
    }
}
