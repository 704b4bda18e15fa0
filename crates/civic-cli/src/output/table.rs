#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table of string rows. Missing cells render as `-`.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_COLUMN)
        })
        .collect();

    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.clone());
    lines.push("-".repeat(header_line.chars().count()));

    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate(value, *width);
                let numeric = is_numeric(&text);
                let padded = pad(&text, *width, numeric);
                if options.color {
                    paint(&text, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>();
        lines.push(cells.join(GAP));
    }

    lines.join("\n")
}

const GAP: &str = "  ";
const MIN_COLUMN: usize = 6;

/// Narrow the widest column one character at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = widths.len().saturating_sub(1) * GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);

        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ',' | '%'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Color a padded cell by the sentiment of its text: favourable values
/// green, uncertain ones yellow, adverse ones red.
fn paint(text: &str, padded: String) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "positive" | "success" | "low" | "true" => "32",
        "mixed" | "neutral" | "medium" | "moderate" | "pending" => "33",
        "negative" | "failure" | "high" | "critical" | "mega-project" | "false" | "error" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_rows};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn aligns_mixed_widths() {
        let rows = vec![
            vec!["1".to_string(), "Mayor".to_string(), "positive".to_string()],
            vec![
                "2".to_string(),
                "Small business owners".to_string(),
                "negative".to_string(),
            ],
        ];
        let table = render_rows(&["#", "group", "sentiment"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn truncates_to_the_terminal_width() {
        let rows = vec![vec!["x".repeat(200), "short".to_string()]];
        let table = render_rows(
            &["title", "value"],
            &rows,
            TableOptions {
                max_width: Some(60),
                color: false,
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 60));
        assert!(table.contains('…'));
    }

    #[test]
    fn colors_only_known_values() {
        let rows = vec![vec!["high".to_string(), "Portland".to_string()]];
        let table = render_rows(
            &["risk", "place"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\u{1b}[31mhigh"));
        assert!(!table.contains("\u{1b}[31mPortland"));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["only".to_string()]];
        let table = render_rows(&["a", "b"], &rows, PLAIN);
        assert!(table.lines().nth(2).is_some_and(|line| line.trim_end().ends_with('-')));
    }
}
