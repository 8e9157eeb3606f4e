//! Output formatting: text, table, CSV, JSON, YAML.
//!
//! Renders data in the format selected by `--output`. Text layouts are
//! supplied by each command, tables use `tabled`, CSV uses the `csv`
//! crate with serde-renamed headers, structured formats use serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on stderr.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Print a status line (`✓ message`) to stderr.
pub fn status(message: &str, color: bool) {
    if color {
        eprintln!("{} {message}", "✓".green().bold());
    } else {
        eprintln!("✓ {message}");
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// A flat row with a fixed CSV header.
pub trait CsvRecord: Serialize {
    const HEADERS: &'static [&'static str];
}

/// Render a view in the chosen format.
///
/// - `text`: calls `text_fn` on the view
/// - `table` / `csv`: flatten the view into rows via `to_rows`
/// - `json` / `yaml`: serialize the view itself
pub fn render<T, R>(
    format: OutputFormat,
    data: &T,
    to_rows: impl Fn(&T) -> Vec<R>,
    text_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
    R: Tabled + CsvRecord,
{
    match format {
        OutputFormat::Text => Ok(text_fn(data)),
        OutputFormat::Table => Ok(render_table(&to_rows(data))),
        OutputFormat::Csv => render_csv(&to_rows(data)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Write rows as CSV: `R::HEADERS` first, even when there are no rows.
pub(crate) fn render_csv<R: CsvRecord>(rows: &[R]) -> Result<String, CliError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(R::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CliError::Validation {
        field: "csv".into(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: String,
        count: u32,
    }

    impl CsvRecord for Row {
        const HEADERS: &'static [&'static str] = &["Name", "Count"];
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "a, b".into(),
                count: 1,
            },
            Row {
                name: "c".into(),
                count: 2,
            },
        ]
    }

    #[test]
    fn csv_quotes_embedded_commas() {
        let out = render_csv(&rows()).unwrap();
        assert_eq!(out, "Name,Count\n\"a, b\",1\nc,2\n");
    }

    #[test]
    fn csv_header_without_rows() {
        let out = render_csv::<Row>(&[]).unwrap();
        assert_eq!(out, "Name,Count\n");
    }

    #[test]
    fn json_serializes_view_not_rows() {
        let data = vec![1, 2];
        let out = render(OutputFormat::Json, &data, |_| rows(), |_| String::new()).unwrap();
        assert_eq!(out, "[\n  1,\n  2\n]");
    }

    #[test]
    fn text_uses_layout_fn() {
        let out = render(OutputFormat::Text, &(), |_| rows(), |_| "hello".into()).unwrap();
        assert_eq!(out, "hello");
    }
}
