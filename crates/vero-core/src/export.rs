//! The serialization boundary: CSV and printable documents.
//!
//! One CSV encoder for every view, with real quoting, replacing the
//! per-screen string joining the dashboards grew. An empty store exports as
//! exactly the header row. The printable renderer is the print-dialog
//! analogue: a framed text document suitable for a spooler or an email.

use crate::table::TableSpec;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Quote a CSV field when it contains the delimiter, quotes, or newlines.
/// Embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| csv_field(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode records as CSV. The header row is always present; an empty slice
/// yields the header row alone with no trailing blank data rows.
#[must_use]
pub fn to_csv<T>(spec: &TableSpec<T>, records: &[T]) -> String {
    let headers: Vec<String> = spec.headers().iter().map(ToString::to_string).collect();
    let mut out = csv_line(&headers);
    out.push('\n');
    for record in records {
        out.push_str(&csv_line(&spec.row(record)));
        out.push('\n');
    }
    out
}

/// Render a printable text document: title, rule, aligned table, count.
#[must_use]
pub fn to_printable<T>(title: &str, spec: &TableSpec<T>, records: &[T]) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count().max(8)));
    out.push_str("\n\n");
    out.push_str(&spec.render_text(records));
    out.push('\n');
    out.push_str(&format!(
        "{} record{}\n",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    ));
    out
}

/// Write an export to a file path, or to stdout when no path is given.
pub fn write_export(target: Option<&Path>, content: &str) -> Result<()> {
    let mut out: Box<dyn Write> = match target {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };
    out.write_all(content.as_bytes())
        .context("failed to write export")?;
    out.flush().context("failed to flush export")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Align, Column};

    struct Fixture {
        name: String,
        note: String,
    }

    fn spec() -> TableSpec<Fixture> {
        TableSpec::new(vec![
            Column::new("Name", 4, Align::Left, |f: &Fixture| f.name.clone()),
            Column::new("Note", 4, Align::Left, |f: &Fixture| f.note.clone()),
        ])
    }

    #[test]
    fn empty_store_exports_header_only() {
        let csv = to_csv(&spec(), &[]);
        assert_eq!(csv, "Name,Note\n");
    }

    #[test]
    fn embedded_delimiters_and_quotes_are_escaped() {
        let rows = [Fixture {
            name: "Kovač, Ana".to_string(),
            note: "said \"ready\"\nline two".to_string(),
        }];
        let csv = to_csv(&spec(), &rows);
        let mut lines = csv.split_inclusive('\n');
        assert_eq!(lines.next(), Some("Name,Note\n"));
        let rest: String = lines.collect();
        assert_eq!(
            rest,
            "\"Kovač, Ana\",\"said \"\"ready\"\"\nline two\"\n"
        );
    }

    #[test]
    fn plain_fields_are_not_quoted() {
        let rows = [Fixture {
            name: "Ana".to_string(),
            note: "ok".to_string(),
        }];
        assert_eq!(to_csv(&spec(), &rows), "Name,Note\nAna,ok\n");
    }

    #[test]
    fn printable_document_carries_title_and_count() {
        let rows = [Fixture {
            name: "Ana".to_string(),
            note: "ok".to_string(),
        }];
        let doc = to_printable("Sentiment tracker", &spec(), &rows);
        assert!(doc.starts_with("Sentiment tracker\n========"));
        assert!(doc.ends_with("1 record\n"));
    }

    #[test]
    fn write_export_creates_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.csv");
        write_export(Some(&path), "Name\n").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "Name\n");
    }
}
