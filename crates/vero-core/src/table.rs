//! Presentation binding: the column spec.
//!
//! A [`TableSpec`] is the single contract between a record shape and every
//! rendering surface. The text table, the CSV export, the printable
//! document, and the board's table widget all feed from the same column
//! list, so field semantics never leak into presentation code.

/// Horizontal alignment of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One column: header, layout hints, and a cell extractor.
#[derive(Debug, Clone, Copy)]
pub struct Column<T> {
    pub header: &'static str,
    pub align: Align,
    /// Minimum width hint for fixed-layout renderers.
    pub width: u16,
    cell: fn(&T) -> String,
}

impl<T> Column<T> {
    #[must_use]
    pub const fn new(header: &'static str, width: u16, align: Align, cell: fn(&T) -> String) -> Self {
        Self {
            header,
            align,
            width,
            cell,
        }
    }

    #[must_use]
    pub fn cell(&self, record: &T) -> String {
        (self.cell)(record)
    }
}

/// Ordered column list for one record shape.
#[derive(Debug, Clone)]
pub struct TableSpec<T> {
    columns: Vec<Column<T>>,
}

impl<T> TableSpec<T> {
    #[must_use]
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header).collect()
    }

    #[must_use]
    pub fn row(&self, record: &T) -> Vec<String> {
        self.columns.iter().map(|c| c.cell(record)).collect()
    }

    /// Render an aligned plain-text table: header, rule, one line per row.
    #[must_use]
    pub fn render_text(&self, records: &[T]) -> String {
        let rows: Vec<Vec<String>> = records.iter().map(|r| self.row(r)).collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain([col.header.chars().count(), col.width as usize])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&self.format_line(
            &self
                .columns
                .iter()
                .map(|c| c.header.to_string())
                .collect::<Vec<_>>(),
            &widths,
        ));
        out.push('\n');
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');
        for row in &rows {
            out.push_str(&self.format_line(row, &widths));
            out.push('\n');
        }
        out
    }

    fn format_line(&self, cells: &[String], widths: &[usize]) -> String {
        let mut parts = Vec::with_capacity(cells.len());
        for ((cell, col), width) in cells.iter().zip(&self.columns).zip(widths) {
            let pad = width.saturating_sub(cell.chars().count());
            let padded = match col.align {
                Align::Left => format!("{cell}{}", " ".repeat(pad)),
                Align::Right => format!("{}{cell}", " ".repeat(pad)),
            };
            parts.push(padded);
        }
        // Trailing spaces on the last column are noise.
        parts.join("  ").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        name: &'static str,
        score: u32,
    }

    fn spec() -> TableSpec<Fixture> {
        TableSpec::new(vec![
            Column::new("Name", 4, Align::Left, |f: &Fixture| f.name.to_string()),
            Column::new("Score", 5, Align::Right, |f: &Fixture| f.score.to_string()),
        ])
    }

    #[test]
    fn headers_and_rows_follow_column_order() {
        let spec = spec();
        assert_eq!(spec.headers(), ["Name", "Score"]);
        let row = spec.row(&Fixture {
            name: "Ana",
            score: 7,
        });
        assert_eq!(row, ["Ana", "7"]);
    }

    #[test]
    fn render_text_aligns_columns() {
        let spec = spec();
        let out = spec.render_text(&[
            Fixture {
                name: "Ana",
                score: 7,
            },
            Fixture {
                name: "Bojana",
                score: 112,
            },
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name    Score");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "Ana         7");
        assert_eq!(lines[3], "Bojana    112");
    }

    #[test]
    fn render_text_of_empty_store_is_header_and_rule_only() {
        let out = spec().render_text(&[]);
        assert_eq!(out.lines().count(), 2);
    }
}
