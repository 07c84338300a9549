//! `vero views` — list registered views.

use crate::output::{OutputMode, pretty_section, render};
use crate::registry::ViewRegistry;
use anyhow::Result;
use serde::Serialize;
use std::io::Write as _;

#[derive(Debug, Serialize)]
struct ViewRow {
    key: &'static str,
    title: &'static str,
    records: usize,
}

pub fn run_views(registry: &ViewRegistry, output: OutputMode) -> Result<()> {
    let rows: Vec<ViewRow> = registry
        .iter()
        .map(|view| ViewRow {
            key: view.key(),
            title: view.title(),
            records: view.len(),
        })
        .collect();

    render(output, &rows, |rows, w| {
        if output.is_pretty() {
            pretty_section(w, "Registered views")?;
        }
        for row in rows {
            writeln!(w, "{:<14} {:<22} {:>3} records", row.key, row.title, row.records)?;
        }
        Ok(())
    })
}
