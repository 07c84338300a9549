//! `vero export` — serialize a view to CSV or a printable document.

use crate::output::OutputMode;
use crate::registry::ViewRegistry;
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use vero_core::write_export;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values with proper quoting.
    Csv,
    /// Plain-text document for printing or mailing.
    Doc,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// View key (see `vero views`).
    pub view: String,

    /// Export format.
    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output path (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn run_export(args: &ExportArgs, registry: &ViewRegistry, _output: OutputMode) -> Result<()> {
    let view = registry.resolve(&args.view)?;
    let content = match args.format {
        ExportFormat::Csv => view.csv(),
        ExportFormat::Doc => view.printable(),
    };
    write_export(args.output.as_deref(), &content)?;
    if let Some(path) = &args.output {
        info!(view = view.key(), path = %path.display(), "export written");
        eprintln!("Exported {} records to {}", view.len(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_defaults_to_csv_on_stdout() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ExportArgs,
        }
        let w = Wrapper::parse_from(["test", "athletes"]);
        assert_eq!(w.args.format, ExportFormat::Csv);
        assert!(w.args.output.is_none());
    }
}
