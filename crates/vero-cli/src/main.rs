#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;
mod registry;
mod screen;
mod tui;
mod views;

use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, ValidationFailed, resolve_output_mode};
use screen::ViewContext;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "vero: CourtEvo Vero boardroom console",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Console",
        about = "List registered views",
        after_help = "EXAMPLES:\n    vero views\n    vero views --format json"
    )]
    Views,

    #[command(
        next_help_heading = "Console",
        about = "Open the interactive board",
        after_help = "EXAMPLES:\n    vero board\n    vero board --view compliance"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        next_help_heading = "Records",
        about = "Show one view's records",
        after_help = "EXAMPLES:\n    vero list athletes\n    vero list finance --format json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Records",
        about = "Create a record through the view's form",
        after_help = "EXAMPLES:\n    vero add athletes --set name=Luka --set age_group=u14 \\\n        --set stage=foundation --set progress=50"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Records",
        about = "Edit fields on an existing record",
        after_help = "EXAMPLES:\n    vero edit athletes 2 --set progress=70"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Records",
        about = "Delete a record",
        after_help = "EXAMPLES:\n    vero delete finance 5"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Insight",
        about = "Aggregate one view's records",
        after_help = "EXAMPLES:\n    vero summary athletes\n    vero summary compliance --format json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Insight",
        about = "Export a view as CSV or a printable document",
        after_help = "EXAMPLES:\n    vero export athletes --output athletes.csv\n    vero export compliance --format doc"
    )]
    Export(cmd::export::ExportArgs),

    #[command(next_help_heading = "Setup", about = "Show or edit configuration")]
    Config(cmd::config::ConfigArgs),

    #[command(next_help_heading = "Setup", about = "Generate shell completions")]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("VERO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let user_config = config::load()?;
    let output = resolve_output_mode(cli.format, user_config.output.format.as_deref());
    let mut registry = views::standard_registry();
    let ctx = ViewContext {
        today: Local::now().date_naive(),
        thresholds: user_config.thresholds.clone(),
    };

    match &cli.command {
        Commands::Views => cmd::views::run_views(&registry, output),
        Commands::Board(args) => {
            cmd::board::run_board(args, registry, ctx, &user_config.board.default_view)
        }
        Commands::List(args) => cmd::list::run_list(args, &registry, output),
        Commands::Add(args) => cmd::add::run_add(args, &mut registry, output),
        Commands::Edit(args) => cmd::edit::run_edit(args, &mut registry, output),
        Commands::Delete(args) => cmd::delete::run_delete(args, &mut registry, output),
        Commands::Summary(args) => cmd::summary::run_summary(args, &registry, &ctx, output),
        Commands::Export(args) => cmd::export::run_export(args, &registry, output),
        Commands::Config(args) => cmd::config::run_config(args, output),
        Commands::Completions(args) => {
            cmd::completions::run_completions(args, &mut Cli::command())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<ValidationFailed>() => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_global_flags_before_subcommands() {
        let cli = Cli::parse_from(["vero", "--format", "json", "list", "athletes"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert!(matches!(cli.command, Commands::List(_)));
    }

    #[test]
    fn cli_debug_asserts() {
        Cli::command().debug_assert();
    }
}
