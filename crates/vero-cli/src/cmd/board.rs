//! `vero board` — the interactive dashboard.

use crate::registry::ViewRegistry;
use crate::screen::ViewContext;
use crate::tui;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// View to open on (defaults to the configured board.default_view).
    #[arg(long, value_name = "KEY")]
    pub view: Option<String>,
}

pub fn run_board(
    args: &BoardArgs,
    registry: ViewRegistry,
    ctx: ViewContext,
    default_view: &str,
) -> Result<()> {
    let start = args.view.as_deref().unwrap_or(default_view);
    // Fail on a bad key before touching the terminal.
    registry.resolve(start)?;
    tui::board::run(registry, ctx, start)
}
