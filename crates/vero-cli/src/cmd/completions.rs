//! `vero completions` — generate shell completion scripts.

use anyhow::Result;
use clap::Args;
use clap_complete::Shell;
use std::io;

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run_completions(args: &CompletionsArgs, cmd: &mut clap::Command) -> Result<()> {
    clap_complete::generate(args.shell, cmd, "vero", &mut io::stdout());
    Ok(())
}
