//! `vero list` — render one view's records as a table.

use crate::output::{OutputMode, pretty_section, render};
use crate::registry::ViewRegistry;
use anyhow::Result;
use clap::Args;
use std::io::Write as _;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// View key (see `vero views`).
    pub view: String,
}

pub fn run_list(args: &ListArgs, registry: &ViewRegistry, output: OutputMode) -> Result<()> {
    let view = registry.resolve(&args.view)?;
    let records = view.records_json();

    render(output, &records, |_, w| {
        if output.is_pretty() {
            pretty_section(w, view.title())?;
        }
        write!(w, "{}", view.render_table())?;
        if output.is_pretty() {
            writeln!(w, "{} records", view.len())?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_args_take_the_view_key() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ListArgs,
        }
        let w = Wrapper::parse_from(["test", "athletes"]);
        assert_eq!(w.args.view, "athletes");
    }
}
