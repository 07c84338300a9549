//! `vero summary` — aggregate view of one view's records.
//!
//! Computed fresh from the current records on every invocation; `today` is
//! taken once so the whole pass classifies against the same date.

use crate::output::{OutputMode, pretty_kv, pretty_section, render};
use crate::registry::ViewRegistry;
use crate::screen::ViewContext;
use anyhow::Result;
use clap::Args;
use std::io::Write as _;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// View key (see `vero views`).
    pub view: String,
}

pub fn run_summary(
    args: &SummaryArgs,
    registry: &ViewRegistry,
    ctx: &ViewContext,
    output: OutputMode,
) -> Result<()> {
    let view = registry.resolve(&args.view)?;
    let summary = view.summary(ctx);

    render(output, &summary, |summary, w| {
        if output.is_pretty() {
            pretty_section(w, &format!("{} — summary", view.title()))?;
        }
        pretty_kv(w, "Records", summary.total.to_string())?;
        writeln!(w)?;
        for group in &summary.groups {
            let mean = group
                .mean
                .map_or(String::new(), |m| format!("  mean {m:.1}"));
            writeln!(
                w,
                "{:<14} {:>3}  {:>5.1}%{mean}",
                group.key, group.count, group.share_pct
            )?;
        }
        if !summary.flagged.is_empty() {
            writeln!(w)?;
            for flag in &summary.flagged {
                writeln!(w, "{:<10} {} ({})", flag.health.to_string(), flag.label, flag.id)?;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_args_take_the_view_key() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: SummaryArgs,
        }
        let w = Wrapper::parse_from(["test", "compliance"]);
        assert_eq!(w.args.view, "compliance");
    }
}
