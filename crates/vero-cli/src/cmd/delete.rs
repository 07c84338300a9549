//! `vero delete` — remove a record.
//!
//! Deleting is immediate and final for the life of the process. A second
//! delete of the same id reports the miss and changes nothing.

use crate::cmd::parse_record_id;
use crate::output::{OutputMode, ValidationFailed, render, render_error};
use crate::registry::ViewRegistry;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write as _;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// View key (see `vero views`).
    pub view: String,

    /// Record id from the Id column.
    pub id: String,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    status: &'static str,
    id: String,
    records: usize,
}

pub fn run_delete(args: &DeleteArgs, registry: &mut ViewRegistry, output: OutputMode) -> Result<()> {
    let id = match parse_record_id(&args.id) {
        Ok(id) => id,
        Err(error) => {
            render_error(output, &error)?;
            return Err(ValidationFailed.into());
        }
    };

    let view = registry.resolve_mut(&args.view)?;
    let removed = view.delete(id);
    let out = DeleteOutput {
        status: if removed { "deleted" } else { "missing" },
        id: id.to_string(),
        records: view.len(),
    };
    render(output, &out, |out, w| {
        if removed {
            writeln!(w, "Deleted record {} from '{}'", out.id, args.view)?;
        } else {
            writeln!(w, "No record {} in '{}'; nothing changed", out.id, args.view)?;
        }
        writeln!(w, "{} records remain", out.records)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_args_take_view_then_id() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: DeleteArgs,
        }
        let w = Wrapper::parse_from(["test", "finance", "5"]);
        assert_eq!(w.args.view, "finance");
        assert_eq!(w.args.id, "5");
    }
}
