//! `vero edit` — patch fields on an existing record.
//!
//! The form is prefilled from the current record, so unset fields keep
//! their values and the whole merged draft is re-validated. An unknown id
//! leaves the store as it was and reports the miss.

use crate::cmd::{parse_record_id, parse_set_pairs};
use crate::output::{OutputMode, ValidationFailed, render, render_error};
use crate::registry::ViewRegistry;
use crate::screen::FormResult;
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write as _;

use super::add::{report_rejection, unknown_field_error};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// View key (see `vero views`).
    pub view: String,

    /// Record id from the Id column.
    pub id: String,

    /// Field assignment, repeatable: --set progress=70
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
}

#[derive(Debug, Serialize)]
struct EditOutput {
    status: &'static str,
    id: String,
}

pub fn run_edit(args: &EditArgs, registry: &mut ViewRegistry, output: OutputMode) -> Result<()> {
    let id = match parse_record_id(&args.id) {
        Ok(id) => id,
        Err(error) => {
            render_error(output, &error)?;
            return Err(ValidationFailed.into());
        }
    };
    let fields = match parse_set_pairs(&args.set) {
        Ok(fields) => fields,
        Err(error) => {
            render_error(output, &error)?;
            return Err(ValidationFailed.into());
        }
    };

    let view = registry.resolve_mut(&args.view)?;
    match view.update(id, &fields) {
        Err(unknown) => {
            render_error(output, &unknown_field_error(view.as_ref(), &unknown.0))?;
            Err(ValidationFailed.into())
        }
        Ok(FormResult::Updated(id)) => {
            let out = EditOutput {
                status: "updated",
                id: id.to_string(),
            };
            render(output, &out, |out, w| {
                writeln!(w, "Updated record {} in '{}'", out.id, args.view)?;
                write!(w, "{}", view.render_table())?;
                Ok(())
            })
        }
        Ok(FormResult::Missing(id)) => {
            let out = EditOutput {
                status: "missing",
                id: id.to_string(),
            };
            render(output, &out, |out, w| {
                writeln!(
                    w,
                    "No record {} in '{}'; nothing changed",
                    out.id, args.view
                )?;
                Ok(())
            })
        }
        Ok(FormResult::Rejected) => {
            report_rejection(view.as_ref(), output)?;
            Err(ValidationFailed.into())
        }
        Ok(_) => Ok(()),
    }
}
