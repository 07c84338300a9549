//! `vero add` — create a record through the view's form.
//!
//! Fields arrive as `--set field=value` pairs; the form validates the whole
//! draft on submit and a rejection reports every broken field at once
//! without touching the store.

use crate::cmd::parse_set_pairs;
use crate::output::{CliError, OutputMode, ValidationFailed, render, render_error};
use crate::registry::ViewRegistry;
use crate::screen::{FormResult, ViewModule};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write as _;
use vero_core::FieldErrors;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// View key (see `vero views`).
    pub view: String,

    /// Field assignment, repeatable: --set name=Luka --set stage=foundation
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddOutput {
    status: &'static str,
    id: String,
    records: usize,
}

#[derive(Debug, Serialize)]
struct InvalidOutput {
    status: &'static str,
    errors: FieldErrors,
}

pub fn run_add(args: &AddArgs, registry: &mut ViewRegistry, output: OutputMode) -> Result<()> {
    let fields = match parse_set_pairs(&args.set) {
        Ok(fields) => fields,
        Err(error) => {
            render_error(output, &error)?;
            return Err(ValidationFailed.into());
        }
    };

    let view = registry.resolve_mut(&args.view)?;
    match view.create(&fields) {
        Err(unknown) => {
            render_error(output, &unknown_field_error(view.as_ref(), &unknown.0))?;
            Err(ValidationFailed.into())
        }
        Ok(FormResult::Created(id)) => {
            let out = AddOutput {
                status: "created",
                id: id.to_string(),
                records: view.len(),
            };
            render(output, &out, |out, w| {
                writeln!(w, "Created record {} in '{}'", out.id, args.view)?;
                write!(w, "{}", view.render_table())?;
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

/// Render the per-field messages from the view's form.
pub fn report_rejection(view: &dyn ViewModule, output: OutputMode) -> Result<()> {
    let errors = view.form_errors().clone();
    if output.is_json() {
        let out = InvalidOutput {
            status: "invalid",
            errors,
        };
        render(output, &out, |_, _| Ok(()))
    } else {
        let stderr = std::io::stderr();
        let mut w = stderr.lock();
        writeln!(w, "error: invalid {} record:", view.key())?;
        for (field, message) in errors.iter() {
            writeln!(w, "  {field}: {message}")?;
        }
        Ok(())
    }
}

pub fn unknown_field_error(view: &dyn ViewModule, field: &str) -> CliError {
    let known: Vec<&str> = view.field_specs().iter().map(|f| f.name).collect();
    CliError::with_suggestion(
        format!("unknown field '{field}' for view '{}'", view.key()),
        format!("known fields: {}", known.join(", ")),
        "unknown_field",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_collect_repeated_set_flags() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: AddArgs,
        }
        let w = Wrapper::parse_from(["test", "athletes", "--set", "name=Luka", "--set", "progress=50"]);
        assert_eq!(w.args.view, "athletes");
        assert_eq!(w.args.set.len(), 2);
    }
}
