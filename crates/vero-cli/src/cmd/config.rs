//! `vero config` — show or edit the user configuration.

use crate::config::{self, UserConfig};
use crate::output::{OutputMode, pretty_section, render};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::io::Write as _;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Show the resolved configuration
    Show,
    /// Set a configuration key (e.g. output.format, thresholds.progress_floor)
    Set(SetArgs),
    /// Reset a configuration key to its default
    Unset(UnsetArgs),
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Dot-path key (see `vero config show`)
    key: String,
    /// New value
    value: String,
}

#[derive(Args, Debug)]
struct UnsetArgs {
    /// Dot-path key
    key: String,
}

pub fn run_config(args: &ConfigArgs, output: OutputMode) -> Result<()> {
    match &args.command {
        ConfigCommand::Show => {
            let loaded = config::load()?;
            render(output, &loaded, |loaded, w| {
                if output.is_pretty() {
                    pretty_section(w, "Configuration")?;
                }
                let raw = toml::to_string_pretty(loaded).unwrap_or_default();
                write!(w, "{raw}")?;
                Ok(())
            })
        }
        ConfigCommand::Set(set) => {
            let mut loaded = config::load()?;
            config::set_key(&mut loaded, &set.key, &set.value)?;
            config::save(&loaded)?;
            announce(output, &loaded, &format!("{} = {}", set.key, set.value))
        }
        ConfigCommand::Unset(unset) => {
            let mut loaded = config::load()?;
            config::unset_key(&mut loaded, &unset.key)?;
            config::save(&loaded)?;
            announce(output, &loaded, &format!("{} reset to default", unset.key))
        }
    }
}

fn announce(output: OutputMode, config: &UserConfig, message: &str) -> Result<()> {
    render(output, config, |_, w| {
        writeln!(w, "{message}")?;
        Ok(())
    })
}
