//! Shared output layer for pretty/text/JSON parity across commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: framed sections for humans, compact text for pipes, or
//! stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` flag
//! 2. `VERO_FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Config file default, if set
//! 4. [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use thiserror::Error;

/// Shared width for pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 64;

/// Marker error: input was rejected by validation. Maps to exit code 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("validation failed")]
pub struct ValidationFailed;

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, visual framing).
    Pretty,
    /// Plain text for pipes and scripts.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    #[must_use]
    pub fn is_pretty(self) -> bool {
        matches!(self, Self::Pretty)
    }
}

/// Resolve the output mode from flag, env, config default, and TTY state.
#[must_use]
pub fn resolve_output_mode(flag: Option<OutputMode>, config_default: Option<&str>) -> OutputMode {
    resolve_output_mode_inner(
        flag,
        std::env::var("VERO_FORMAT").ok().as_deref(),
        config_default,
        io::stdout().is_terminal(),
    )
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    flag: Option<OutputMode>,
    format_env: Option<&str>,
    config_default: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = flag {
        return mode;
    }
    for candidate in [format_env, config_default].into_iter().flatten() {
        match candidate.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value — fall through
        }
    }
    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Write a horizontal separator used by pretty output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}

/// A user-facing command failure with an actionable suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub code: &'static str,
}

impl CliError {
    #[must_use]
    pub fn new(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            code,
        }
    }

    #[must_use]
    pub fn with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
        code: &'static str,
    ) -> Self {
        Self {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            code,
        }
    }
}

/// Render a value with JSON short-circuit: JSON mode serializes `value`,
/// the other modes run the human closure (which sees the mode).
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, value)?;
        writeln!(w)?;
    } else {
        human(value, &mut w)?;
    }
    Ok(())
}

/// Render an error to stderr in the active mode.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut w = stderr.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, error)?;
        writeln!(w)?;
    } else {
        writeln!(w, "error: {}", error.message)?;
        if let Some(suggestion) = &error.suggestion {
            writeln!(w, "  hint: {suggestion}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env_and_config() {
        let mode =
            resolve_output_mode_inner(Some(OutputMode::Json), Some("text"), Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn env_beats_config_default() {
        let mode = resolve_output_mode_inner(None, Some("json"), Some("text"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn unknown_env_value_falls_through_to_config() {
        let mode = resolve_output_mode_inner(None, Some("yaml"), Some("json"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn tty_detection_is_the_last_resort() {
        assert_eq!(
            resolve_output_mode_inner(None, None, None, true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, None, None, false),
            OutputMode::Text
        );
    }
}
