//! User-scope configuration.
//!
//! Lives at `$VERO_CONFIG_DIR/config.toml`, falling back to the platform
//! config dir (`~/.config/vero/config.toml` on Linux). Missing file means
//! defaults; unknown keys in `config set` are rejected with the known list.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Dot-path keys accepted by `config set` / `config unset`.
pub const KNOWN_KEYS: &[&str] = &[
    "output.format",
    "board.default_view",
    "thresholds.progress_floor",
    "thresholds.support_floor",
    "thresholds.sentiment_floor",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "pretty" | "text" | "json".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// View the board opens on.
    #[serde(default = "default_view")]
    pub default_view: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
        }
    }
}

/// At-risk cutoffs consumed by view summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Athletes below this progress are flagged.
    #[serde(default = "default_progress_floor")]
    pub progress_floor: f64,
    /// Stakeholders at or below this support score are flagged.
    #[serde(default = "default_support_floor")]
    pub support_floor: f64,
    /// Sentiment entries below this score are flagged.
    #[serde(default = "default_sentiment_floor")]
    pub sentiment_floor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            progress_floor: default_progress_floor(),
            support_floor: default_support_floor(),
            sentiment_floor: default_sentiment_floor(),
        }
    }
}

fn default_view() -> String {
    "athletes".to_string()
}

const fn default_progress_floor() -> f64 {
    35.0
}

const fn default_support_floor() -> f64 {
    2.0
}

const fn default_sentiment_floor() -> f64 {
    5.0
}

/// Directory holding `config.toml`, honoring the `VERO_CONFIG_DIR` override.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("VERO_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|d| d.join("vero"))
        .context("could not determine a config directory; set VERO_CONFIG_DIR")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the user config, treating a missing file as defaults.
pub fn load() -> Result<UserConfig> {
    let path = config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(UserConfig::default());
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Write the config back, creating the directory on first use.
pub fn save(config: &UserConfig) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    let path = dir.join("config.toml");
    let raw = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Set one dot-path key, validating both the key and the value.
pub fn set_key(config: &mut UserConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "output.format" => {
            let normalized = value.to_lowercase();
            if !matches!(normalized.as_str(), "pretty" | "text" | "json") {
                bail!("invalid format '{value}': expected pretty, text, or json");
            }
            config.output.format = Some(normalized);
        }
        "board.default_view" => config.board.default_view = value.to_string(),
        "thresholds.progress_floor" => config.thresholds.progress_floor = parse_floor(value)?,
        "thresholds.support_floor" => config.thresholds.support_floor = parse_floor(value)?,
        "thresholds.sentiment_floor" => config.thresholds.sentiment_floor = parse_floor(value)?,
        other => bail!("unknown config key '{other}'; known keys: {}", KNOWN_KEYS.join(", ")),
    }
    Ok(())
}

/// Reset one dot-path key to its default.
pub fn unset_key(config: &mut UserConfig, key: &str) -> Result<()> {
    match key {
        "output.format" => config.output.format = None,
        "board.default_view" => config.board.default_view = default_view(),
        "thresholds.progress_floor" => config.thresholds.progress_floor = default_progress_floor(),
        "thresholds.support_floor" => config.thresholds.support_floor = default_support_floor(),
        "thresholds.sentiment_floor" => {
            config.thresholds.sentiment_floor = default_sentiment_floor();
        }
        other => bail!("unknown config key '{other}'; known keys: {}", KNOWN_KEYS.join(", ")),
    }
    Ok(())
}

fn parse_floor(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .parse()
        .with_context(|| format!("invalid threshold '{value}': expected a number"))?;
    if !parsed.is_finite() {
        bail!("invalid threshold '{value}': expected a finite number");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_field_by_field() {
        let parsed: UserConfig = toml::from_str("[thresholds]\nprogress_floor = 50.0\n")
            .expect("partial config parses");
        assert_eq!(parsed.thresholds.progress_floor, 50.0);
        assert_eq!(parsed.thresholds.support_floor, default_support_floor());
        assert_eq!(parsed.board.default_view, "athletes");
        assert!(parsed.output.format.is_none());
    }

    #[test]
    fn set_key_validates_format_values() {
        let mut config = UserConfig::default();
        set_key(&mut config, "output.format", "JSON").expect("valid format");
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert!(set_key(&mut config, "output.format", "yaml").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected_with_the_known_list() {
        let mut config = UserConfig::default();
        let err = set_key(&mut config, "board.theme", "dark").expect_err("unknown key");
        assert!(err.to_string().contains("board.default_view"));
    }

    #[test]
    fn unset_restores_defaults() {
        let mut config = UserConfig::default();
        set_key(&mut config, "thresholds.progress_floor", "10").expect("set");
        unset_key(&mut config, "thresholds.progress_floor").expect("unset");
        assert_eq!(config.thresholds.progress_floor, default_progress_floor());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = UserConfig::default();
        set_key(&mut config, "board.default_view", "finance").expect("set");
        let raw = toml::to_string_pretty(&config).expect("serialize");
        let back: UserConfig = toml::from_str(&raw).expect("parse");
        assert_eq!(back, config);
    }
}
