//! Command handlers, one module per subcommand.

pub mod add;
pub mod board;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod summary;
pub mod views;

use crate::output::CliError;
use vero_core::RecordId;

/// Split `--set field=value` pairs on the first `=`.
pub fn parse_set_pairs(pairs: &[String]) -> Result<Vec<(String, String)>, CliError> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(field, value)| (field.trim().to_string(), value.to_string()))
                .ok_or_else(|| {
                    CliError::with_suggestion(
                        format!("invalid --set '{pair}'"),
                        "use --set field=value",
                        "invalid_set",
                    )
                })
        })
        .collect()
}

/// Parse a record id argument.
pub fn parse_record_id(raw: &str) -> Result<RecordId, CliError> {
    raw.parse().map_err(|_| {
        CliError::with_suggestion(
            format!("invalid record id '{raw}'"),
            "ids are the base-36 values shown in the Id column",
            "invalid_record_id",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_pairs_split_on_the_first_equals() {
        let pairs = vec!["name=Ana".to_string(), "note=a=b".to_string()];
        let parsed = parse_set_pairs(&pairs).expect("valid pairs");
        assert_eq!(
            parsed,
            [
                ("name".to_string(), "Ana".to_string()),
                ("note".to_string(), "a=b".to_string())
            ]
        );
    }

    #[test]
    fn set_pair_without_equals_is_rejected() {
        let err = parse_set_pairs(&["name".to_string()]).expect_err("missing =");
        assert_eq!(err.code, "invalid_set");
    }

    #[test]
    fn record_ids_parse_from_base36() {
        assert!(parse_record_id("1z").is_ok());
        assert!(parse_record_id("not an id!").is_err());
    }
}
