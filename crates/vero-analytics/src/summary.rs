//! The aggregate read model a view renders.
//!
//! A [`ViewSummary`] is assembled fresh on every call from the current
//! records; nothing in it is stored. Group rows are ordered by key so JSON
//! output is stable.

use crate::classify::Health;
use crate::group::{count_by, mean_by, share_pct};
use serde::Serialize;
use vero_core::RecordId;

/// One group's slice of the view: count, share of total, optional mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub share_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

/// A record flagged by threshold classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedRecord {
    pub id: RecordId,
    pub label: String,
    pub health: Health,
}

/// Everything a summary panel shows for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    pub total: usize,
    pub groups: Vec<GroupSummary>,
    pub flagged: Vec<FlaggedRecord>,
}

impl ViewSummary {
    /// Summary of a view with nothing in it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: 0,
            groups: Vec::new(),
            flagged: Vec::new(),
        }
    }
}

/// Build group rows from a key accessor plus an optional numeric metric.
///
/// Counts, shares, and means compose the [`crate::group`] reducers, so the
/// zero-division guarantees carry over: an empty slice produces an empty
/// group list, and every share is a finite percentage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize<T>(
    records: &[T],
    key: impl Fn(&T) -> String,
    metric: Option<&dyn Fn(&T) -> f64>,
) -> Vec<GroupSummary> {
    let counts = count_by(records, &key);
    let means = metric.map(|value| mean_by(records, &key, value));
    let total = records.len() as f64;

    counts
        .into_iter()
        .map(|(group, count)| GroupSummary {
            mean: means.as_ref().and_then(|m| m.get(&group).copied()),
            share_pct: share_pct(count as f64, total),
            key: group,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        stage: &'static str,
        progress: f64,
    }

    fn rows() -> Vec<Entry> {
        vec![
            Entry {
                stage: "fund",
                progress: 50.0,
            },
            Entry {
                stage: "fund",
                progress: 70.0,
            },
            Entry {
                stage: "elite",
                progress: 90.0,
            },
            Entry {
                stage: "elite",
                progress: 30.0,
            },
        ]
    }

    #[test]
    fn groups_carry_count_share_and_mean() {
        let rows = rows();
        let groups = summarize(&rows, |e| e.stage.to_string(), Some(&|e: &Entry| e.progress));
        assert_eq!(groups.len(), 2);
        let fund = groups.iter().find(|g| g.key == "fund").expect("fund group");
        assert_eq!(fund.count, 2);
        assert_eq!(fund.share_pct, 50.0);
        assert_eq!(fund.mean, Some(60.0));
    }

    #[test]
    fn without_a_metric_means_are_absent() {
        let rows = rows();
        let groups = summarize(&rows, |e| e.stage.to_string(), None);
        assert!(groups.iter().all(|g| g.mean.is_none()));
    }

    #[test]
    fn empty_records_summarize_to_no_groups() {
        let rows: Vec<Entry> = Vec::new();
        assert!(summarize(&rows, |e| e.stage.to_string(), None).is_empty());
    }

    #[test]
    fn group_order_is_stable_by_key() {
        let rows = rows();
        let keys: Vec<String> = summarize(&rows, |e| e.stage.to_string(), None)
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(keys, ["elite", "fund"]);
    }
}
