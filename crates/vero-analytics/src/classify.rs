//! Threshold-based health classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status flag attached to a record by an aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Health {
    OnTrack,
    AtRisk,
    Overdue,
}

impl Health {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on track",
            Self::AtRisk => "at risk",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overdue when the due date is strictly in the past and the record is not
/// resolved. `today` comes from the caller so one pass is self-consistent.
#[must_use]
pub fn classify_due(due: NaiveDate, resolved: bool, today: NaiveDate) -> Health {
    if !resolved && due < today {
        Health::Overdue
    } else {
        Health::OnTrack
    }
}

/// At risk when a score sits below a fixed floor.
#[must_use]
pub fn classify_score(score: f64, floor: f64) -> Health {
    if score < floor {
        Health::AtRisk
    } else {
        Health::OnTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn due_yesterday_and_unresolved_is_overdue() {
        let today = date(2026, 3, 10);
        assert_eq!(classify_due(date(2026, 3, 9), false, today), Health::Overdue);
    }

    #[test]
    fn due_today_is_not_overdue() {
        let today = date(2026, 3, 10);
        assert_eq!(classify_due(today, false, today), Health::OnTrack);
    }

    #[test]
    fn resolved_records_are_never_overdue() {
        let today = date(2026, 3, 10);
        assert_eq!(classify_due(date(2020, 1, 1), true, today), Health::OnTrack);
    }

    #[test]
    fn classification_uses_the_passed_today_not_the_clock() {
        let long_ago = date(1999, 1, 1);
        assert_eq!(
            classify_due(date(1999, 6, 1), false, long_ago),
            Health::OnTrack
        );
    }

    #[test]
    fn scores_below_the_floor_are_at_risk() {
        assert_eq!(classify_score(3.9, 4.0), Health::AtRisk);
        assert_eq!(classify_score(4.0, 4.0), Health::OnTrack);
    }
}
