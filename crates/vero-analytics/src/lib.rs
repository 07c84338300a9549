//! Derived aggregation for CourtEvo Vero.
//!
//! Summary values are pure functions of the current records: group counts,
//! means, shares of total, and threshold health flags. Everything here is
//! recomputed on every call. Record counts are bounded by manual data
//! entry (tens, not millions), so there is no cache and no invalidation
//! protocol, and none should be added.
//!
//! Date-relative classification never reads the wall clock; callers compute
//! `today` once per pass and thread it through, so a single pass is
//! internally consistent and tests can pin dates.

pub mod classify;
pub mod group;
pub mod summary;

pub use classify::{Health, classify_due, classify_score};
pub use group::{count_by, mean, mean_by, share_pct, sum_by};
pub use summary::{FlaggedRecord, GroupSummary, ViewSummary, summarize};
