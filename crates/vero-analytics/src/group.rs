//! Group-by reducers.
//!
//! All outputs are `BTreeMap`s so iteration order is deterministic for a
//! given input. Empty inputs and empty groups resolve to `0`; no function
//! here can return `NaN` or `Infinity`.

use std::collections::BTreeMap;

/// Count records per group key.
#[must_use]
pub fn count_by<T, K: Ord>(records: &[T], key: impl Fn(&T) -> K) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Sum a numeric field per group key.
#[must_use]
pub fn sum_by<T, K: Ord>(
    records: &[T],
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> f64,
) -> BTreeMap<K, f64> {
    let mut sums = BTreeMap::new();
    for record in records {
        *sums.entry(key(record)).or_insert(0.0) += value(record);
    }
    sums
}

/// Arithmetic mean of a numeric field per group key.
///
/// A group present in the output always has at least one member, but the
/// division is still guarded so the contract holds under any refactor.
#[must_use]
pub fn mean_by<T, K: Ord>(
    records: &[T],
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> f64,
) -> BTreeMap<K, f64> {
    let mut acc: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = acc.entry(key(record)).or_insert((0.0, 0));
        entry.0 += value(record);
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(k, (sum, n))| (k, safe_div(sum, n)))
        .collect()
}

/// Arithmetic mean over an iterator; `0` on empty input, never `NaN`.
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0_usize;
    for v in values {
        sum += v;
        n += 1;
    }
    safe_div(sum, n)
}

/// Percentage of total; `0` when the total is zero.
#[must_use]
pub fn share_pct(part: f64, total: f64) -> f64 {
    if total.abs() < f64::EPSILON {
        0.0
    } else {
        part / total * 100.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn safe_div(sum: f64, n: usize) -> f64 {
    if n == 0 { 0.0 } else { sum / n as f64 }
}
