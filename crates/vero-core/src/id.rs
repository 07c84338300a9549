//! Record identifiers.
//!
//! Ids are assigned once at creation time and never change. The value is a
//! microsecond timestamp pushed forward past the previous allocation, so ids
//! are pairwise distinct and sort in creation order. Seed rows use a
//! reserved low range ([`RecordId::seed`]) that generated ids can never
//! collide with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Generated ids always land at or above this floor; seed ids stay below it.
const GENERATED_FLOOR: i64 = 1 << 40;

/// Unique identifier of one record within a store.
///
/// Displays as lowercase base-36 (e.g. `1m5kz0vnswg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(i64);

/// Failure to parse a [`RecordId`] from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid record id '{0}': expected lowercase base-36 digits")]
pub struct ParseIdError(String);

impl RecordId {
    /// Id for a hardcoded seed row. Seed numbering is per-view and small.
    #[must_use]
    pub const fn seed(n: u32) -> Self {
        Self(n as i64)
    }

    /// Raw microsecond value backing this id.
    #[must_use]
    pub const fn as_micros(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut n = self.0;
        if n == 0 {
            return f.write_str("0");
        }
        let mut buf = [0_u8; 16];
        let mut at = buf.len();
        while n > 0 {
            at -= 1;
            let digit = u8::try_from(n % 36).unwrap_or(0);
            buf[at] = if digit < 10 {
                b'0' + digit
            } else {
                b'a' + (digit - 10)
            };
            n /= 36;
        }
        f.write_str(std::str::from_utf8(&buf[at..]).unwrap_or("0"))
    }
}

impl FromStr for RecordId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError(s.to_string()));
        }
        i64::from_str_radix(trimmed, 36)
            .map(Self)
            .map_err(|_| ParseIdError(s.to_string()))
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = ParseIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Allocator handing out strictly increasing timestamp-based ids.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(GENERATED_FLOOR),
        }
    }

    /// Allocate the next id: the current wall clock in microseconds, pushed
    /// forward if the clock has not advanced since the last allocation.
    pub fn next_id(&self) -> RecordId {
        let now = now_micros().max(GENERATED_FLOOR);
        let prev = self
            .last
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
                Some(last.max(now - 1).saturating_add(1))
            })
            .unwrap_or(now);
        RecordId(prev.max(now - 1).saturating_add(1))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn now_micros() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct_and_increasing() {
        let ids = IdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn seed_ids_never_collide_with_generated() {
        let ids = IdGenerator::new();
        let generated = ids.next_id();
        assert!(RecordId::seed(u32::MAX) < generated);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let ids = IdGenerator::new();
        let id = ids.next_id();
        let parsed: RecordId = id.to_string().parse().expect("round trip");
        assert_eq!(id, parsed);

        let small = RecordId::seed(7);
        assert_eq!(small.to_string().parse::<RecordId>(), Ok(small));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<RecordId>().is_err());
        assert!("not an id!".parse::<RecordId>().is_err());
        assert!("ABC DEF".parse::<RecordId>().is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let id = RecordId::seed(42);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
        let back: RecordId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
