//! TTL policy for metric cache entries.
//!
//! The lifetime of an entry depends only on whether the queried range ends
//! before the current UTC day: ranges touching today (or the future) are
//! still accumulating orders and get the short TTL; ranges fully in the
//! past are immutable and can live for a day.

use chrono::{NaiveTime, Utc};
use glow_core::{AnalyticsConfig, Timestamp};
use std::time::Duration;

/// Pure TTL policy: maps a query end timestamp to an entry lifetime.
///
/// No state, no I/O; `now` is an explicit input so boundary cases are
/// directly testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// TTL when the range end is not strictly before the start of the
    /// current day.
    pub current_ttl: Duration,
    /// TTL when the range ended before the current day.
    pub past_ttl: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        let config = AnalyticsConfig::default();
        Self {
            current_ttl: config.current_ttl,
            past_ttl: config.past_ttl,
        }
    }
}

impl TtlPolicy {
    /// Create a policy with explicit durations.
    pub fn new(current_ttl: Duration, past_ttl: Duration) -> Self {
        Self {
            current_ttl,
            past_ttl,
        }
    }

    /// Create a policy from the analytics configuration.
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self {
            current_ttl: config.current_ttl,
            past_ttl: config.past_ttl,
        }
    }

    /// TTL for a range ending at `end`, evaluated at `now`.
    pub fn ttl_at(&self, end: Timestamp, now: Timestamp) -> Duration {
        let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
        if end >= day_start {
            self.current_ttl
        } else {
            self.past_ttl
        }
    }

    /// TTL for a range ending at `end`, evaluated now.
    pub fn ttl_for(&self, end: Timestamp) -> Duration {
        self.ttl_at(end, Utc::now())
    }
}
