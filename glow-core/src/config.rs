//! Configuration for the analytics layer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for metric caching and report defaults.
///
/// TTLs implement the two-tier staleness policy: ranges still touching the
/// current day keep accumulating orders and get the short TTL; ranges fully
/// in the past are immutable and get the long one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// TTL for ranges whose end touches the current day.
    pub current_ttl: Duration,
    /// TTL for ranges that ended before the current day.
    pub past_ttl: Duration,
    /// Row limit for top-selling-products when the caller passes none.
    pub top_products_limit: usize,
    /// Low-stock threshold for products that don't carry their own.
    pub fallback_low_stock_threshold: i32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            current_ttl: Duration::from_secs(900),
            past_ttl: Duration::from_secs(86_400),
            top_products_limit: 10,
            fallback_low_stock_threshold: 5,
        }
    }
}

impl AnalyticsConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL for current-period queries.
    pub fn with_current_ttl(mut self, ttl: Duration) -> Self {
        self.current_ttl = ttl;
        self
    }

    /// Set the TTL for past-period queries.
    pub fn with_past_ttl(mut self, ttl: Duration) -> Self {
        self.past_ttl = ttl;
        self
    }

    /// Set the default top-products row limit.
    pub fn with_top_products_limit(mut self, limit: usize) -> Self {
        self.top_products_limit = limit;
        self
    }

    /// Set the fallback low-stock threshold.
    pub fn with_fallback_low_stock_threshold(mut self, threshold: i32) -> Self {
        self.fallback_low_stock_threshold = threshold;
        self
    }
}
