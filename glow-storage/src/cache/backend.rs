//! Cache backend trait and in-memory implementation.
//!
//! The backend is a plain key-value store with per-entry TTL. Values are
//! stored as `serde_json::Value` so one backend serves every metric shape;
//! the read-through layer owns encoding and decoding.

use ::async_trait::async_trait;
use chrono::{DateTime, Utc};
use glow_core::{GlowResult, Timestamp};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::key::MetricKey;

/// Cache backend trait for pluggable cache stores.
///
/// Implementations must be thread-safe and support concurrent access. No
/// locking discipline is required beyond atomic put/get: entries are
/// independently keyed and metric computations are idempotent, so a lost
/// or duplicate write costs performance, never correctness.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get a live (unexpired) value.
    async fn get(&self, key: &MetricKey) -> GlowResult<Option<Value>>;

    /// Store a value for `ttl`.
    async fn put(&self, key: &MetricKey, value: Value, ttl: Duration) -> GlowResult<()>;

    /// Remove a single entry.
    async fn forget(&self, key: &MetricKey) -> GlowResult<()>;

    /// Remove all entries. Returns how many were dropped.
    async fn flush(&self) -> GlowResult<u64>;

    /// Get cache statistics.
    async fn stats(&self) -> GlowResult<CacheStats>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (including expired entries).
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Number of entries dropped because their TTL had passed.
    pub expired: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Timestamp,
}

/// In-memory cache backend with lazy expiry.
///
/// Expired entries are dropped when a read encounters them; a flush clears
/// the rest. Suitable for a single-process deployment and for tests.
#[derive(Debug, Default)]
pub struct InMemoryCacheBackend {
    entries: tokio::sync::RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl InMemoryCacheBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn expires_at(ttl: Duration) -> Timestamp {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::days(1));
        Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn get(&self, key: &MetricKey) -> GlowResult<Option<Value>> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key.as_str()) {
                Some(entry) if entry.expires_at > now => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return Ok(None);
                }
            }
        }

        // Entry expired: drop it under the write lock. Re-check the deadline
        // in case a concurrent put refreshed the entry in between.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key.as_str()) {
            if entry.expires_at > now {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entry.value.clone()));
            }
            entries.remove(key.as_str());
            self.expired.fetch_add(1, Ordering::Relaxed);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn put(&self, key: &MetricKey, value: Value, ttl: Duration) -> GlowResult<()> {
        let entry = CacheEntry {
            value,
            expires_at: Self::expires_at(ttl),
        };
        let mut entries = self.entries.write().await;
        entries.insert(key.as_str().to_string(), entry);
        Ok(())
    }

    async fn forget(&self, key: &MetricKey) -> GlowResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key.as_str());
        Ok(())
    }

    async fn flush(&self) -> GlowResult<u64> {
        let mut entries = self.entries.write().await;
        let dropped = entries.len() as u64;
        entries.clear();
        Ok(dropped)
    }

    async fn stats(&self) -> GlowResult<CacheStats> {
        let entries = self.entries.read().await;
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: entries.len() as u64,
            expired: self.expired.load(Ordering::Relaxed),
        })
    }
}
