//! Metric cache with explicit TTL policy and broad invalidation.
//!
//! This module provides the read-through cache that fronts every analytics
//! aggregate computation.
//!
//! # Design
//!
//! Each cacheable computation is identified by a [`glow_core::MetricRequest`];
//! [`MetricKey`] derives a deterministic key from it, so identical logical
//! requests always map to the same entry regardless of parameter insertion
//! order. The TTL of an entry is a pure function of the request's end
//! timestamp ([`TtlPolicy`]): ranges touching the current day are still
//! accumulating orders and get a short TTL, ranges fully in the past are
//! immutable and get a long one.
//!
//! Invalidation is deliberately broad: order creation flushes every metric
//! entry. Over-invalidation only costs recomputation; it can never serve a
//! wrong value.
//!
//! # Example
//!
//! ```ignore
//! let cache = MetricCache::with_defaults(Arc::new(InMemoryCacheBackend::new()));
//! let request = MetricRequest::new("revenue", start, end);
//!
//! let revenue: i64 = cache
//!     .get_or_compute(&request, || aggregator.revenue(start, end))
//!     .await?;
//!
//! // After an order lands:
//! cache.invalidate_all().await?;
//! ```

pub mod backend;
pub mod key;
pub mod read_through;
pub mod ttl;

pub use backend::{CacheBackend, CacheStats, InMemoryCacheBackend};
pub use key::MetricKey;
pub use read_through::MetricCache;
pub use ttl::TtlPolicy;
