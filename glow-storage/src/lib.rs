//! Glow Storage - Store Trait, In-Memory Implementation, and Metric Cache
//!
//! Defines the storage abstraction the analytics layer reads from, a
//! reference in-memory implementation with query instrumentation, and the
//! read-through metric cache that fronts aggregate computations.

pub mod cache;
pub mod store;

pub use store::{AnalyticsStore, InMemoryStore, StoreStatistics};

// Re-export cache types for analytics integration
pub use cache::{
    CacheBackend, CacheStats, InMemoryCacheBackend, MetricCache, MetricKey, TtlPolicy,
};
