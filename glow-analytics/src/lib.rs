//! Glow Analytics - Aggregation and Cached Reads
//!
//! The [`Aggregator`] computes business metrics from transactional records;
//! [`AnalyticsService`] is the read interface callers use, fronting every
//! aggregate with the metric cache and owning the order-created
//! invalidation hook.

pub mod aggregator;
pub mod period;
pub mod service;

pub use aggregator::Aggregator;
pub use period::period_range;
pub use service::AnalyticsService;
