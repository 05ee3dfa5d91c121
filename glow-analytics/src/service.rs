//! Cached analytics read interface and the order-created invalidation hook.

use std::sync::Arc;

use chrono::Utc;
use glow_core::{
    AnalyticsConfig, Centavos, ChannelSales, CustomerMetrics, DailySales, DimensionSales,
    GlowResult, InventoryAlert, MetricRequest, Order, OrderItem, OrderMetrics, Period,
    ProductSales, ProfitMetrics, Timestamp,
};
use glow_storage::{AnalyticsStore, CacheBackend, MetricCache, TtlPolicy};

use crate::aggregator::Aggregator;
use crate::period::period_range;

/// Stable metric names. These feed cache-key derivation, so renaming one
/// orphans its cached entries until they expire.
mod metric {
    pub const REVENUE: &str = "revenue";
    pub const ORDER_METRICS: &str = "order_metrics";
    pub const TOP_PRODUCTS: &str = "top_products";
    pub const SALES_BY_CATEGORY: &str = "sales_by_category";
    pub const SALES_BY_BRAND: &str = "sales_by_brand";
    pub const CHANNEL_COMPARISON: &str = "channel_comparison";
    pub const DAILY_TREND: &str = "daily_trend";
    pub const INVENTORY_ALERTS: &str = "inventory_alerts";
    pub const CUSTOMER_METRICS: &str = "customer_metrics";
    pub const PROFIT_METRICS: &str = "profit_metrics";
}

/// The analytics read interface.
///
/// Every getter goes through the metric cache: a hit returns the stored
/// value, a miss runs the aggregator and stores the result under the
/// TTL-policy duration. Period-based getters resolve their range against
/// the current clock; explicit-range getters cache per exact range.
///
/// [`AnalyticsService::order_created`] is the invalidation trigger: call it
/// synchronously after an order record is durably persisted.
pub struct AnalyticsService<S, C>
where
    S: AnalyticsStore,
    C: CacheBackend,
{
    store: Arc<S>,
    aggregator: Aggregator<S>,
    cache: MetricCache<C>,
    config: AnalyticsConfig,
}

impl<S, C> AnalyticsService<S, C>
where
    S: AnalyticsStore,
    C: CacheBackend,
{
    /// Create a service over the given store and cache backend.
    pub fn new(store: Arc<S>, cache_backend: Arc<C>, config: AnalyticsConfig) -> Self {
        let cache = MetricCache::new(cache_backend, TtlPolicy::from_config(&config));
        let aggregator = Aggregator::new(Arc::clone(&store), config.clone());
        Self {
            store,
            aggregator,
            cache,
            config,
        }
    }

    /// Create a service with the default configuration.
    pub fn with_defaults(store: Arc<S>, cache_backend: Arc<C>) -> Self {
        Self::new(store, cache_backend, AnalyticsConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// The metric cache, for diagnostics.
    pub fn cache(&self) -> &MetricCache<C> {
        &self.cache
    }

    // ========================================================================
    // READ INTERFACE
    // ========================================================================

    /// Total revenue from completed orders in `[start, end]`.
    pub async fn get_revenue(&self, start: Timestamp, end: Timestamp) -> GlowResult<Centavos> {
        let request = MetricRequest::new(metric::REVENUE, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.revenue(start, end))
            .await
    }

    /// Order counts, revenue, and average order value in `[start, end]`.
    pub async fn get_order_metrics(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<OrderMetrics> {
        let request = MetricRequest::new(metric::ORDER_METRICS, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.order_metrics(start, end))
            .await
    }

    /// Top products by quantity sold over the period. `limit` falls back
    /// to the configured default.
    pub async fn get_top_selling_products(
        &self,
        limit: Option<usize>,
        period: Period,
    ) -> GlowResult<Vec<ProductSales>> {
        let limit = limit.unwrap_or(self.config.top_products_limit);
        let (start, end) = period_range(period, Utc::now());
        let request =
            MetricRequest::new(metric::TOP_PRODUCTS, start, end).with_param("limit", limit);
        self.cache
            .get_or_compute(&request, || {
                self.aggregator.top_selling_products(limit, start, end)
            })
            .await
    }

    /// Sales grouped by product category over the period.
    pub async fn get_sales_by_category(&self, period: Period) -> GlowResult<Vec<DimensionSales>> {
        let (start, end) = period_range(period, Utc::now());
        let request = MetricRequest::new(metric::SALES_BY_CATEGORY, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.sales_by_category(start, end))
            .await
    }

    /// Sales grouped by product brand over the period.
    pub async fn get_sales_by_brand(&self, period: Period) -> GlowResult<Vec<DimensionSales>> {
        let (start, end) = period_range(period, Utc::now());
        let request = MetricRequest::new(metric::SALES_BY_BRAND, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.sales_by_brand(start, end))
            .await
    }

    /// Per-channel revenue and order counts over the period.
    pub async fn get_channel_comparison(&self, period: Period) -> GlowResult<Vec<ChannelSales>> {
        let (start, end) = period_range(period, Utc::now());
        let request = MetricRequest::new(metric::CHANNEL_COMPARISON, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.channel_comparison(start, end))
            .await
    }

    /// Zero-filled daily revenue buckets over the period.
    pub async fn get_daily_sales_trend(&self, period: Period) -> GlowResult<Vec<DailySales>> {
        let (start, end) = period_range(period, Utc::now());
        let request = MetricRequest::new(metric::DAILY_TREND, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.daily_sales_trend(start, end))
            .await
    }

    /// Current inventory alerts. Keyed to the current day; inventory is a
    /// present-state metric, so the short TTL always applies.
    pub async fn get_inventory_alerts(&self) -> GlowResult<Vec<InventoryAlert>> {
        let (start, end) = period_range(Period::Day, Utc::now());
        let request = MetricRequest::new(metric::INVENTORY_ALERTS, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.inventory_alerts())
            .await
    }

    /// Customer base summary over the period.
    pub async fn get_customer_metrics(&self, period: Period) -> GlowResult<CustomerMetrics> {
        let (start, end) = period_range(period, Utc::now());
        let request = MetricRequest::new(metric::CUSTOMER_METRICS, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.customer_metrics(start, end))
            .await
    }

    /// Revenue, cost, and gross margin over the period.
    pub async fn get_profit_metrics(&self, period: Period) -> GlowResult<ProfitMetrics> {
        let (start, end) = period_range(period, Utc::now());
        let request = MetricRequest::new(metric::PROFIT_METRICS, start, end);
        self.cache
            .get_or_compute(&request, || self.aggregator.profit_metrics(start, end))
            .await
    }

    // ========================================================================
    // WRITE PATH & INVALIDATION
    // ========================================================================

    /// Invalidation trigger: call after an order record is durably
    /// persisted. Clears every metric entry; the next read of each metric
    /// recomputes. Returns how many entries were dropped.
    pub async fn order_created(&self) -> GlowResult<u64> {
        self.cache.invalidate_all().await
    }

    /// Persist an order with its line items, then invalidate.
    pub async fn record_order(&self, order: &Order, items: &[OrderItem]) -> GlowResult<()> {
        self.store.order_insert(order, items).await?;
        let dropped = self.order_created().await?;
        tracing::debug!(
            order_id = %order.order_id,
            dropped_entries = dropped,
            "order recorded, metric cache invalidated"
        );
        Ok(())
    }
}

impl<S, C> Clone for AnalyticsService<S, C>
where
    S: AnalyticsStore,
    C: CacheBackend,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            aggregator: Aggregator::new(Arc::clone(&self.store), self.config.clone()),
            cache: self.cache.clone(),
            config: self.config.clone(),
        }
    }
}
