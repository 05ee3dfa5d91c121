//! Pure metric computations over the transactional store.
//!
//! Every operation here is read-only and side-effect free: it scans the
//! store, folds, and returns a plain value. Inverted ranges are rejected
//! before any store access; references to entities that no longer exist
//! (e.g. a sold product since removed from the catalog) produce empty
//! rows, not errors.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use glow_core::{
    AnalyticsConfig, Centavos, ChannelSales, CustomerMetrics, DailySales, DimensionSales, EntityId,
    GlowResult, InventoryAlert, InventoryAlertKind, MetricError, Order, OrderMetrics, OrderStatus,
    ProductSales, ProfitMetrics, SalesChannel, Timestamp,
};
use glow_storage::AnalyticsStore;

/// Reject inverted ranges before touching the store.
fn check_range(start: Timestamp, end: Timestamp) -> Result<(), MetricError> {
    if start > end {
        return Err(MetricError::InvalidRange { start, end });
    }
    Ok(())
}

/// Computes business metrics from transactional records.
pub struct Aggregator<S> {
    store: Arc<S>,
    config: AnalyticsConfig,
}

impl<S> Aggregator<S>
where
    S: AnalyticsStore,
{
    /// Create an aggregator over the given store.
    pub fn new(store: Arc<S>, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    /// Completed orders placed within the range.
    async fn completed_orders(&self, start: Timestamp, end: Timestamp) -> GlowResult<Vec<Order>> {
        Ok(self
            .store
            .orders_in_range(start, end)
            .await?
            .into_iter()
            .filter(|o| o.status.counts_toward_sales())
            .collect())
    }

    /// Total revenue from completed orders in the range.
    pub async fn revenue(&self, start: Timestamp, end: Timestamp) -> GlowResult<Centavos> {
        check_range(start, end)?;
        Ok(self
            .completed_orders(start, end)
            .await?
            .iter()
            .map(|o| o.total_centavos)
            .sum())
    }

    /// Order counts by status, revenue, and average order value.
    pub async fn order_metrics(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<OrderMetrics> {
        check_range(start, end)?;
        let orders = self.store.orders_in_range(start, end).await?;

        let mut completed_count = 0u64;
        let mut cancelled_count = 0u64;
        let mut refunded_count = 0u64;
        let mut revenue: Centavos = 0;
        for order in &orders {
            match order.status {
                OrderStatus::Completed => {
                    completed_count += 1;
                    revenue += order.total_centavos;
                }
                OrderStatus::Cancelled => cancelled_count += 1,
                OrderStatus::Refunded => refunded_count += 1,
                OrderStatus::Pending | OrderStatus::Processing => {}
            }
        }

        let average = if completed_count > 0 {
            revenue / completed_count as Centavos
        } else {
            0
        };

        Ok(OrderMetrics {
            order_count: orders.len() as u64,
            completed_count,
            cancelled_count,
            refunded_count,
            revenue_centavos: revenue,
            average_order_value_centavos: average,
        })
    }

    /// Top products by quantity sold, descending; ties break by product id
    /// ascending. Items whose product has left the catalog are skipped.
    pub async fn top_selling_products(
        &self,
        limit: usize,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<Vec<ProductSales>> {
        check_range(start, end)?;
        let order_ids: Vec<EntityId> = self
            .completed_orders(start, end)
            .await?
            .iter()
            .map(|o| o.order_id)
            .collect();
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = self.store.order_items_for(&order_ids).await?;
        let mut grouped: HashMap<EntityId, (i64, Centavos)> = HashMap::new();
        for item in &items {
            let entry = grouped.entry(item.product_id).or_insert((0, 0));
            entry.0 += item.quantity as i64;
            entry.1 += item.line_revenue();
        }

        let catalog: HashMap<EntityId, _> = self
            .store
            .product_list()
            .await?
            .into_iter()
            .map(|p| (p.product_id, p))
            .collect();

        let mut rows: Vec<ProductSales> = grouped
            .into_iter()
            .filter_map(|(product_id, (quantity_sold, revenue_centavos))| {
                catalog.get(&product_id).map(|p| ProductSales {
                    product_id,
                    name: p.name.clone(),
                    brand: p.brand.clone(),
                    quantity_sold,
                    revenue_centavos,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.quantity_sold
                .cmp(&a.quantity_sold)
                .then(a.product_id.cmp(&b.product_id))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    /// Sales grouped by product category, revenue descending.
    pub async fn sales_by_category(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<Vec<DimensionSales>> {
        self.sales_by(start, end, |p| p.category.clone()).await
    }

    /// Sales grouped by product brand, revenue descending.
    pub async fn sales_by_brand(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<Vec<DimensionSales>> {
        self.sales_by(start, end, |p| p.brand.clone()).await
    }

    async fn sales_by<F>(
        &self,
        start: Timestamp,
        end: Timestamp,
        select: F,
    ) -> GlowResult<Vec<DimensionSales>>
    where
        F: Fn(&glow_core::Product) -> String,
    {
        check_range(start, end)?;
        let order_ids: Vec<EntityId> = self
            .completed_orders(start, end)
            .await?
            .iter()
            .map(|o| o.order_id)
            .collect();
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let items = self.store.order_items_for(&order_ids).await?;
        let catalog: HashMap<EntityId, _> = self
            .store
            .product_list()
            .await?
            .into_iter()
            .map(|p| (p.product_id, p))
            .collect();

        let mut grouped: HashMap<String, (i64, Centavos)> = HashMap::new();
        for item in &items {
            // Items for vanished products contribute to no dimension.
            if let Some(product) = catalog.get(&item.product_id) {
                let entry = grouped.entry(select(product)).or_insert((0, 0));
                entry.0 += item.quantity as i64;
                entry.1 += item.line_revenue();
            }
        }

        let mut rows: Vec<DimensionSales> = grouped
            .into_iter()
            .map(|(dimension, (units_sold, revenue_centavos))| DimensionSales {
                dimension,
                units_sold,
                revenue_centavos,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.revenue_centavos
                .cmp(&a.revenue_centavos)
                .then(a.dimension.cmp(&b.dimension))
        });
        Ok(rows)
    }

    /// Revenue and order counts per sales channel. Every channel appears,
    /// zero row included, so dashboards can compare without gap handling.
    pub async fn channel_comparison(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<Vec<ChannelSales>> {
        check_range(start, end)?;
        let orders = self.completed_orders(start, end).await?;

        Ok(SalesChannel::ALL
            .iter()
            .map(|&channel| {
                let mut order_count = 0u64;
                let mut revenue: Centavos = 0;
                for order in orders.iter().filter(|o| o.channel == channel) {
                    order_count += 1;
                    revenue += order.total_centavos;
                }
                let average = if order_count > 0 {
                    revenue / order_count as Centavos
                } else {
                    0
                };
                ChannelSales {
                    channel,
                    order_count,
                    revenue_centavos: revenue,
                    average_order_value_centavos: average,
                }
            })
            .collect())
    }

    /// One row per UTC day covering the range, zero-filled for days with
    /// no completed orders.
    pub async fn daily_sales_trend(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<Vec<DailySales>> {
        check_range(start, end)?;
        let orders = self.completed_orders(start, end).await?;

        let mut buckets: BTreeMap<NaiveDate, (u64, Centavos)> = BTreeMap::new();
        let mut day = start.date_naive();
        let last = end.date_naive();
        while day <= last {
            buckets.insert(day, (0, 0));
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        for order in &orders {
            if let Some(bucket) = buckets.get_mut(&order.placed_at.date_naive()) {
                bucket.0 += 1;
                bucket.1 += order.total_centavos;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(day, (order_count, revenue_centavos))| DailySales {
                day,
                order_count,
                revenue_centavos,
            })
            .collect())
    }

    /// Active products at or below their low-stock threshold. Out-of-stock
    /// rows come first, then ascending stock.
    pub async fn inventory_alerts(&self) -> GlowResult<Vec<InventoryAlert>> {
        let products = self.store.product_list().await?;

        let mut alerts: Vec<InventoryAlert> = products
            .into_iter()
            .filter(|p| p.is_active)
            .filter_map(|p| {
                let threshold = if p.low_stock_threshold > 0 {
                    p.low_stock_threshold
                } else {
                    self.config.fallback_low_stock_threshold
                };
                let kind = if p.stock_quantity <= 0 {
                    InventoryAlertKind::OutOfStock
                } else if p.stock_quantity <= threshold {
                    InventoryAlertKind::LowStock
                } else {
                    return None;
                };
                Some(InventoryAlert {
                    product_id: p.product_id,
                    name: p.name,
                    sku: p.sku,
                    stock_quantity: p.stock_quantity,
                    low_stock_threshold: threshold,
                    kind,
                })
            })
            .collect();

        alerts.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then(a.stock_quantity.cmp(&b.stock_quantity))
                .then(a.sku.cmp(&b.sku))
        });
        Ok(alerts)
    }

    /// Customer base summary: size, newcomers, and returning purchasers.
    pub async fn customer_metrics(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<CustomerMetrics> {
        check_range(start, end)?;
        let customers = self.store.customer_list().await?;
        let completed = self.completed_orders(start, end).await?;

        let purchasers: HashSet<EntityId> = completed.iter().map(|o| o.customer_id).collect();
        let new_customers = customers
            .iter()
            .filter(|c| c.joined_at >= start && c.joined_at <= end)
            .count() as u64;
        let returning_customers = customers
            .iter()
            .filter(|c| c.joined_at < start && purchasers.contains(&c.customer_id))
            .count() as u64;
        let orders_per_customer = if purchasers.is_empty() {
            0.0
        } else {
            completed.len() as f64 / purchasers.len() as f64
        };

        Ok(CustomerMetrics {
            total_customers: customers.len() as u64,
            new_customers,
            returning_customers,
            orders_per_customer,
        })
    }

    /// Revenue, cost of goods, and gross margin over completed orders.
    ///
    /// Both sides come from line items so revenue and cost cover the same
    /// goods even when an order total includes non-item amounts.
    pub async fn profit_metrics(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> GlowResult<ProfitMetrics> {
        check_range(start, end)?;
        let order_ids: Vec<EntityId> = self
            .completed_orders(start, end)
            .await?
            .iter()
            .map(|o| o.order_id)
            .collect();

        let items = if order_ids.is_empty() {
            Vec::new()
        } else {
            self.store.order_items_for(&order_ids).await?
        };

        let revenue: Centavos = items.iter().map(|i| i.line_revenue()).sum();
        let cost: Centavos = items.iter().map(|i| i.line_cost()).sum();
        let profit = revenue - cost;
        let margin_basis_points = if revenue > 0 {
            profit * 10_000 / revenue
        } else {
            0
        };

        Ok(ProfitMetrics {
            revenue_centavos: revenue,
            cost_centavos: cost,
            gross_profit_centavos: profit,
            margin_basis_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use glow_core::GlowError;
    use glow_test_utils::{
        make_customer, make_order, make_order_item, make_product, InMemoryStore,
    };

    fn aggregator(store: Arc<InMemoryStore>) -> Aggregator<InMemoryStore> {
        Aggregator::new(store, AnalyticsConfig::default())
    }

    fn range_of_days(days: i64) -> (Timestamp, Timestamp) {
        let end = Utc::now();
        (end - Duration::days(days), end)
    }

    #[tokio::test]
    async fn test_revenue_counts_only_completed_orders() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(30);
        let customer = new_id();

        for (status, total) in [
            (OrderStatus::Completed, 100_000),
            (OrderStatus::Completed, 150_000),
            (OrderStatus::Cancelled, 999_999),
            (OrderStatus::Pending, 500_000),
        ] {
            let order = make_order(
                customer,
                SalesChannel::Online,
                status,
                total,
                end - Duration::days(2),
            );
            store.order_insert(&order, &[]).await.unwrap();
        }

        let agg = aggregator(store);
        assert_eq!(agg.revenue(start, end).await.unwrap(), 250_000);
    }

    #[tokio::test]
    async fn test_revenue_of_empty_store_is_zero() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(30);
        assert_eq!(aggregator(store).revenue(start, end).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(30);

        let err = aggregator(store).revenue(end, start).await.unwrap_err();
        assert!(matches!(
            err,
            GlowError::Metric(MetricError::InvalidRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_order_metrics_counts_and_average() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(30);
        let customer = new_id();

        for (status, total) in [
            (OrderStatus::Completed, 200_000),
            (OrderStatus::Completed, 100_000),
            (OrderStatus::Cancelled, 50_000),
            (OrderStatus::Refunded, 70_000),
        ] {
            let order = make_order(
                customer,
                SalesChannel::InStore,
                status,
                total,
                end - Duration::days(1),
            );
            store.order_insert(&order, &[]).await.unwrap();
        }

        let metrics = aggregator(store).order_metrics(start, end).await.unwrap();
        assert_eq!(metrics.order_count, 4);
        assert_eq!(metrics.completed_count, 2);
        assert_eq!(metrics.cancelled_count, 1);
        assert_eq!(metrics.refunded_count, 1);
        assert_eq!(metrics.revenue_centavos, 300_000);
        assert_eq!(metrics.average_order_value_centavos, 150_000);
    }

    #[tokio::test]
    async fn test_top_products_orders_by_quantity_with_id_tiebreak() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);
        let placed_at = end - Duration::days(1);

        let lipstick = make_product("Velvet Lipstick", "Rouge", "Lips", 89_900, 30_000, 50);
        let serum = make_product("Glow Serum", "Lumina", "Skincare", 149_900, 60_000, 40);
        let mascara = make_product("Sky Mascara", "Rouge", "Eyes", 59_900, 20_000, 60);
        for p in [&lipstick, &serum, &mascara] {
            store.product_insert(p).await.unwrap();
        }

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            0,
            placed_at,
        );
        let items = vec![
            make_order_item(order.order_id, &serum, 5),
            make_order_item(order.order_id, &lipstick, 5),
            make_order_item(order.order_id, &mascara, 2),
        ];
        store.order_insert(&order, &items).await.unwrap();

        let rows = aggregator(store)
            .top_selling_products(10, start, end)
            .await
            .unwrap();
        assert_eq!(rows.len(), 3);
        // Tie on quantity 5 breaks by product id ascending.
        let mut tied = [lipstick.product_id, serum.product_id];
        tied.sort();
        assert_eq!(rows[0].product_id, tied[0]);
        assert_eq!(rows[1].product_id, tied[1]);
        assert_eq!(rows[2].product_id, mascara.product_id);

        let lipstick_row = rows
            .iter()
            .find(|r| r.product_id == lipstick.product_id)
            .unwrap();
        assert_eq!(lipstick_row.revenue_centavos, 5 * 89_900);
    }

    #[tokio::test]
    async fn test_top_products_respects_limit_and_skips_vanished() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);
        let placed_at = end - Duration::days(1);

        let kept = make_product("Cloud Cream", "Lumina", "Skincare", 99_900, 40_000, 30);
        store.product_insert(&kept).await.unwrap();
        // Never inserted into the catalog.
        let vanished = make_product("Gone", "Gone", "Gone", 10_000, 5_000, 0);

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            0,
            placed_at,
        );
        let items = vec![
            make_order_item(order.order_id, &kept, 1),
            make_order_item(order.order_id, &vanished, 99),
        ];
        store.order_insert(&order, &items).await.unwrap();

        let rows = aggregator(store)
            .top_selling_products(1, start, end)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_id, kept.product_id);
    }

    #[tokio::test]
    async fn test_sales_by_category_groups_and_sorts_by_revenue() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);
        let placed_at = end - Duration::days(1);

        let serum = make_product("Glow Serum", "Lumina", "Skincare", 149_900, 60_000, 40);
        let lipstick = make_product("Velvet Lipstick", "Rouge", "Lips", 89_900, 30_000, 50);
        let balm = make_product("Dew Balm", "Lumina", "Lips", 49_900, 15_000, 80);
        for p in [&serum, &lipstick, &balm] {
            store.product_insert(p).await.unwrap();
        }

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            0,
            placed_at,
        );
        let items = vec![
            make_order_item(order.order_id, &serum, 1),   // Skincare 149_900
            make_order_item(order.order_id, &lipstick, 2), // Lips 179_800
            make_order_item(order.order_id, &balm, 1),     // Lips +49_900
        ];
        store.order_insert(&order, &items).await.unwrap();

        let rows = aggregator(store)
            .sales_by_category(start, end)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dimension, "Lips");
        assert_eq!(rows[0].revenue_centavos, 229_700);
        assert_eq!(rows[0].units_sold, 3);
        assert_eq!(rows[1].dimension, "Skincare");
    }

    #[tokio::test]
    async fn test_sales_by_brand_groups_by_brand() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);
        let placed_at = end - Duration::days(1);

        let serum = make_product("Glow Serum", "Lumina", "Skincare", 100_000, 60_000, 40);
        let lipstick = make_product("Velvet Lipstick", "Rouge", "Lips", 200_000, 30_000, 50);
        for p in [&serum, &lipstick] {
            store.product_insert(p).await.unwrap();
        }

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            0,
            placed_at,
        );
        let items = vec![
            make_order_item(order.order_id, &serum, 1),
            make_order_item(order.order_id, &lipstick, 1),
        ];
        store.order_insert(&order, &items).await.unwrap();

        let rows = aggregator(store).sales_by_brand(start, end).await.unwrap();
        assert_eq!(rows[0].dimension, "Rouge");
        assert_eq!(rows[1].dimension, "Lumina");
    }

    #[tokio::test]
    async fn test_channel_comparison_always_lists_both_channels() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            120_000,
            end - Duration::days(1),
        );
        store.order_insert(&order, &[]).await.unwrap();

        let rows = aggregator(store)
            .channel_comparison(start, end)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let online = rows.iter().find(|r| r.channel == SalesChannel::Online).unwrap();
        let in_store = rows.iter().find(|r| r.channel == SalesChannel::InStore).unwrap();
        assert_eq!(online.order_count, 1);
        assert_eq!(online.revenue_centavos, 120_000);
        assert_eq!(in_store.order_count, 0);
        assert_eq!(in_store.revenue_centavos, 0);
        assert_eq!(in_store.average_order_value_centavos, 0);
    }

    #[tokio::test]
    async fn test_daily_trend_zero_fills_quiet_days() {
        let store = Arc::new(InMemoryStore::new());
        let end = Utc::now();
        let start = end - Duration::days(4);

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            80_000,
            end - Duration::days(2),
        );
        store.order_insert(&order, &[]).await.unwrap();

        let rows = aggregator(store).daily_sales_trend(start, end).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.windows(2).all(|w| w[0].day < w[1].day));

        let busy: Vec<_> = rows.iter().filter(|r| r.order_count > 0).collect();
        assert_eq!(busy.len(), 1);
        assert_eq!(busy[0].revenue_centavos, 80_000);
        assert_eq!(rows.iter().map(|r| r.revenue_centavos).sum::<Centavos>(), 80_000);
    }

    #[tokio::test]
    async fn test_inventory_alerts_ordering_and_fallback_threshold() {
        let store = Arc::new(InMemoryStore::new());

        let mut out_of_stock = make_product("Silk Primer", "Lumina", "Face", 79_900, 30_000, 0);
        out_of_stock.low_stock_threshold = 10;
        // Falls back to the configured threshold of 5.
        let low = make_product("Dew Balm", "Lumina", "Lips", 49_900, 15_000, 3);
        let healthy = make_product("Sky Mascara", "Rouge", "Eyes", 59_900, 20_000, 40);
        let mut inactive = make_product("Retired Tint", "Rouge", "Lips", 39_900, 10_000, 0);
        inactive.is_active = false;

        for p in [&out_of_stock, &low, &healthy, &inactive] {
            store.product_insert(p).await.unwrap();
        }

        let alerts = aggregator(store).inventory_alerts().await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, InventoryAlertKind::OutOfStock);
        assert_eq!(alerts[0].product_id, out_of_stock.product_id);
        assert_eq!(alerts[1].kind, InventoryAlertKind::LowStock);
        assert_eq!(alerts[1].product_id, low.product_id);
        assert_eq!(alerts[1].low_stock_threshold, 5);
    }

    #[tokio::test]
    async fn test_customer_metrics_new_vs_returning() {
        let store = Arc::new(InMemoryStore::new());
        let end = Utc::now();
        let start = end - Duration::days(30);

        let veteran = make_customer("Vera", end - Duration::days(300));
        let newcomer = make_customer("Nina", end - Duration::days(5));
        let dormant = make_customer("Dora", end - Duration::days(400));
        for c in [&veteran, &newcomer, &dormant] {
            store.customer_insert(c).await.unwrap();
        }

        // Veteran buys twice in range, newcomer once, dormant not at all.
        for (customer_id, days_ago) in [
            (veteran.customer_id, 3),
            (veteran.customer_id, 10),
            (newcomer.customer_id, 2),
        ] {
            let order = make_order(
                customer_id,
                SalesChannel::Online,
                OrderStatus::Completed,
                50_000,
                end - Duration::days(days_ago),
            );
            store.order_insert(&order, &[]).await.unwrap();
        }

        let metrics = aggregator(store).customer_metrics(start, end).await.unwrap();
        assert_eq!(metrics.total_customers, 3);
        assert_eq!(metrics.new_customers, 1);
        assert_eq!(metrics.returning_customers, 1);
        assert!((metrics.orders_per_customer - 1.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_profit_metrics_margin() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);
        let placed_at = end - Duration::days(1);

        let serum = make_product("Glow Serum", "Lumina", "Skincare", 100_000, 60_000, 40);
        store.product_insert(&serum).await.unwrap();

        let order = make_order(
            new_id(),
            SalesChannel::Online,
            OrderStatus::Completed,
            200_000,
            placed_at,
        );
        let items = vec![make_order_item(order.order_id, &serum, 2)];
        store.order_insert(&order, &items).await.unwrap();

        let metrics = aggregator(store).profit_metrics(start, end).await.unwrap();
        assert_eq!(metrics.revenue_centavos, 200_000);
        assert_eq!(metrics.cost_centavos, 120_000);
        assert_eq!(metrics.gross_profit_centavos, 80_000);
        assert_eq!(metrics.margin_basis_points, 4_000);
    }

    #[tokio::test]
    async fn test_profit_metrics_empty_range() {
        let store = Arc::new(InMemoryStore::new());
        let (start, end) = range_of_days(7);

        let metrics = aggregator(store).profit_metrics(start, end).await.unwrap();
        assert_eq!(metrics.revenue_centavos, 0);
        assert_eq!(metrics.margin_basis_points, 0);
    }

    fn new_id() -> EntityId {
        glow_core::new_entity_id()
    }
}
