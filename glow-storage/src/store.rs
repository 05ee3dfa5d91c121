//! Async store trait for the transactional records the analytics layer
//! reads, plus an in-memory reference implementation.
//!
//! The production store is a relational database; this trait only exposes
//! the scans and lookups the aggregator needs, so any backend capable of
//! range queries can implement it. [`InMemoryStore`] backs the test suites
//! and counts read queries so caching behavior can be asserted.

use ::async_trait::async_trait;
use glow_core::{
    Customer, EntityId, GlowError, GlowResult, Order, OrderItem, Product, StoreError, Timestamp,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Async store trait for transactional reads and the order write path.
///
/// All range queries are inclusive on both ends. Implementations must be
/// thread-safe; the analytics layer shares one store across callers.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    // ========================================================================
    // PRODUCT OPERATIONS
    // ========================================================================

    /// Insert a new product.
    async fn product_insert(&self, p: &Product) -> GlowResult<()>;

    /// Get a product by ID.
    async fn product_get(&self, id: EntityId) -> GlowResult<Option<Product>>;

    /// List all products.
    async fn product_list(&self) -> GlowResult<Vec<Product>>;

    // ========================================================================
    // CUSTOMER OPERATIONS
    // ========================================================================

    /// Insert a new customer.
    async fn customer_insert(&self, c: &Customer) -> GlowResult<()>;

    /// List all customers.
    async fn customer_list(&self) -> GlowResult<Vec<Customer>>;

    // ========================================================================
    // ORDER OPERATIONS
    // ========================================================================

    /// Insert an order together with its line items.
    async fn order_insert(&self, order: &Order, items: &[OrderItem]) -> GlowResult<()>;

    /// List orders placed within [start, end], any status.
    async fn orders_in_range(&self, start: Timestamp, end: Timestamp) -> GlowResult<Vec<Order>>;

    /// List the line items belonging to the given orders.
    async fn order_items_for(&self, order_ids: &[EntityId]) -> GlowResult<Vec<OrderItem>>;

    // ========================================================================
    // HEALTH & DIAGNOSTICS
    // ========================================================================

    /// Check if the store is reachable.
    async fn health_check(&self) -> GlowResult<bool>;

    /// Get row counts for diagnostics.
    async fn statistics(&self) -> GlowResult<StoreStatistics>;
}

/// Store row counts for diagnostics.
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    pub product_count: i64,
    pub order_count: i64,
    pub order_item_count: i64,
    pub customer_count: i64,
}

/// In-memory store backed by `RwLock<HashMap>` maps.
///
/// Counts read queries so tests can assert that cached reads do not touch
/// the store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<HashMap<EntityId, Product>>,
    orders: RwLock<HashMap<EntityId, Order>>,
    order_items: RwLock<HashMap<EntityId, OrderItem>>,
    customers: RwLock<HashMap<EntityId, Customer>>,
    read_queries: AtomicU64,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read queries served since construction.
    pub fn read_query_count(&self) -> u64 {
        self.read_queries.load(Ordering::Relaxed)
    }

    fn count_read(&self) {
        self.read_queries.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl AnalyticsStore for InMemoryStore {
    async fn product_insert(&self, p: &Product) -> GlowResult<()> {
        let mut products = self.products.write().unwrap();
        if products.contains_key(&p.product_id) {
            return Err(GlowError::Store(StoreError::InsertFailed {
                entity: "product",
                reason: "already exists".to_string(),
            }));
        }
        products.insert(p.product_id, p.clone());
        Ok(())
    }

    async fn product_get(&self, id: EntityId) -> GlowResult<Option<Product>> {
        self.count_read();
        let products = self.products.read().unwrap();
        Ok(products.get(&id).cloned())
    }

    async fn product_list(&self) -> GlowResult<Vec<Product>> {
        self.count_read();
        let products = self.products.read().unwrap();
        Ok(products.values().cloned().collect())
    }

    async fn customer_insert(&self, c: &Customer) -> GlowResult<()> {
        let mut customers = self.customers.write().unwrap();
        if customers.contains_key(&c.customer_id) {
            return Err(GlowError::Store(StoreError::InsertFailed {
                entity: "customer",
                reason: "already exists".to_string(),
            }));
        }
        customers.insert(c.customer_id, c.clone());
        Ok(())
    }

    async fn customer_list(&self) -> GlowResult<Vec<Customer>> {
        self.count_read();
        let customers = self.customers.read().unwrap();
        Ok(customers.values().cloned().collect())
    }

    async fn order_insert(&self, order: &Order, items: &[OrderItem]) -> GlowResult<()> {
        let mut orders = self.orders.write().unwrap();
        if orders.contains_key(&order.order_id) {
            return Err(GlowError::Store(StoreError::InsertFailed {
                entity: "order",
                reason: "already exists".to_string(),
            }));
        }
        orders.insert(order.order_id, order.clone());
        drop(orders);

        let mut order_items = self.order_items.write().unwrap();
        for item in items {
            order_items.insert(item.order_item_id, item.clone());
        }
        Ok(())
    }

    async fn orders_in_range(&self, start: Timestamp, end: Timestamp) -> GlowResult<Vec<Order>> {
        self.count_read();
        let orders = self.orders.read().unwrap();
        Ok(orders
            .values()
            .filter(|o| o.placed_at >= start && o.placed_at <= end)
            .cloned()
            .collect())
    }

    async fn order_items_for(&self, order_ids: &[EntityId]) -> GlowResult<Vec<OrderItem>> {
        self.count_read();
        let order_items = self.order_items.read().unwrap();
        Ok(order_items
            .values()
            .filter(|i| order_ids.contains(&i.order_id))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> GlowResult<bool> {
        Ok(true)
    }

    async fn statistics(&self) -> GlowResult<StoreStatistics> {
        Ok(StoreStatistics {
            product_count: self.products.read().unwrap().len() as i64,
            order_count: self.orders.read().unwrap().len() as i64,
            order_item_count: self.order_items.read().unwrap().len() as i64,
            customer_count: self.customers.read().unwrap().len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use glow_core::{new_entity_id, OrderStatus, SalesChannel};

    fn make_order(placed_at: Timestamp) -> Order {
        Order {
            order_id: new_entity_id(),
            customer_id: new_entity_id(),
            channel: SalesChannel::Online,
            status: OrderStatus::Completed,
            total_centavos: 100_000,
            placed_at,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_order_insert_and_range_query() {
        let store = InMemoryStore::new();
        let now = Utc::now();

        let inside = make_order(now - Duration::days(1));
        let outside = make_order(now - Duration::days(40));
        store.order_insert(&inside, &[]).await.unwrap();
        store.order_insert(&outside, &[]).await.unwrap();

        let found = store
            .orders_in_range(now - Duration::days(30), now)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].order_id, inside.order_id);
    }

    #[tokio::test]
    async fn test_duplicate_order_insert_fails() {
        let store = InMemoryStore::new();
        let order = make_order(Utc::now());
        store.order_insert(&order, &[]).await.unwrap();

        let err = store.order_insert(&order, &[]).await.unwrap_err();
        assert!(matches!(
            err,
            GlowError::Store(StoreError::InsertFailed { entity: "order", .. })
        ));
    }

    #[tokio::test]
    async fn test_order_items_for_filters_by_order() {
        let store = InMemoryStore::new();
        let order_a = make_order(Utc::now());
        let order_b = make_order(Utc::now());

        let item_a = OrderItem {
            order_item_id: new_entity_id(),
            order_id: order_a.order_id,
            product_id: new_entity_id(),
            quantity: 2,
            unit_price_centavos: 50_000,
            unit_cost_centavos: 20_000,
        };
        let item_b = OrderItem {
            order_item_id: new_entity_id(),
            order_id: order_b.order_id,
            product_id: new_entity_id(),
            quantity: 1,
            unit_price_centavos: 30_000,
            unit_cost_centavos: 10_000,
        };
        store.order_insert(&order_a, &[item_a.clone()]).await.unwrap();
        store.order_insert(&order_b, &[item_b]).await.unwrap();

        let items = store.order_items_for(&[order_a.order_id]).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_item_id, item_a.order_item_id);
    }

    #[tokio::test]
    async fn test_read_query_counter() {
        let store = InMemoryStore::new();
        assert_eq!(store.read_query_count(), 0);

        let now = Utc::now();
        store.orders_in_range(now, now).await.unwrap();
        store.product_list().await.unwrap();
        assert_eq!(store.read_query_count(), 2);

        // Writes are not counted
        store.order_insert(&make_order(now), &[]).await.unwrap();
        assert_eq!(store.read_query_count(), 2);
    }

    #[tokio::test]
    async fn test_statistics() {
        let store = InMemoryStore::new();
        store.order_insert(&make_order(Utc::now()), &[]).await.unwrap();

        let stats = store.statistics().await.unwrap();
        assert_eq!(stats.order_count, 1);
        assert_eq!(stats.product_count, 0);
    }
}
