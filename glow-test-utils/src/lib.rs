//! Glow Test Utilities
//!
//! Centralized test infrastructure for the Glow workspace:
//! - Entity builders with sensible defaults
//! - Order seeding helpers for scenario tests
//! - Re-exports of the in-memory store and cache backend

// Re-export the reference implementations from their source crate
pub use glow_storage::{InMemoryCacheBackend, InMemoryStore};

// Re-export core types for convenience
pub use glow_core::{
    new_entity_id, AnalyticsConfig, Centavos, Customer, EntityId, GlowError, GlowResult, Order,
    OrderItem, OrderStatus, Product, SalesChannel, Timestamp,
};

use chrono::{Duration, Utc};
use glow_storage::AnalyticsStore;

/// Build an active product with stock and no per-product threshold.
pub fn make_product(
    name: &str,
    brand: &str,
    category: &str,
    price_centavos: Centavos,
    cost_centavos: Centavos,
    stock_quantity: i32,
) -> Product {
    let product_id = new_entity_id();
    Product {
        product_id,
        name: name.to_string(),
        brand: brand.to_string(),
        category: category.to_string(),
        sku: format!("GLW-{}", product_id.simple()),
        price_centavos,
        cost_centavos,
        stock_quantity,
        low_stock_threshold: 0,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Build a customer who joined at the given time.
pub fn make_customer(name: &str, joined_at: Timestamp) -> Customer {
    Customer {
        customer_id: new_entity_id(),
        name: name.to_string(),
        joined_at,
    }
}

/// Build an order with no line items attached yet.
pub fn make_order(
    customer_id: EntityId,
    channel: SalesChannel,
    status: OrderStatus,
    total_centavos: Centavos,
    placed_at: Timestamp,
) -> Order {
    Order {
        order_id: new_entity_id(),
        customer_id,
        channel,
        status,
        total_centavos,
        placed_at,
        metadata: None,
    }
}

/// Build a line item for `order_id`, capturing the product's current price
/// and cost.
pub fn make_order_item(order_id: EntityId, product: &Product, quantity: i32) -> OrderItem {
    OrderItem {
        order_item_id: new_entity_id(),
        order_id,
        product_id: product.product_id,
        quantity,
        unit_price_centavos: product.price_centavos,
        unit_cost_centavos: product.cost_centavos,
    }
}

/// Seed `count` completed orders summing exactly to `total_centavos`,
/// spread over the `span_days` days before `now`, alternating channels.
///
/// Any division remainder lands on the first order so the sum stays exact.
pub async fn seed_completed_orders(
    store: &InMemoryStore,
    customer_id: EntityId,
    count: usize,
    total_centavos: Centavos,
    span_days: i64,
    now: Timestamp,
) -> GlowResult<Vec<Order>> {
    assert!(count > 0, "seeding zero orders makes no sense");
    assert!(span_days > 0, "span must cover at least one day");

    let base = total_centavos / count as i64;
    let remainder = total_centavos - base * count as i64;

    let mut orders = Vec::with_capacity(count);
    for i in 0..count {
        let total = base + if i == 0 { remainder } else { 0 };
        let channel = if i % 2 == 0 {
            SalesChannel::Online
        } else {
            SalesChannel::InStore
        };
        let placed_at =
            now - Duration::days(i as i64 % span_days) - Duration::hours(1);
        let order = make_order(customer_id, channel, OrderStatus::Completed, total, placed_at);
        store.order_insert(&order, &[]).await?;
        orders.push(order);
    }
    Ok(orders)
}
