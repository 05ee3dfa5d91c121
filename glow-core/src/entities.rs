//! Transactional entity types for the Glow storefront.
//!
//! These mirror the relational schema owned by the storefront: products,
//! orders with line items, and customers. The analytics crates only ever
//! read them; the sole modeled write is order creation.

use crate::enums::{OrderStatus, SalesChannel};
use crate::{Centavos, EntityId, Timestamp};
use serde::{Deserialize, Serialize};

/// A catalog product (one SKU).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: EntityId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub sku: String,
    /// Current list price.
    pub price_centavos: Centavos,
    /// Unit acquisition cost, used for profit metrics.
    pub cost_centavos: Centavos,
    pub stock_quantity: i32,
    /// Stock level at or below which the product is flagged low-stock.
    /// Zero or negative means "use the configured fallback threshold".
    pub low_stock_threshold: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: EntityId,
    pub customer_id: EntityId,
    pub channel: SalesChannel,
    pub status: OrderStatus,
    /// Order total including all line items.
    pub total_centavos: Centavos,
    pub placed_at: Timestamp,
    pub metadata: Option<serde_json::Value>,
}

/// One line of an order: a product at a captured price and cost.
///
/// Price and cost are captured at order time so later catalog edits do not
/// rewrite historical metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: EntityId,
    pub order_id: EntityId,
    pub product_id: EntityId,
    pub quantity: i32,
    pub unit_price_centavos: Centavos,
    pub unit_cost_centavos: Centavos,
}

impl OrderItem {
    /// Revenue contributed by this line.
    pub fn line_revenue(&self) -> Centavos {
        self.unit_price_centavos * self.quantity as Centavos
    }

    /// Cost of goods for this line.
    pub fn line_cost(&self) -> Centavos {
        self.unit_cost_centavos * self.quantity as Centavos
    }

    /// Gross profit for this line.
    pub fn line_profit(&self) -> Centavos {
        self.line_revenue() - self.line_cost()
    }
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: EntityId,
    pub name: String,
    pub joined_at: Timestamp,
}
