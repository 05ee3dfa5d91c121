//! Glow Core - Entity and Metric Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no business logic.

use uuid::Uuid;

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod metrics;

pub use config::AnalyticsConfig;
pub use entities::{Customer, Order, OrderItem, Product};
pub use enums::{InventoryAlertKind, OrderStatus, ParsePeriodError, Period, SalesChannel};
pub use error::{GlowError, GlowResult, MetricError, StoreError};
pub use metrics::{
    ChannelSales, CustomerMetrics, DailySales, DimensionSales, InventoryAlert, MetricRequest,
    OrderMetrics, ParamValue, ProductSales, ProfitMetrics,
};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Entity identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type EntityId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amount in centavos (1/100 PHP). All money is integral.
pub type Centavos = i64;

/// Generate a new UUIDv7 EntityId (timestamp-sortable).
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

// =============================================================================
// TESTS
// =============================================================================
