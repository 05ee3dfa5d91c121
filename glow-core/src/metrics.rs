//! Metric request and result types.
//!
//! A [`MetricRequest`] identifies one cacheable computation: the metric
//! name, the queried date range, and any extra parameters. Parameters live
//! in a `BTreeMap` so two logically identical requests always enumerate
//! their parameters in the same order, whatever order they were added in.
//!
//! The result structs are the plain values returned across the read
//! interface. They are serde-serializable so the cache can store them all
//! through one backend.

use crate::enums::{InventoryAlertKind, SalesChannel};
use crate::error::MetricError;
use crate::{Centavos, EntityId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Primitive parameter value carried by a [`MetricRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    /// Canonical text form used for cache-key derivation. The variant tag
    /// keeps `Int(1)`, `Str("1")` and `Bool(true)` distinct.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "i:{v}"),
            Self::Str(v) => write!(f, "s:{v}"),
            Self::Bool(v) => write!(f, "b:{v}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Identifies one cacheable metric computation.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRequest {
    /// Stable metric name, e.g. `"revenue"`.
    pub metric: &'static str,
    /// Inclusive start of the queried range.
    pub start: Timestamp,
    /// Inclusive end of the queried range. Drives the TTL policy.
    pub end: Timestamp,
    /// Extra parameters in canonical (sorted) order.
    pub params: BTreeMap<String, ParamValue>,
}

impl MetricRequest {
    /// Create a request with no extra parameters.
    pub fn new(metric: &'static str, start: Timestamp, end: Timestamp) -> Self {
        Self {
            metric,
            start,
            end,
            params: BTreeMap::new(),
        }
    }

    /// Attach an extra parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Reject inverted ranges before any store access.
    pub fn validate_range(&self) -> Result<(), MetricError> {
        if self.start > self.end {
            return Err(MetricError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

// ============================================================================
// METRIC RESULTS
// ============================================================================

/// Order counts and revenue for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMetrics {
    /// All orders placed in the range, any status.
    pub order_count: u64,
    pub completed_count: u64,
    pub cancelled_count: u64,
    pub refunded_count: u64,
    /// Revenue from completed orders only.
    pub revenue_centavos: Centavos,
    /// Revenue / completed_count; zero when there are no completed orders.
    pub average_order_value_centavos: Centavos,
}

/// One row of the top-selling-products report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product_id: EntityId,
    pub name: String,
    pub brand: String,
    pub quantity_sold: i64,
    pub revenue_centavos: Centavos,
}

/// Sales grouped by one product dimension (category or brand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSales {
    /// The category or brand name.
    pub dimension: String,
    pub units_sold: i64,
    pub revenue_centavos: Centavos,
}

/// Per-channel order counts and revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSales {
    pub channel: SalesChannel,
    pub order_count: u64,
    pub revenue_centavos: Centavos,
    pub average_order_value_centavos: Centavos,
}

/// One day of the daily sales trend. Days with no orders are zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub day: NaiveDate,
    pub order_count: u64,
    pub revenue_centavos: Centavos,
}

/// A product whose stock warrants attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAlert {
    pub product_id: EntityId,
    pub name: String,
    pub sku: String,
    pub stock_quantity: i32,
    pub low_stock_threshold: i32,
    pub kind: InventoryAlertKind,
}

/// Customer base summary for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMetrics {
    pub total_customers: u64,
    /// Customers who joined within the range.
    pub new_customers: u64,
    /// Pre-existing customers with a completed order in the range.
    pub returning_customers: u64,
    /// Completed orders per purchasing customer; zero when nobody purchased.
    pub orders_per_customer: f64,
}

/// Revenue, cost of goods, and margin for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitMetrics {
    pub revenue_centavos: Centavos,
    pub cost_centavos: Centavos,
    pub gross_profit_centavos: Centavos,
    /// Gross margin in basis points (1/100 of a percent); zero when
    /// revenue is zero.
    pub margin_basis_points: i64,
}
