//! Enumerations shared across the Glow analytics crates.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Whether orders in this status contribute to revenue and sales metrics.
    pub fn counts_toward_sales(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Channel an order was placed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalesChannel {
    Online,
    InStore,
}

impl SalesChannel {
    /// All channels, in reporting order.
    pub const ALL: [SalesChannel; 2] = [SalesChannel::Online, SalesChannel::InStore];

    /// Human-readable label used in report rows.
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::InStore => "in_store",
        }
    }
}

/// Reporting period token accepted by the read interface.
///
/// A period resolves to a concrete date range relative to "now"; the
/// resolution itself lives in glow-analytics since it needs a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    /// Canonical token form, matching what `FromStr` accepts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Error returned when parsing an unknown period token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown period token: {0}")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(ParsePeriodError(other.to_string())),
        }
    }
}

/// Severity class of an inventory alert.
///
/// Out-of-stock sorts before low-stock in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InventoryAlertKind {
    OutOfStock,
    LowStock,
}
