//! Error types for Glow analytics operations

use crate::Timestamp;
use thiserror::Error;
use uuid::Uuid;

/// Store layer errors (transactional or cache store).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Insert failed for {entity}: {reason}")]
    InsertFailed { entity: &'static str, reason: String },
}

/// Metric computation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: Timestamp, end: Timestamp },

    #[error("Computation failed for {metric}: {reason}")]
    Computation { metric: String, reason: String },
}

/// Master error type for all Glow analytics errors.
#[derive(Debug, Clone, Error)]
pub enum GlowError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),
}

/// Result type alias for Glow analytics operations.
pub type GlowResult<T> = Result<T, GlowError>;

// =============================================================================
// TESTS
// =============================================================================
