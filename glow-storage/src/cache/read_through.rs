//! Read-through metric cache.
//!
//! Wraps an aggregate computation in the explicit two-step sequence: look
//! the derived key up, and on a miss run the computation and store the
//! result under the TTL the policy picks for the request.

use std::future::Future;
use std::sync::Arc;

use glow_core::{GlowResult, MetricError, MetricRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::CacheBackend;
use super::key::MetricKey;
use super::ttl::TtlPolicy;

/// Read-through cache for metric computations.
///
/// Guarantees that cached and uncached calls for identical requests return
/// identical values, and that a computation error is never converted into
/// a cached negative result.
///
/// # Degraded reads
///
/// A backend failure on the read path is treated as a miss: the metric is
/// recomputed and the caller still gets an answer. The same holds for an
/// entry that no longer decodes to the requested type (it is dropped) and
/// for a failed write after a successful computation. All three are
/// warn-logged.
pub struct MetricCache<C>
where
    C: CacheBackend,
{
    backend: Arc<C>,
    ttl_policy: TtlPolicy,
}

impl<C> MetricCache<C>
where
    C: CacheBackend,
{
    /// Create a new metric cache.
    pub fn new(backend: Arc<C>, ttl_policy: TtlPolicy) -> Self {
        Self {
            backend,
            ttl_policy,
        }
    }

    /// Create a new metric cache with the default TTL policy.
    pub fn with_defaults(backend: Arc<C>) -> Self {
        Self::new(backend, TtlPolicy::default())
    }

    /// Get a reference to the cache backend.
    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Get the TTL policy.
    pub fn ttl_policy(&self) -> TtlPolicy {
        self.ttl_policy
    }

    /// Return the cached value for `request`, or run `compute`, store its
    /// result, and return it.
    ///
    /// The request's range is validated before any store access; an
    /// inverted range never reaches the backend or the computation.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        request: &MetricRequest,
        compute: F,
    ) -> GlowResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = GlowResult<T>>,
    {
        request.validate_range()?;
        let key = MetricKey::derive(request);

        match self.backend.get(&key).await {
            Ok(Some(value)) => match serde_json::from_value::<T>(value) {
                Ok(decoded) => {
                    tracing::debug!(key = %key, metric = request.metric, "metric cache hit");
                    return Ok(decoded);
                }
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        error = %e,
                        "cached metric no longer decodes, dropping entry"
                    );
                    let _ = self.backend.forget(&key).await;
                }
            },
            Ok(None) => {
                tracing::debug!(key = %key, metric = request.metric, "metric cache miss");
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "metric cache read failed, treating as miss");
            }
        }

        let computed = compute().await?;
        let ttl = self.ttl_policy.ttl_for(request.end);
        match serde_json::to_value(&computed) {
            Ok(value) => {
                if let Err(e) = self.backend.put(&key, value, ttl).await {
                    tracing::warn!(
                        key = %key,
                        error = %e,
                        "metric cache write failed, returning uncached value"
                    );
                }
            }
            Err(e) => {
                return Err(MetricError::Computation {
                    metric: request.metric.to_string(),
                    reason: format!("result not serializable: {e}"),
                }
                .into());
            }
        }
        Ok(computed)
    }

    /// Drop the entry for a single request.
    pub async fn forget(&self, request: &MetricRequest) -> GlowResult<()> {
        self.backend.forget(&MetricKey::derive(request)).await
    }

    /// Drop every metric entry. Returns how many were removed.
    pub async fn invalidate_all(&self) -> GlowResult<u64> {
        let dropped = self.backend.flush().await?;
        tracing::info!(entries = dropped, "flushed metric cache");
        Ok(dropped)
    }
}

impl<C> Clone for MetricCache<C>
where
    C: CacheBackend,
{
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ttl_policy: self.ttl_policy,
        }
    }
}
