//! Deterministic cache-key derivation for metric requests.
//!
//! The derivation must be injective over the request fields: two requests
//! that differ in any component must never share a key. Components are
//! length-prefixed before hashing so concatenation cannot introduce
//! ambiguity (e.g. a parameter value containing a separator).

use glow_core::MetricRequest;
use sha2::{Digest, Sha256};
use std::fmt;

/// Prefix shared by every metric cache key.
///
/// Keeps metric entries distinguishable from anything else a shared cache
/// store might hold, and leaves room for a scoped invalidation scheme.
pub const KEY_PREFIX: &str = "metrics:";

/// A derived cache key for one metric request.
///
/// Format: `metrics:<metric>:<sha256 hex digest>`. The metric name stays
/// readable for log lines and debugging; the digest covers every field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricKey(String);

impl MetricKey {
    /// Derive the key for a request.
    ///
    /// The digest input is built from length-prefixed components in a fixed
    /// order: metric name, start, end, then each parameter name/value pair
    /// in the request's canonical (sorted) order. Timestamps contribute
    /// their microsecond precision.
    pub fn derive(request: &MetricRequest) -> Self {
        let mut buf = Vec::with_capacity(64);
        push_component(&mut buf, request.metric.as_bytes());
        push_component(&mut buf, &request.start.timestamp_micros().to_be_bytes());
        push_component(&mut buf, &request.end.timestamp_micros().to_be_bytes());
        for (name, value) in &request.params {
            push_component(&mut buf, name.as_bytes());
            push_component(&mut buf, value.to_string().as_bytes());
        }

        let digest = Sha256::digest(&buf);
        Self(format!(
            "{}{}:{}",
            KEY_PREFIX,
            request.metric,
            hex::encode(digest)
        ))
    }

    /// The full key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MetricKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Append one length-prefixed component to the digest input.
fn push_component(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use glow_core::ParamValue;
    use proptest::prelude::*;

    /// Strategy for timestamps within a sane range (years 2001-2033).
    fn timestamp_strategy() -> impl Strategy<Value = glow_core::Timestamp> {
        (1_000_000_000i64..2_000_000_000i64)
            .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().expect("valid timestamp"))
    }

    fn param_value_strategy() -> impl Strategy<Value = ParamValue> {
        prop_oneof![
            any::<i64>().prop_map(ParamValue::Int),
            "[a-z0-9_|=:]{0,12}".prop_map(ParamValue::Str),
            any::<bool>().prop_map(ParamValue::Bool),
        ]
    }

    fn request_strategy() -> impl Strategy<Value = MetricRequest> {
        (
            prop_oneof![
                Just("revenue"),
                Just("order_metrics"),
                Just("top_products"),
                Just("daily_trend"),
            ],
            timestamp_strategy(),
            timestamp_strategy(),
            proptest::collection::btree_map("[a-z_]{1,8}", param_value_strategy(), 0..4),
        )
            .prop_map(|(metric, start, end, params)| {
                let mut request = MetricRequest::new(metric, start, end);
                request.params = params;
                request
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Derivation is a pure function: same request, same key.
        #[test]
        fn prop_derivation_is_deterministic(request in request_strategy()) {
            prop_assert_eq!(MetricKey::derive(&request), MetricKey::derive(&request));
        }

        /// Different requests never share a key.
        #[test]
        fn prop_derivation_is_injective(
            a in request_strategy(),
            b in request_strategy(),
        ) {
            if a == b {
                prop_assert_eq!(MetricKey::derive(&a), MetricKey::derive(&b));
            } else {
                prop_assert_ne!(
                    MetricKey::derive(&a),
                    MetricKey::derive(&b),
                    "different requests must derive different keys"
                );
            }
        }

        /// Every key carries the shared prefix.
        #[test]
        fn prop_key_has_prefix(request in request_strategy()) {
            prop_assert!(MetricKey::derive(&request).as_str().starts_with(KEY_PREFIX));
        }
    }
}
