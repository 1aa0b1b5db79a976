//! Cluster health summary
//!
//! The engine's `_cluster/health` payload is narrowed to three fields. Any of
//! them may be missing (partial or unexpected payloads), in which case a
//! default is used instead of failing:
//!
//! | field             | default     |
//! |-------------------|-------------|
//! | `status`          | `"unknown"` |
//! | `cluster_name`    | `"unknown"` |
//! | `number_of_nodes` | `0`         |
//!
//! A backend that cannot be reached at all is *not* defaulted: that surfaces
//! as [`GatewayError::ClusterHealth`](crate::GatewayError::ClusterHealth).

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN: &str = "unknown";

/// Outward status whenever the backend call itself succeeded
pub const HEALTHY: &str = "healthy";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHealthSummary {
    /// green / yellow / red as reported by the engine, or "unknown"
    pub status: String,
    pub cluster_name: String,
    pub number_of_nodes: u64,
}

impl Default for ClusterHealthSummary {
    fn default() -> Self {
        Self {
            status: UNKNOWN.to_string(),
            cluster_name: UNKNOWN.to_string(),
            number_of_nodes: 0,
        }
    }
}

impl ClusterHealthSummary {
    /// Build from a raw health payload. Never fails.
    pub fn from_payload(payload: &Value) -> Self {
        let defaults = Self::default();

        Self {
            status: string_field(payload, "status").unwrap_or(defaults.status),
            cluster_name: string_field(payload, "cluster_name").unwrap_or(defaults.cluster_name),
            number_of_nodes: payload
                .get("number_of_nodes")
                .and_then(Value::as_u64)
                .unwrap_or(defaults.number_of_nodes),
        }
    }
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Health response exposed by the gateway.
///
/// `status` says whether the gateway reached the backend; the engine's own
/// color lives in `elasticsearch.status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub elasticsearch: ClusterHealthSummary,
}

impl HealthReport {
    pub fn healthy(summary: ClusterHealthSummary) -> Self {
        Self {
            status: HEALTHY.to_string(),
            elasticsearch: summary,
        }
    }
}
