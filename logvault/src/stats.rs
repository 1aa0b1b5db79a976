//! Storage summary over all log indices, narrowed from `GET /{pattern}/_stats`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatsSummary {
    /// Number of indices matched by the pattern
    pub indices: usize,
    /// Documents in primary shards
    pub docs_count: u64,
    pub store_size_bytes: u64,
    /// Human-readable `store_size_bytes` (e.g. "1.5mb")
    pub store_size: String,
}

impl IndexStatsSummary {
    /// Build from a raw stats payload. Missing sections count as zero.
    pub fn from_payload(payload: &Value) -> Self {
        let indices = payload
            .get("indices")
            .and_then(Value::as_object)
            .map(|m| m.len())
            .unwrap_or(0);

        let docs_count = payload
            .pointer("/_all/primaries/docs/count")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let store_size_bytes = payload
            .pointer("/_all/total/store/size_in_bytes")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        Self {
            indices,
            docs_count,
            store_size_bytes,
            store_size: format_bytes(store_size_bytes),
        }
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}gb", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}mb", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}kb", bytes as f64 / KB as f64)
    } else {
        format!("{}b", bytes)
    }
}
