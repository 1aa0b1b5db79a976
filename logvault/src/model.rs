//! Log records, search queries and the result shapes handed back to callers.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Smallest page size a search may request.
pub const MIN_PAGE_SIZE: usize = 1;
/// Largest page size a search may request.
pub const MAX_PAGE_SIZE: usize = 1000;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic type of a log record. Also the middle segment of its index name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    WebServer,
    Database,
    Application,
    Security,
}

impl LogCategory {
    pub const ALL: [LogCategory; 4] = [
        LogCategory::WebServer,
        LogCategory::Database,
        LogCategory::Application,
        LogCategory::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::WebServer => "web_server",
            LogCategory::Database => "database",
            LogCategory::Application => "application",
            LogCategory::Security => "security",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured log record.
///
/// `metadata` is opaque: it is stored exactly as received and never
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub category: LogCategory,
    pub message: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Search request. Every filter is optional; no filters means "everything".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub category: Option<LogCategory>,

    #[serde(default)]
    pub level: Option<LogLevel>,

    /// Exact match on the record source
    #[serde(default)]
    pub source: Option<String>,

    /// Inclusive lower bound on `timestamp`
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `timestamp`
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    /// Full-text query in the engine's own query-string syntax, passed through verbatim
    #[serde(default)]
    pub query_string: Option<String>,

    #[serde(default = "default_size")]
    pub size: usize,

    #[serde(default)]
    pub from: usize,
}

fn default_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            category: None,
            level: None,
            source: None,
            start_time: None,
            end_time: None,
            query_string: None,
            size: DEFAULT_PAGE_SIZE,
            from: 0,
        }
    }
}

impl SearchQuery {
    /// Check the paging bounds. `from` is unsigned so it is always valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.size) {
            return Err(ValidationError::SizeOutOfRange {
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE,
                actual: self.size,
            });
        }
        Ok(())
    }
}

/// Normalized search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Total hits as reported by the engine. May be a lower bound when the
    /// engine stops counting past its tracking threshold.
    pub total: u64,

    /// `_source` of each hit, in backend order
    pub logs: Vec<Map<String, Value>>,

    /// Engine-side time in milliseconds
    pub took: u64,
}

/// Acknowledgment returned after indexing a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAck {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Anything else the engine reported (`_shards`, `_seq_no`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ===================================================================
    // Enumerations
    // ===================================================================

    #[test]
    fn test_level_wire_names() {
        for (level, name) in [
            (LogLevel::Debug, "DEBUG"),
            (LogLevel::Info, "INFO"),
            (LogLevel::Warning, "WARNING"),
            (LogLevel::Error, "ERROR"),
            (LogLevel::Critical, "CRITICAL"),
        ] {
            assert_eq!(serde_json::to_value(level).unwrap(), json!(name));
            assert_eq!(level.as_str(), name);
        }
    }

    #[test]
    fn test_category_wire_names() {
        for category in LogCategory::ALL {
            let value = serde_json::to_value(category).unwrap();
            assert_eq!(value, json!(category.as_str()));
        }
        assert_eq!(LogCategory::WebServer.to_string(), "web_server");
    }

    #[test]
    fn test_unknown_variants_rejected() {
        assert!(serde_json::from_value::<LogLevel>(json!("TRACE")).is_err());
        assert!(serde_json::from_value::<LogLevel>(json!("info")).is_err());
        assert!(serde_json::from_value::<LogCategory>(json!("kernel")).is_err());
    }

    // ===================================================================
    // LogRecord
    // ===================================================================

    #[test]
    fn test_record_metadata_kept_verbatim() {
        let record: LogRecord = serde_json::from_value(json!({
            "timestamp": "2024-01-15T10:30:00Z",
            "level": "INFO",
            "category": "web_server",
            "message": "Request processed successfully",
            "source": "nginx",
            "metadata": {"ip": "192.168.1.100", "status_code": 200, "nested": {"a": [1, 2]}}
        }))
        .unwrap();

        let doc = serde_json::to_value(&record).unwrap();
        assert_eq!(doc["metadata"]["nested"]["a"], json!([1, 2]));
        assert_eq!(doc["metadata"]["status_code"], json!(200));
        assert_eq!(doc["category"], json!("web_server"));
    }

    #[test]
    fn test_record_without_metadata() {
        let record: LogRecord = serde_json::from_value(json!({
            "timestamp": "2024-01-15T10:30:00Z",
            "level": "ERROR",
            "category": "database",
            "message": "deadlock detected",
            "source": "postgres"
        }))
        .unwrap();
        assert!(record.metadata.is_none());
        let doc = serde_json::to_value(&record).unwrap();
        assert!(doc.get("metadata").is_none());
    }

    #[test]
    fn test_record_requires_timestamp_and_category() {
        let missing_ts = serde_json::from_value::<LogRecord>(json!({
            "level": "INFO", "category": "database", "message": "m", "source": "s"
        }));
        assert!(missing_ts.is_err());

        let missing_category = serde_json::from_value::<LogRecord>(json!({
            "timestamp": "2024-01-15T10:30:00Z", "level": "INFO", "message": "m", "source": "s"
        }));
        assert!(missing_category.is_err());
    }

    // ===================================================================
    // SearchQuery
    // ===================================================================

    #[test]
    fn test_query_defaults() {
        let q: SearchQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(q, SearchQuery::default());
        assert_eq!(q.size, 100);
        assert_eq!(q.from, 0);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_query_size_bounds() {
        let mut q = SearchQuery::default();
        q.size = 1;
        assert!(q.validate().is_ok());
        q.size = 1000;
        assert!(q.validate().is_ok());
        q.size = 0;
        assert!(q.validate().is_err());
        q.size = 1001;
        assert_eq!(
            q.validate(),
            Err(ValidationError::SizeOutOfRange {
                min: 1,
                max: 1000,
                actual: 1001
            })
        );
    }

    #[test]
    fn test_query_negative_offset_rejected() {
        assert!(serde_json::from_value::<SearchQuery>(json!({"from": -1})).is_err());
    }

    // ===================================================================
    // IndexAck
    // ===================================================================

    #[test]
    fn test_index_ack_keeps_extra_fields() {
        let ack: IndexAck = serde_json::from_value(json!({
            "_index": "logs-database-2024.01.15",
            "_id": "abc",
            "_version": 1,
            "result": "created",
            "_seq_no": 0,
            "_shards": {"total": 1, "successful": 1, "failed": 0}
        }))
        .unwrap();
        assert_eq!(ack.index, "logs-database-2024.01.15");
        assert_eq!(ack.result.as_deref(), Some("created"));
        assert_eq!(ack.extra["_seq_no"], json!(0));
        assert!(ack.extra.contains_key("_shards"));
    }
}
