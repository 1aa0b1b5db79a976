//! Index template for log indices
//!
//! Installed once at startup so every index matching `{prefix}-*` gets the
//! same mapping:
//!
//! ```json
//! {
//!   "index_patterns": ["logs-*"],
//!   "template": {
//!     "settings": {"number_of_shards": 1, "number_of_replicas": 0, "index.refresh_interval": "5s"},
//!     "mappings": {"properties": {
//!       "timestamp": {"type": "date"},
//!       "level":     {"type": "keyword"},
//!       "category":  {"type": "keyword"},
//!       "message":   {"type": "text", "analyzer": "standard"},
//!       "source":    {"type": "keyword"},
//!       "metadata":  {"type": "object", "enabled": true}
//!     }}
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Composable index template body (`PUT /_index_template/{name}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexTemplate {
    /// Index patterns to match (e.g. "logs-*")
    pub index_patterns: Vec<String>,

    pub template: TemplateBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBody {
    pub settings: TemplateSettings,
    pub mappings: Mappings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
    #[serde(rename = "index.refresh_interval")]
    pub refresh_interval: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            number_of_shards: 1,
            number_of_replicas: 0,
            refresh_interval: "5s".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mappings {
    pub properties: BTreeMap<String, FieldMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl FieldMapping {
    fn of(field_type: &str) -> Self {
        Self {
            field_type: field_type.to_string(),
            analyzer: None,
            enabled: None,
        }
    }
}

impl IndexTemplate {
    /// The log template bound to `pattern`
    pub fn for_logs(pattern: impl Into<String>) -> Self {
        let properties = BTreeMap::from([
            ("timestamp".to_string(), FieldMapping::of("date")),
            ("level".to_string(), FieldMapping::of("keyword")),
            ("category".to_string(), FieldMapping::of("keyword")),
            (
                "message".to_string(),
                FieldMapping {
                    analyzer: Some("standard".to_string()),
                    ..FieldMapping::of("text")
                },
            ),
            ("source".to_string(), FieldMapping::of("keyword")),
            (
                "metadata".to_string(),
                FieldMapping {
                    enabled: Some(true),
                    ..FieldMapping::of("object")
                },
            ),
        ]);

        Self {
            index_patterns: vec![pattern.into()],
            template: TemplateBody {
                settings: TemplateSettings::default(),
                mappings: Mappings { properties },
            },
        }
    }
}
