//! Search response as returned by the engine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsSearchResponse {
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    pub hits: HitsResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitsResponse {
    /// Absent when the request disabled hit tracking
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// `hits.total`: an object since ES 7, a bare integer before that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object { value: u64, relation: String },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(n) => *n,
            TotalHits::Object { value, .. } => *value,
        }
    }

    /// False when the engine stopped counting (`relation: gte`).
    pub fn is_exact(&self) -> bool {
        match self {
            TotalHits::Count(_) => true,
            TotalHits::Object { relation, .. } => relation == "eq",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index", default)]
    pub index: Option<String>,
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl EsSearchResponse {
    pub fn total(&self) -> u64 {
        self.hits.total.as_ref().map(TotalHits::value).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_es8_response() {
        let resp: EsSearchResponse = serde_json::from_value(json!({
            "took": 7,
            "timed_out": false,
            "_shards": {"total": 4, "successful": 4, "skipped": 0, "failed": 0},
            "hits": {
                "total": {"value": 10000, "relation": "gte"},
                "max_score": null,
                "hits": [
                    {"_index": "logs-database-2024.01.15", "_id": "a1", "_score": null,
                     "_source": {"message": "slow query", "level": "WARNING"},
                     "sort": [1705314600000u64]}
                ]
            }
        }))
        .unwrap();
        assert_eq!(resp.took, 7);
        assert_eq!(resp.total(), 10000);
        assert!(!resp.hits.total.as_ref().unwrap().is_exact());
        assert_eq!(resp.hits.hits[0].source["message"], json!("slow query"));
        assert!(resp.hits.hits[0].score.is_none());
    }

    #[test]
    fn test_parse_legacy_integer_total() {
        let resp: EsSearchResponse = serde_json::from_value(json!({
            "took": 1,
            "hits": {"total": 3, "hits": []}
        }))
        .unwrap();
        assert_eq!(resp.total(), 3);
        assert!(resp.hits.total.unwrap().is_exact());
    }

    #[test]
    fn test_missing_total_defaults_to_zero() {
        let resp: EsSearchResponse =
            serde_json::from_value(json!({"took": 0, "hits": {"hits": []}})).unwrap();
        assert_eq!(resp.total(), 0);
    }
}
