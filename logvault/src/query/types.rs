//! Elasticsearch Query DSL types
//!
//! Only the subset the gateway emits: `match_all`, `term`, `range`,
//! `query_string` and `bool`. The types serialize to the engine's JSON
//! shape and deserialize back, which the mock backend in the tests relies on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Search request body sent to `POST /{pattern}/_search`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchRequest {
    pub query: EsQuery,

    /// Starting offset
    pub from: usize,

    /// Maximum number of hits
    pub size: usize,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SortClause {
    Field(String),
    Object(HashMap<String, SortOrder>),
}

impl SortClause {
    pub fn desc(field: &str) -> Self {
        SortClause::Object(HashMap::from([(
            field.to_string(),
            SortOrder::Object {
                order: "desc".to_string(),
            },
        )]))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SortOrder {
    Simple(String),
    Object { order: String },
}

/// ES Query types
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EsQuery {
    /// Match all documents
    MatchAll(MatchAllQuery),

    /// Term query (exact match, not analyzed)
    Term(HashMap<String, TermValue>),

    /// Range query
    Range(HashMap<String, RangeParams>),

    /// Bool query
    Bool(BoolQuery),

    /// Query string (Lucene syntax)
    QueryString(QueryStringQuery),
}

impl EsQuery {
    pub fn match_all() -> Self {
        EsQuery::MatchAll(MatchAllQuery::default())
    }

    pub fn term(field: &str, value: impl Into<Value>) -> Self {
        EsQuery::Term(HashMap::from([(
            field.to_string(),
            TermValue::Simple(value.into()),
        )]))
    }

    pub fn range(field: &str, params: RangeParams) -> Self {
        EsQuery::Range(HashMap::from([(field.to_string(), params)]))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MatchAllQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TermValue {
    Simple(Value),
    Object { value: Value, boost: Option<f32> },
}

impl TermValue {
    pub fn value(&self) -> &Value {
        match self {
            TermValue::Simple(v) => v,
            TermValue::Object { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RangeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BoolQuery {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<EsQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<EsQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<EsQuery>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<EsQuery>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryStringQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<String>,
}
