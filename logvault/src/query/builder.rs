//! SearchQuery → bool query
//!
//! Each present filter adds one clause under `bool.must`:
//!
//! | field          | clause                                        |
//! |----------------|-----------------------------------------------|
//! | `category`     | `term` on `category`                          |
//! | `level`        | `term` on `level`                             |
//! | `source`       | `term` on `source`                            |
//! | `start_time`   | `range.timestamp.gte`                         |
//! | `end_time`     | `range.timestamp.lte`                         |
//! | `query_string` | `query_string` with `default_field: message`  |
//!
//! No filters yields `must: [match_all]`. Hits are always sorted by
//! `timestamp` descending.

use super::types::{BoolQuery, EsQuery, QueryStringQuery, RangeParams, SearchRequest, SortClause};
use crate::model::SearchQuery;
use serde_json::Value;

pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const MESSAGE_FIELD: &str = "message";
pub const CATEGORY_FIELD: &str = "category";
pub const LEVEL_FIELD: &str = "level";
pub const SOURCE_FIELD: &str = "source";

pub struct QueryBuilder;

impl QueryBuilder {
    /// Build the full request body. Paging is passed through as-is; bounds
    /// are checked by [`SearchQuery::validate`] before this point.
    pub fn build(query: &SearchQuery) -> SearchRequest {
        SearchRequest {
            query: EsQuery::Bool(BoolQuery {
                must: Self::must_clauses(query),
                ..Default::default()
            }),
            from: query.from,
            size: query.size,
            sort: vec![SortClause::desc(TIMESTAMP_FIELD)],
        }
    }

    /// The AND-ed clause list, never empty.
    pub fn must_clauses(query: &SearchQuery) -> Vec<EsQuery> {
        let mut clauses = Vec::new();

        if let Some(category) = query.category {
            clauses.push(EsQuery::term(CATEGORY_FIELD, category.as_str()));
        }

        if let Some(level) = query.level {
            clauses.push(EsQuery::term(LEVEL_FIELD, level.as_str()));
        }

        if let Some(source) = non_empty(&query.source) {
            clauses.push(EsQuery::term(SOURCE_FIELD, source));
        }

        if query.start_time.is_some() || query.end_time.is_some() {
            let range = RangeParams {
                gte: query.start_time.map(|t| Value::String(t.to_rfc3339())),
                lte: query.end_time.map(|t| Value::String(t.to_rfc3339())),
                ..Default::default()
            };
            clauses.push(EsQuery::range(TIMESTAMP_FIELD, range));
        }

        if let Some(text) = non_empty(&query.query_string) {
            clauses.push(EsQuery::QueryString(QueryStringQuery {
                query: text.to_string(),
                default_field: Some(MESSAGE_FIELD.to_string()),
                default_operator: None,
            }));
        }

        if clauses.is_empty() {
            clauses.push(EsQuery::match_all());
        }

        clauses
    }
}

// Empty strings count as "not set", same as an absent field.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
