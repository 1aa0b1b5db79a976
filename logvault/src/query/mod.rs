//! Query DSL subset and the builder that turns a [`SearchQuery`] into it.
//!
//! [`SearchQuery`]: crate::model::SearchQuery

pub mod builder;
pub mod types;

pub use builder::QueryBuilder;
pub use types::{
    BoolQuery, EsQuery, MatchAllQuery, QueryStringQuery, RangeParams, SearchRequest, SortClause,
    SortOrder, TermValue,
};
