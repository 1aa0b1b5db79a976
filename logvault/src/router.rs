//! Index naming
//!
//! Records are bucketed by category and **ingestion day**:
//!
//! ```text
//! {prefix}-{category}-{YYYY.MM.DD}     e.g. logs-application-2024.01.15
//! ```
//!
//! The day comes from the clock at indexing time, not from the record's own
//! timestamp, so a late record lands in today's index. Retention and rollover
//! operate on ingestion days.
//!
//! Searches and stats always span every category and day through `{prefix}-*`.

use crate::model::LogCategory;
use chrono::{DateTime, Utc};

/// Date component of a physical index name
pub const INDEX_DATE_FORMAT: &str = "%Y.%m.%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRouter {
    prefix: String,
}

impl IndexRouter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Physical index for a record of `category` ingested at `now`
    pub fn index_name_for(&self, category: LogCategory, now: DateTime<Utc>) -> String {
        format!(
            "{}-{}-{}",
            self.prefix,
            category.as_str(),
            now.format(INDEX_DATE_FORMAT)
        )
    }

    /// Pattern covering every index this router produces
    pub fn index_pattern(&self) -> String {
        format!("{}-*", self.prefix)
    }

    /// Name of the index template bound to [`Self::index_pattern`]
    pub fn template_name(&self) -> String {
        format!("{}-template", self.prefix)
    }
}
