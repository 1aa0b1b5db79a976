use async_trait::async_trait;
use serde_json::Value;

use super::response::EsSearchResponse;
use crate::error::BackendError;
use crate::model::IndexAck;
use crate::query::SearchRequest;
use crate::template::IndexTemplate;

/// Operations the gateway needs from a document-search engine.
///
/// Implementations must tolerate many concurrent calls on a shared reference.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Create or replace a composable index template
    async fn put_index_template(
        &self,
        name: &str,
        template: &IndexTemplate,
    ) -> Result<(), BackendError>;

    /// Store a single document in `index`
    async fn index_document(&self, index: &str, document: &Value)
        -> Result<IndexAck, BackendError>;

    /// Run a search against an index or pattern
    async fn search(
        &self,
        index_pattern: &str,
        request: &SearchRequest,
    ) -> Result<EsSearchResponse, BackendError>;

    /// Raw cluster health payload
    async fn cluster_health(&self) -> Result<Value, BackendError>;

    /// Raw index statistics for an index or pattern
    async fn indices_stats(&self, index_pattern: &str) -> Result<Value, BackendError>;

    /// Release the connection. Calling it again is a no-op.
    async fn close(&self);

    /// Human-readable backend name
    fn backend_name(&self) -> &str;
}
