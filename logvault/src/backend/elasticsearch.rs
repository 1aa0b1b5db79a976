//! Elasticsearch REST client

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::response::EsSearchResponse;
use super::traits::SearchBackend;
use crate::error::BackendError;
use crate::model::IndexAck;
use crate::query::SearchRequest;
use crate::template::IndexTemplate;

/// One pooled HTTP client per process. The request timeout is fixed at
/// construction and applies to every call.
pub struct ElasticsearchClient {
    client: Client,
    base_url: String,
    closed: AtomicBool,
}

impl ElasticsearchClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            closed: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn ensure_open(&self) -> Result<(), BackendError> {
        if self.is_closed() {
            return Err(BackendError::Closed);
        }
        Ok(())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        self.ensure_open()?;

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    async fn put_index_template(
        &self,
        name: &str,
        template: &IndexTemplate,
    ) -> Result<(), BackendError> {
        let _ack: Value = self
            .send(
                self.client
                    .put(self.url(&format!("_index_template/{}", name)))
                    .json(template),
            )
            .await?;
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        document: &Value,
    ) -> Result<IndexAck, BackendError> {
        self.send(
            self.client
                .post(self.url(&format!("{}/_doc", index)))
                .json(document),
        )
        .await
    }

    async fn search(
        &self,
        index_pattern: &str,
        request: &SearchRequest,
    ) -> Result<EsSearchResponse, BackendError> {
        self.send(
            self.client
                .post(self.url(&format!("{}/_search", index_pattern)))
                .json(request),
        )
        .await
    }

    async fn cluster_health(&self) -> Result<Value, BackendError> {
        self.send(self.client.get(self.url("_cluster/health"))).await
    }

    async fn indices_stats(&self, index_pattern: &str) -> Result<Value, BackendError> {
        self.send(
            self.client
                .get(self.url(&format!("{}/_stats", index_pattern))),
        )
        .await
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!(url = %self.base_url, "Elasticsearch client closed");
        }
    }

    fn backend_name(&self) -> &str {
        "elasticsearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ElasticsearchClient {
        ElasticsearchClient::new("http://localhost:9200/", Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let c = client();
        assert_eq!(c.base_url(), "http://localhost:9200");
        assert_eq!(c.url("_cluster/health"), "http://localhost:9200/_cluster/health");
        assert_eq!(c.url("/logs-*/_search"), "http://localhost:9200/logs-*/_search");
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_blocks_calls() {
        let c = client();
        assert!(!c.is_closed());
        c.close().await;
        c.close().await;
        assert!(c.is_closed());

        let err = c.cluster_health().await.unwrap_err();
        assert!(matches!(err, BackendError::Closed));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is not an HTTP server
        let c = ElasticsearchClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = c.cluster_health().await.unwrap_err();
        assert!(err.is_unreachable(), "got {err:?}");
    }
}
