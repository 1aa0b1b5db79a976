//! Log store gateway
//!
//! The single seam between logvault and the search engine. Every operation is
//! one pass-through call with no retries and no caching. Backend failures are
//! wrapped in a [`GatewayError`] variant naming the operation, with the
//! [`BackendError`] kept as the source.
//!
//! The one exception is [`LogGateway::initialize`], whose failure is logged
//! and reported as [`TemplateSetup::FailedButContinuing`] so startup goes on
//! against dynamically mapped indices.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::backend::SearchBackend;
use crate::error::{BackendError, GatewayError, Result};
use crate::health::{ClusterHealthSummary, HealthReport};
use crate::metrics;
use crate::model::{IndexAck, LogRecord, SearchQuery, SearchResult};
use crate::query::QueryBuilder;
use crate::router::IndexRouter;
use crate::stats::IndexStatsSummary;
use crate::template::IndexTemplate;

/// Source of "now" for index routing
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Outcome of index template setup. Neither variant stops startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSetup {
    Created,
    FailedButContinuing(String),
}

impl TemplateSetup {
    pub fn is_created(&self) -> bool {
        matches!(self, TemplateSetup::Created)
    }
}

pub struct LogGateway {
    backend: Arc<dyn SearchBackend>,
    router: IndexRouter,
    clock: Arc<dyn Clock>,
}

impl LogGateway {
    pub fn new(backend: Arc<dyn SearchBackend>, router: IndexRouter) -> Self {
        Self {
            backend,
            router,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to pick the ingestion day
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn router(&self) -> &IndexRouter {
        &self.router
    }

    /// Install the log index template. Meant to run once before serving.
    pub async fn initialize(&self) -> TemplateSetup {
        let name = self.router.template_name();
        let template = IndexTemplate::for_logs(self.router.index_pattern());

        match observe("put_index_template", self.backend.put_index_template(&name, &template))
            .await
        {
            Ok(()) => {
                tracing::info!(template = %name, pattern = %self.router.index_pattern(), "Index template installed");
                metrics::record_template_setup("created");
                TemplateSetup::Created
            }
            Err(e) => {
                tracing::warn!(template = %name, error = %e, "Could not create index template, continuing with dynamic mappings");
                metrics::record_template_setup("failed");
                TemplateSetup::FailedButContinuing(e.to_string())
            }
        }
    }

    /// Index one record into today's index for its category
    pub async fn index_record(&self, record: &LogRecord) -> Result<IndexAck> {
        let index = self.router.index_name_for(record.category, self.clock.now());
        let document = serde_json::to_value(record)
            .map_err(|e| GatewayError::Indexing(BackendError::Json(e)))?;

        let ack = observe("index", self.backend.index_document(&index, &document))
            .await
            .map_err(GatewayError::Indexing)?;

        tracing::debug!(index = %ack.index, id = %ack.id, "Indexed log record");
        Ok(ack)
    }

    /// Search across every log index
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResult> {
        let pattern = self.router.index_pattern();
        let request = QueryBuilder::build(query);

        let response = observe("search", self.backend.search(&pattern, &request))
            .await
            .map_err(GatewayError::Search)?;

        let total = response.total();
        let logs: Vec<_> = response
            .hits
            .hits
            .into_iter()
            .take(query.size)
            .map(|hit| hit.source)
            .collect();

        tracing::debug!(
            pattern = %pattern,
            total,
            returned = logs.len(),
            took_ms = response.took,
            "Search completed"
        );

        Ok(SearchResult {
            total,
            logs,
            took: response.took,
        })
    }

    /// Raw cluster health payload, unmodified
    pub async fn cluster_health(&self) -> Result<Value> {
        observe("cluster_health", self.backend.cluster_health())
            .await
            .map_err(GatewayError::ClusterHealth)
    }

    /// Cluster health narrowed to a [`HealthReport`]. An unreachable backend
    /// is an error, a partial payload is not.
    pub async fn health_report(&self) -> Result<HealthReport> {
        let payload = self.cluster_health().await?;
        Ok(HealthReport::healthy(ClusterHealthSummary::from_payload(
            &payload,
        )))
    }

    /// Raw index statistics for every log index
    pub async fn index_stats(&self) -> Result<Value> {
        let pattern = self.router.index_pattern();
        observe("index_stats", self.backend.indices_stats(&pattern))
            .await
            .map_err(GatewayError::IndexStats)
    }

    pub async fn index_stats_summary(&self) -> Result<IndexStatsSummary> {
        let payload = self.index_stats().await?;
        Ok(IndexStatsSummary::from_payload(&payload))
    }

    /// Release the backend connection. Safe to call more than once.
    pub async fn close(&self) {
        self.backend.close().await;
        tracing::info!(backend = self.backend.backend_name(), "Log gateway closed");
    }
}

async fn observe<T>(
    operation: &'static str,
    call: impl Future<Output = std::result::Result<T, BackendError>>,
) -> std::result::Result<T, BackendError> {
    let start = Instant::now();
    let result = call.await;
    metrics::record_backend_duration(operation, start.elapsed());

    match &result {
        Ok(_) => metrics::record_backend_success(operation),
        Err(e) => {
            tracing::error!(operation, error = %e, "Backend call failed");
            metrics::record_backend_error(operation, e.kind());
        }
    }
    result
}
