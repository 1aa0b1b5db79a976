//! logvault: log indexing and query translation in front of Elasticsearch
//!
//! Log records are routed to per-category, per-day indices
//! (`{prefix}-{category}-{YYYY.MM.DD}`), searches are translated into a
//! bool query against `{prefix}-*`, and the engine's cluster health is
//! narrowed into a stable summary.
//!
//! The entry point is [`LogGateway`], which owns the [`SearchBackend`]
//! handle for the lifetime of the process.

pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod health;
pub mod metrics;
pub mod model;
pub mod query;
pub mod router;
pub mod stats;
pub mod template;

pub use backend::{ElasticsearchClient, SearchBackend};
pub use config::Config;
pub use error::{BackendError, GatewayError, Result, ValidationError};
pub use gateway::{Clock, LogGateway, SystemClock, TemplateSetup};
pub use health::{ClusterHealthSummary, HealthReport};
pub use model::{IndexAck, LogCategory, LogLevel, LogRecord, SearchQuery, SearchResult};
pub use router::IndexRouter;
pub use stats::IndexStatsSummary;
