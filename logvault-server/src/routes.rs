use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use logvault::config::ApiConfig;
use logvault::{HealthReport, IndexAck, IndexStatsSummary, LogGateway, LogRecord, SearchQuery, SearchResult};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<LogGateway>,
    pub api: ApiConfig,
    /// Whether GET /metrics is mounted
    pub prometheus: bool,
}

/// GET / - API info
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let mut documentation = json!({"health": "/api/health", "index_stats": "/api/metrics"});
    if state.prometheus {
        documentation["prometheus"] = json!("/metrics");
    }

    Json(json!({
        "message": state.api.title,
        "version": state.api.version,
        "endpoints": {
            "health": "/api/health",
            "index_log": "POST /api/logs",
            "search_logs": "POST /api/logs/search",
            "list_logs": "GET /api/logs",
            "index_metrics": "/api/metrics",
        },
        "documentation": documentation,
        "index_pattern": state.gateway.router().index_pattern(),
    }))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthReport>, ApiError> {
    match state.gateway.health_report().await {
        Ok(report) => Ok(Json(report)),
        Err(e) => {
            tracing::error!(error = %e, cause = %e.cause(), "Health check failed");
            Err(ApiError::HealthUnavailable)
        }
    }
}

/// POST /api/logs
pub async fn index_log(
    State(state): State<AppState>,
    payload: Result<Json<LogRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<IndexAck>), ApiError> {
    let Json(record) = payload?;
    let ack = state.gateway.index_record(&record).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

/// POST /api/logs/search
pub async fn search_logs(
    State(state): State<AppState>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Json(query) = payload?;
    run_search(&state, query).await
}

/// GET /api/logs - same filters as search, from the query string
pub async fn list_logs(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(query) = params?;
    run_search(&state, query).await
}

async fn run_search(state: &AppState, query: SearchQuery) -> Result<Json<SearchResult>, ApiError> {
    query.validate()?;
    let result = state.gateway.search(&query).await?;
    Ok(Json(result))
}

/// GET /api/metrics - storage summary across log indices
pub async fn index_metrics(
    State(state): State<AppState>,
) -> Result<Json<IndexStatsSummary>, ApiError> {
    let summary = state.gateway.index_stats_summary().await?;
    Ok(Json(summary))
}
