use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use logvault::config::{ApiConfig, CorsConfig};
use logvault::LogGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{self, AppState};

pub struct ApiServer {
    gateway: Arc<LogGateway>,
    api: ApiConfig,
    cors_config: CorsConfig,
    metrics: Option<PrometheusHandle>,
}

impl ApiServer {
    pub fn new(gateway: Arc<LogGateway>, api: ApiConfig, cors_config: CorsConfig) -> Self {
        Self {
            gateway,
            api,
            cors_config,
            metrics: None,
        }
    }

    /// Serve Prometheus text format at GET /metrics
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build CORS layer from configuration.
    ///
    /// A "*" entry allows anything. With credentials enabled a literal
    /// wildcard is not allowed by browsers, so the request's own origin,
    /// method and headers are mirrored back instead.
    fn build_cors_layer(&self) -> CorsLayer {
        let cors = &self.cors_config;
        if !cors.enabled {
            return CorsLayer::new();
        }

        let wildcard = |list: &[String]| list.iter().any(|v| v == "*");
        let credentials = cors.allow_credentials;

        let origin = if wildcard(&cors.origins) {
            if credentials {
                AllowOrigin::mirror_request()
            } else {
                AllowOrigin::any()
            }
        } else {
            let origins: Vec<HeaderValue> =
                cors.origins.iter().filter_map(|o| o.parse().ok()).collect();
            AllowOrigin::list(origins)
        };

        let methods = if wildcard(&cors.methods) {
            if credentials {
                AllowMethods::mirror_request()
            } else {
                AllowMethods::any()
            }
        } else {
            let methods: Vec<Method> = cors
                .methods
                .iter()
                .filter_map(|m| Method::from_bytes(m.to_uppercase().as_bytes()).ok())
                .collect();
            AllowMethods::list(methods)
        };

        let headers = if wildcard(&cors.headers) {
            if credentials {
                AllowHeaders::mirror_request()
            } else {
                AllowHeaders::any()
            }
        } else {
            let headers: Vec<HeaderName> =
                cors.headers.iter().filter_map(|h| h.parse().ok()).collect();
            AllowHeaders::list(headers)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(credentials)
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            gateway: self.gateway.clone(),
            api: self.api.clone(),
            prometheus: self.metrics.is_some(),
        };

        let mut router = Router::new()
            .route("/", get(routes::root))
            .route("/api/health", get(routes::health))
            .route("/api/logs", post(routes::index_log).get(routes::list_logs))
            .route("/api/logs/search", post(routes::search_logs))
            .route("/api/metrics", get(routes::index_metrics))
            .with_state(state);

        if let Some(handle) = self.metrics.clone() {
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        router
            .layer(self.build_cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until `shutdown` resolves. In-flight requests are drained first.
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "Server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }
}
