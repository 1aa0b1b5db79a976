use anyhow::{Context, Result};
use clap::Parser;
use logvault::{Config, ElasticsearchClient, IndexRouter, LogGateway};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod routes;
mod server;

use server::ApiServer;

#[derive(Parser, Debug)]
#[command(name = "logvault-server")]
#[command(about = "Log ingestion and search gateway for Elasticsearch")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "LOGVAULT_CONFIG", default_value = "logvault.toml")]
    config: String,

    /// Address to bind to, overrides server.bind_addr
    #[arg(long, env = "LOGVAULT_BIND")]
    bind: Option<String>,

    /// Elasticsearch base URL, overrides elasticsearch.url
    #[arg(long)]
    elasticsearch_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_create(Path::new(&args.config))
        .with_context(|| format!("loading config from {}", args.config))?;
    config.apply_env()?;
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    if let Some(url) = args.elasticsearch_url {
        config.elasticsearch.url = url;
    }

    init_tracing(&config);

    tracing::info!(
        config = %args.config,
        elasticsearch = %config.elasticsearch.url,
        index_prefix = %config.elasticsearch.index_prefix,
        "Starting logvault server"
    );

    let metrics = if config.observability.metrics_enabled {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .install_recorder()
            .context("installing Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    let client = ElasticsearchClient::new(
        &config.elasticsearch.url,
        config.elasticsearch.request_timeout(),
    )?;
    let gateway = Arc::new(LogGateway::new(
        Arc::new(client),
        IndexRouter::new(config.elasticsearch.index_prefix.clone()),
    ));

    // A failed template install is logged inside and does not stop startup
    gateway.initialize().await;

    let mut server = ApiServer::new(
        gateway.clone(),
        config.api.clone(),
        config.server.cors.clone(),
    );
    if let Some(handle) = metrics {
        server = server.with_metrics(handle);
    }

    let served = server
        .serve(&config.server.bind_addr, shutdown_signal())
        .await;

    gateway.close().await;
    served.with_context(|| format!("serving on {}", config.server.bind_addr))?;

    Ok(())
}

/// RUST_LOG takes precedence over observability.log_level.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
