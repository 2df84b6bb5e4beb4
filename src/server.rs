//! HTTP Server and Metrics Collection
//!
//! This module implements the Prometheus exporter HTTP server and the metric collection loop.
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing `/metrics`, `/health`, and `/` endpoints
//! - **Collection Loop**: Background task that periodically queries the Rubrik API and updates metrics
//! - **State Management**: The loop owns the client; handlers share the metrics registry
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /health` - Health check (returns 200 if Rubrik is reachable, 503 otherwise)
//!
//! # Error Handling
//!
//! Login failure at startup is fatal and returned to the caller. Individual API
//! failures during collection are logged as warnings and don't stop the loop.

use crate::collectors::{self, CollectionContext, CollectionStatus};
use crate::config::Config;
use crate::metrics::MetricsCollector;
use crate::rubrik::RubrikClient;
use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    metrics: MetricsCollector,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let metrics = MetricsCollector::new()?;
    let client = Arc::new(
        RubrikClient::connect(&config.rubrik)
            .await
            .context("Failed to log in to Rubrik")?,
    );

    // Start background metrics collection
    let loop_config = config.clone();
    let loop_metrics = metrics.clone();
    tokio::spawn(async move {
        collect_metrics_loop(loop_config, loop_metrics, client).await;
    });

    let app = router(AppState { metrics });

    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn collect_metrics_loop(
    config: Config,
    metrics: MetricsCollector,
    client: Arc<RubrikClient>,
) {
    let mut ticker = interval(Duration::from_secs(
        config.metrics.scrape_interval_seconds.max(1),
    ));

    loop {
        ticker.tick().await;

        let ctx = CollectionContext {
            client: &client,
            metrics: &metrics,
            config: &config.metrics,
        };

        if let Err(e) = collect_metrics(&ctx).await {
            error!("Failed to collect metrics: {}", e);
            metrics.up.set(0.0);
        } else {
            metrics.up.set(1.0);
        }
    }
}

/// Run every collector once
///
/// Returns an error only when every collector failed, which drives `rubrik_up` to 0.
pub async fn collect_metrics(ctx: &CollectionContext<'_>) -> anyhow::Result<()> {
    info!("Collecting metrics from Rubrik");

    let mut any_success = false;

    macro_rules! collect {
        ($collector:expr) => {
            match $collector.await? {
                CollectionStatus::Success => any_success = true,
                CollectionStatus::Failed => { /* Already logged */ }
            }
        };
    }

    collect!(collectors::collect_system_storage_metrics(ctx));
    collect!(collectors::collect_capacity_metrics(ctx));
    collect!(collectors::collect_stream_metrics(ctx));
    collect!(collectors::collect_physical_ingest_metrics(ctx));

    // Disabled collectors are not run and do not count towards rubrik_up
    if ctx.config.collect_vm_metrics {
        collect!(collectors::collect_vm_storage_metrics(ctx));
    }
    if ctx.config.collect_archival_metrics {
        collect!(collectors::collect_archival_metrics(ctx));
    }

    if !any_success {
        anyhow::bail!(
            "Failed to collect any metrics from Rubrik - check connectivity and credentials"
        );
    }

    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>Rubrik Exporter</title></head>
<body>
<h1>Rubrik Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(metrics) => metrics.into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.metrics.up.get() > 0.0 {
        (axum::http::StatusCode::OK, "OK")
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "Rubrik API unreachable",
        )
    }
}
