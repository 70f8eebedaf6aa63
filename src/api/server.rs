//! HTTP server implementation

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::metrics;
use crate::api::routes;
use crate::config::AppConfig;
use crate::Result;

/// Access log middleware to log all HTTP requests
async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::info!("→ {} {}", method, uri);

    let response = next.run(request).await;
    let duration = start.elapsed();

    if let Some(m) = metrics::get_metrics() {
        m.api_requests_total.inc();
        m.api_request_duration
            .with_label_values(&[response.status().as_str()])
            .observe(duration.as_secs_f64());
    }

    tracing::info!("← {} {}ms", response.status(), duration.as_millis());

    response
}

/// Router with logging, tracing, compression and optional CORS applied
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut app = routes::api_routes(state)
        .layer(axum::middleware::from_fn(access_log_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::debug_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("🚀 Starting token icon server...");

    match metrics::init_metrics() {
        Ok(_) => {
            info!("✅ Prometheus metrics initialized");
            info!("📊 Metrics endpoint available at: http://{host}:{port}/metrics");
        }
        Err(e) => {
            tracing::warn!("⚠️  Failed to initialize metrics: {}", e);
        }
    }

    let state = AppState::from_config(config).await?;
    info!(
        "✅ Sync service initialized (cooldown: {}ms, provider: {})",
        config.sync.cooldown_ms, config.sync.provider_url
    );

    let app = build_app(state, enable_cors);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /health                          - Health check");
    info!("  GET  /metrics                         - Prometheus metrics");
    info!("  GET  /sync                            - List sync jobs");
    info!("  GET  /sync/:network_id                - Trigger sync");
    info!("  GET  /sync/:network_id/status         - Sync status");
    info!("  GET  /icons/:network_id/:address      - Token icon");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
