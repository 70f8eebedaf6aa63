//! API route definitions

use axum::routing::get;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the HTTP router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Prometheus metrics
        .route("/metrics", get(handlers::get_metrics))
        // Sync coordination
        .route("/sync", get(handlers::list_sync_jobs))
        .route("/sync/:network_id", get(handlers::trigger_sync))
        .route("/sync/:network_id/status", get(handlers::get_sync_status))
        // Token icons
        .route("/icons/:network_id/:address", get(handlers::get_icon))
        .with_state(state)
}
