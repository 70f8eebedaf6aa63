//! Sync trigger and status handlers

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::info;

use super::job_helpers::bad_request;
use super::job_helpers::job_response;
use super::job_helpers::outcome_response;
use super::job_helpers::parse_network_id;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::SyncStatusResponse;
use crate::sync::SyncJob;

/// Trigger a sync (GET /sync/:network_id)
///
/// A job that is already running is returned as-is without calling `start`.
pub async fn trigger_sync(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    let network_id = match parse_network_id(&raw) {
        Ok(id) => id,
        Err(e) => return bad_request(&e),
    };
    info!("GET /sync/{}", network_id);

    if let Some(job) = state.sync_service.get_status(network_id).await {
        if job.is_running() {
            return job_response(job);
        }
    }

    outcome_response(state.sync_service.start(network_id).await)
}

/// Current or last job for a network (GET /sync/:network_id/status)
pub async fn get_sync_status(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Response {
    let network_id = match parse_network_id(&raw) {
        Ok(id) => id,
        Err(e) => return bad_request(&e),
    };

    let job = state.sync_service.get_status(network_id).await;
    (
        StatusCode::OK,
        Json(ApiResponse::success(SyncStatusResponse::new(network_id, job))),
    )
        .into_response()
}

/// Every known job (GET /sync)
pub async fn list_sync_jobs(State(state): State<AppState>) -> Json<ApiResponse<Vec<SyncJob>>> {
    Json(ApiResponse::success(state.sync_service.list_jobs().await))
}
