//! Helper functions for sync job handlers
//!
//! Path validation and the mapping from coordinator outcomes to HTTP
//! responses live here so the handlers stay thin.

use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::RateLimitedResponse;
use crate::sync::types::duration_to_ms;
use crate::sync::types::duration_to_secs_ceil;
use crate::sync::SyncJob;
use crate::sync::SyncOutcome;
use crate::Result;
use crate::TokenIconError;

/// Parse a path segment as a network id (plain non-negative decimal)
pub fn parse_network_id(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenIconError::InvalidNetworkId(raw.to_string()));
    }
    raw.parse::<u64>()
        .map_err(|_| TokenIconError::InvalidNetworkId(raw.to_string()))
}

/// 400 with the error message in the standard envelope
pub fn bad_request(err: &TokenIconError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error(err.to_string())),
    )
        .into_response()
}

/// 200 with the job record
pub fn job_response(job: SyncJob) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(job))).into_response()
}

/// Map a coordinator outcome to its HTTP response
pub fn outcome_response(outcome: SyncOutcome) -> Response {
    match outcome {
        SyncOutcome::Started { job } | SyncOutcome::AlreadyRunning { job } => job_response(job),
        SyncOutcome::RateLimited {
            network_id,
            remaining,
            message,
        } => (
            StatusCode::TOO_MANY_REQUESTS,
            [(
                header::RETRY_AFTER,
                duration_to_secs_ceil(remaining).to_string(),
            )],
            Json(RateLimitedResponse {
                rate_limited: true,
                network_id,
                remaining_time: duration_to_ms(remaining),
                message,
            }),
        )
            .into_response(),
    }
}
