//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::sync::SyncJob;
use crate::sync::SyncStatus;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body of `GET /sync/:network_id/status`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusResponse {
    pub network_id: u64,
    /// `idle` when the network has never been synced
    pub status: SyncStatus,
    pub job: Option<SyncJob>,
}

impl SyncStatusResponse {
    #[must_use]
    pub fn new(network_id: u64, job: Option<SyncJob>) -> Self {
        Self {
            network_id,
            status: job.as_ref().map_or(SyncStatus::Idle, |j| j.status),
            job,
        }
    }
}

/// Body of a 429 from `GET /sync/:network_id`
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedResponse {
    pub rate_limited: bool,
    pub network_id: u64,
    /// Milliseconds until the next attempt is accepted
    pub remaining_time: u64,
    pub message: String,
}
