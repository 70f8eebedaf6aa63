/// API request handlers
use std::sync::Arc;

use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::config::AppConfig;
use crate::icons::IconResolver;
use crate::sync::SyncService;

pub mod icons;
pub mod job_helpers;
pub mod metrics;
pub mod sync;

pub use icons::*;
pub use metrics::*;
pub use sync::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sync_service: SyncService,
    pub icon_resolver: Arc<IconResolver>,
}

impl AppState {
    /// Build every service the handlers need from configuration
    pub async fn from_config(config: &AppConfig) -> crate::Result<Self> {
        Ok(Self {
            config: Arc::new(config.clone()),
            sync_service: SyncService::from_config(config),
            icon_resolver: Arc::new(IconResolver::from_config(config).await?),
        })
    }
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
