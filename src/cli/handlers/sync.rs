//! One-shot sync handler

use std::time::Duration;

use crate::cli::output::*;
use crate::sync::SyncOutcome;
use crate::sync::SyncService;
use crate::sync::SyncStatus;
use crate::AppConfig;
use crate::Result;
use crate::TokenIconError;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Trigger a sync through the coordinator and wait for it to finish
pub async fn handle_sync_command(
    config: &AppConfig,
    network_id: u64,
    timeout_secs: u64,
) -> Result<()> {
    let service = SyncService::from_config(config);

    match service.start(network_id).await {
        SyncOutcome::Started { job } | SyncOutcome::AlreadyRunning { job } => {
            print_info(&format!(
                "Sync {} for network {} started at {}",
                job.id, network_id, job.started_at
            ));
        }
        SyncOutcome::RateLimited { message, .. } => {
            print_warning(&message);
            return Ok(());
        }
    }

    let finished = tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        service.wait_until_finished(network_id, POLL_INTERVAL),
    )
    .await
    .map_err(|_| {
        TokenIconError::Custom(format!(
            "sync for network {network_id} did not finish within {timeout_secs}s"
        ))
    })?;

    let Some(job) = finished else {
        return Err(TokenIconError::Custom(format!(
            "no sync record for network {network_id}"
        )));
    };

    println!("{}", serde_json::to_string_pretty(&job)?);

    if job.status == SyncStatus::Succeeded {
        print_success(&format!("Sync for network {network_id} succeeded"));
        return Ok(());
    }

    let error = job.error.unwrap_or_else(|| "unknown error".to_string());
    print_error(&format!("Sync for network {network_id} failed: {error}"));
    Err(TokenIconError::Provider(error))
}
