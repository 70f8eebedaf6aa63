//! Sync coordinator
//!
//! Owns the job status store and the cooldown limiter, and guarantees that at
//! most one provider call per network is in flight. `start` never waits for the
//! provider: it records the `running` job, spawns the call, and returns.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::provider::HttpTokenListProvider;
use super::provider::TokenListProvider;
use super::rate_limiter::RateLimitDecision;
use super::rate_limiter::RateLimiter;
use super::store::JobStatusStore;
use super::types::duration_to_secs_ceil;
use super::types::SyncJob;
use super::types::SyncOutcome;
use crate::api::metrics;
use crate::config::AppConfig;

/// Outcome of trying to take the `running` slot for a network
enum Claim {
    Won(SyncJob),
    Lost(SyncJob),
}

/// Coordinates token list synchronization per network id
#[derive(Clone)]
pub struct SyncService {
    store: Arc<JobStatusStore>,
    rate_limiter: Arc<RateLimiter>,
    provider: Arc<dyn TokenListProvider>,
    cooldown: Duration,
}

impl SyncService {
    pub fn new(provider: Arc<dyn TokenListProvider>, cooldown: Duration) -> Self {
        Self {
            store: Arc::new(JobStatusStore::new()),
            rate_limiter: Arc::new(RateLimiter::new()),
            provider,
            cooldown,
        }
    }

    /// Coordinator backed by the HTTP provider described in `config`
    pub fn from_config(config: &AppConfig) -> Self {
        info!(
            "Sync coordinator using provider {} (cooldown: {}ms)",
            config.sync.provider_url, config.sync.cooldown_ms
        );
        Self::new(
            Arc::new(HttpTokenListProvider::from_config(config)),
            config.sync_cooldown(),
        )
    }

    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Current or last job for `network_id`; pure read
    pub async fn get_status(&self, network_id: u64) -> Option<SyncJob> {
        self.store.get(network_id).await
    }

    /// Every known job, ordered by network id
    pub async fn list_jobs(&self) -> Vec<SyncJob> {
        self.store.list().await
    }

    /// Launch a sync for `network_id` unless one is running or the cooldown holds
    pub async fn start(&self, network_id: u64) -> SyncOutcome {
        if let Some(job) = self.store.get(network_id).await {
            if job.is_running() {
                debug!("Sync for network {} already running ({})", network_id, job.id);
                return SyncOutcome::AlreadyRunning { job };
            }
        }

        let decision = self
            .rate_limiter
            .check_and_record(network_id, self.cooldown, Instant::now())
            .await;
        if let RateLimitDecision::Denied { remaining } = decision {
            if let Some(m) = metrics::get_metrics() {
                m.sync_rate_limited.inc();
            }
            let message = rate_limit_message(network_id, remaining);
            info!("⏳ {}", message);
            return SyncOutcome::RateLimited {
                network_id,
                remaining,
                message,
            };
        }

        match self.claim(network_id).await {
            Claim::Won(job) => {
                info!("🔄 Starting sync for network {} ({})", network_id, job.id);
                self.launch(job.clone());
                SyncOutcome::Started { job }
            }
            Claim::Lost(job) => SyncOutcome::AlreadyRunning { job },
        }
    }

    /// Poll until the job for `network_id` leaves `running`
    ///
    /// Returns `None` when the network has no record at all.
    pub async fn wait_until_finished(
        &self,
        network_id: u64,
        poll_interval: Duration,
    ) -> Option<SyncJob> {
        loop {
            match self.store.get(network_id).await {
                Some(job) if job.is_running() => tokio::time::sleep(poll_interval).await,
                other => return other,
            }
        }
    }

    async fn claim(&self, network_id: u64) -> Claim {
        let mut lost_races = 0u32;
        loop {
            let job = SyncJob::running(network_id);
            if self
                .store
                .compare_and_set_running(network_id, job.clone())
                .await
            {
                return Claim::Won(job);
            }
            lost_races += 1;

            match self.store.get(network_id).await {
                Some(current) if current.is_running() => {
                    debug!(
                        "Lost start race for network {} to job {}",
                        network_id, current.id
                    );
                    return Claim::Lost(current);
                }
                Some(current) if lost_races >= 2 => {
                    error!(
                        "compare-and-set for network {} failed {} times without a running job (latest status: {})",
                        network_id, lost_races, current.status
                    );
                    return Claim::Lost(current);
                }
                // The winner finished between our write and re-read
                _ => {}
            }
        }
    }

    fn launch(&self, job: SyncJob) {
        let store = Arc::clone(&self.store);
        let provider = Arc::clone(&self.provider);

        if let Some(m) = metrics::get_metrics() {
            m.sync_started.inc();
            m.sync_running.inc();
        }

        tokio::spawn(async move {
            let network_id = job.network_id;
            let started = std::time::Instant::now();

            // Separate task so a panicking provider still yields a record
            let call = tokio::spawn(async move { provider.synchronize(network_id).await });

            let finished = match call.await {
                Ok(Ok(summary)) => {
                    info!(
                        "✅ Sync for network {} succeeded in {}ms",
                        network_id,
                        started.elapsed().as_millis()
                    );
                    job.succeeded(summary)
                }
                Ok(Err(e)) => {
                    warn!("❌ Sync for network {} failed: {}", network_id, e);
                    job.failed(e.to_string())
                }
                Err(e) => {
                    let reason = join_error_message(e);
                    error!("Sync task for network {} aborted: {}", network_id, reason);
                    job.failed(reason)
                }
            };

            if let Some(m) = metrics::get_metrics() {
                m.sync_running.dec();
                m.sync_duration.observe(started.elapsed().as_secs_f64());
                m.sync_completed
                    .with_label_values(&[finished.status.as_str()])
                    .inc();
            }

            store.put(network_id, finished).await;
        });
    }
}

fn rate_limit_message(network_id: u64, remaining: Duration) -> String {
    format!(
        "Sync for network {network_id} was triggered recently. Please wait {} seconds before trying again.",
        duration_to_secs_ceil(remaining)
    )
}

fn join_error_message(err: JoinError) -> String {
    if err.is_panic() {
        let payload = err.into_panic();
        match panic_text(payload.as_ref()) {
            Some(text) => format!("provider task panicked: {text}"),
            None => "provider task panicked".to_string(),
        }
    } else {
        "provider task was cancelled".to_string()
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
