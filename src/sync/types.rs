//! Job records and coordinator outcomes

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Lifecycle state of a network's synchronization job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Never run; only reported for networks without a record
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl SyncStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status snapshot for one synchronization attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncJob {
    pub id: Uuid,
    pub network_id: u64,
    pub status: SyncStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Opaque summary returned by the provider on success
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl SyncJob {
    /// Fresh `running` record stamped with the current time
    #[must_use]
    pub fn running(network_id: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            network_id,
            status: SyncStatus::Running,
            started_at: Utc::now(),
            finished_at: None,
            result: None,
            error: None,
        }
    }

    #[must_use]
    pub fn succeeded(mut self, result: Value) -> Self {
        self.status = SyncStatus::Succeeded;
        self.finished_at = Some(Utc::now());
        self.result = Some(result);
        self.error = None;
        self
    }

    #[must_use]
    pub fn failed(mut self, error: impl Into<String>) -> Self {
        self.status = SyncStatus::Failed;
        self.finished_at = Some(Utc::now());
        self.result = None;
        self.error = Some(error.into());
        self
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == SyncStatus::Running
    }
}

/// What a call to `SyncService::start` did
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// A new run was launched; the job is already `running` in the store
    Started { job: SyncJob },
    /// A run for this network was in flight; nothing was launched
    AlreadyRunning { job: SyncJob },
    /// The cooldown for this network has not elapsed
    RateLimited {
        network_id: u64,
        remaining: Duration,
        message: String,
    },
}

impl SyncOutcome {
    /// Job snapshot for `Started` and `AlreadyRunning`
    #[must_use]
    pub const fn job(&self) -> Option<&SyncJob> {
        match self {
            Self::Started { job } | Self::AlreadyRunning { job } => Some(job),
            Self::RateLimited { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Remaining cooldown in whole milliseconds, never zero
    #[must_use]
    pub fn remaining_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { remaining, .. } => Some(duration_to_ms(*remaining)),
            _ => None,
        }
    }
}

/// Milliseconds, clamped to at least 1 so a denial never reports "0ms left"
#[must_use]
pub fn duration_to_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX).max(1)
}

/// Whole seconds rounded up, for messages and `Retry-After`
#[must_use]
pub fn duration_to_secs_ceil(d: Duration) -> u64 {
    duration_to_ms(d).div_ceil(1000)
}
