//! In-memory job status store keyed by network id

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::types::SyncJob;

/// Current or most recent job record for every network that has been synced
#[derive(Debug, Default)]
pub struct JobStatusStore {
    jobs: RwLock<HashMap<u64, SyncJob>>,
}

impl JobStatusStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: u64) -> Option<SyncJob> {
        self.jobs.read().await.get(&key).cloned()
    }

    pub async fn put(&self, key: u64, job: SyncJob) {
        self.jobs.write().await.insert(key, job);
    }

    /// Store `job` only when nothing for `key` is currently running
    ///
    /// Returns `false` without touching the store when a running record exists.
    pub async fn compare_and_set_running(&self, key: u64, job: SyncJob) -> bool {
        let mut jobs = self.jobs.write().await;
        if jobs.get(&key).is_some_and(SyncJob::is_running) {
            return false;
        }
        jobs.insert(key, job);
        true
    }

    /// All records ordered by network id
    pub async fn list(&self) -> Vec<SyncJob> {
        let mut jobs: Vec<SyncJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by_key(|job| job.network_id);
        jobs
    }
}
