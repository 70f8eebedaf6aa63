//! Coordinator tests with scripted providers

mod service_tests;

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use crate::sync::SyncJob;
use crate::sync::SyncService;
use crate::sync::TokenListProvider;
use crate::Result;
use crate::TokenIconError;

#[derive(Clone)]
pub(crate) enum Behavior {
    Succeed(Value),
    Fail(String),
    Panic,
}

/// Provider that counts calls and can be held open until released
pub(crate) struct ScriptedProvider {
    behavior: Behavior,
    calls: AtomicUsize,
    gate: watch::Receiver<bool>,
    release: watch::Sender<bool>,
}

impl ScriptedProvider {
    /// Completes as soon as it is called
    pub(crate) fn immediate(behavior: Behavior) -> Arc<Self> {
        Self::build(behavior, true)
    }

    /// Blocks every call until `release` is invoked
    pub(crate) fn gated(behavior: Behavior) -> Arc<Self> {
        Self::build(behavior, false)
    }

    fn build(behavior: Behavior, open: bool) -> Arc<Self> {
        let (release, gate) = watch::channel(open);
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            gate,
            release,
        })
    }

    pub(crate) fn release(&self) {
        let _ = self.release.send(true);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenListProvider for ScriptedProvider {
    async fn synchronize(&self, network_id: u64) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut gate = self.gate.clone();
        let _ = gate.wait_for(|open| *open).await;

        match &self.behavior {
            Behavior::Succeed(summary) => Ok(summary.clone()),
            Behavior::Fail(reason) => Err(TokenIconError::Provider(format!(
                "{reason} (network {network_id})"
            ))),
            Behavior::Panic => panic!("token list for network {network_id} is corrupt"),
        }
    }
}

/// Let spawned provider tasks run until `network_id` leaves `running`
///
/// Only yields, so a paused clock does not move.
pub(crate) async fn settle(service: &SyncService, network_id: u64) -> SyncJob {
    for _ in 0..10_000 {
        match service.get_status(network_id).await {
            Some(job) if !job.is_running() => return job,
            _ => tokio::task::yield_now().await,
        }
    }
    panic!("sync for network {network_id} never finished");
}
