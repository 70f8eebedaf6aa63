//! Tests for the sync coordinator state machine

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::settle;
use super::Behavior;
use super::ScriptedProvider;
use crate::sync::SyncOutcome;
use crate::sync::SyncService;
use crate::sync::SyncStatus;

const COOLDOWN: Duration = Duration::from_secs(60);

fn summary() -> serde_json::Value {
    json!({"tokens": 42, "imagesUpdated": 40})
}

#[tokio::test]
async fn test_first_start_reports_running_immediately() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    let outcome = service.start(8453).await;
    let job = match outcome {
        SyncOutcome::Started { job } => job,
        other => panic!("expected Started, got {other:?}"),
    };
    assert_eq!(job.status, SyncStatus::Running);
    assert_eq!(job.network_id, 8453);
    assert!(job.finished_at.is_none());

    let status = service.get_status(8453).await.unwrap();
    assert_eq!(status.status, SyncStatus::Running);
    assert_eq!(status.id, job.id);

    provider.release();
}

#[tokio::test]
async fn test_second_start_while_running_is_already_running() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    let first = service.start(8453).await;
    let second = service.start(8453).await;

    let first_id = first.job().unwrap().id;
    match second {
        SyncOutcome::AlreadyRunning { job } => {
            assert_eq!(job.id, first_id);
            assert_eq!(job.status, SyncStatus::Running);
        }
        other => panic!("expected AlreadyRunning, got {other:?}"),
    }

    provider.release();
    settle(&service, 8453).await;
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_successful_provider_marks_job_succeeded() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    let started = service.start(8453).await;
    provider.release();
    let job = settle(&service, 8453).await;

    assert_eq!(job.id, started.job().unwrap().id);
    assert_eq!(job.status, SyncStatus::Succeeded);
    assert!(job.finished_at.is_some());
    assert!(job.finished_at.unwrap() >= job.started_at);
    assert_eq!(job.result, Some(summary()));
    assert!(job.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cooldown_reports_remaining_time_then_allows() {
    let provider = ScriptedProvider::immediate(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    assert!(matches!(service.start(1).await, SyncOutcome::Started { .. }));
    settle(&service, 1).await;

    tokio::time::advance(Duration::from_secs(30)).await;
    let outcome = service.start(1).await;
    match &outcome {
        SyncOutcome::RateLimited {
            network_id,
            remaining,
            message,
        } => {
            assert_eq!(*network_id, 1);
            assert_eq!(*remaining, Duration::from_secs(30));
            assert!(message.contains("network 1"));
            assert!(message.contains("30 seconds"));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
    assert_eq!(outcome.remaining_ms(), Some(30_000));

    // A denial does not touch the job record
    assert_eq!(
        service.get_status(1).await.unwrap().status,
        SyncStatus::Succeeded
    );

    tokio::time::advance(Duration::from_secs(31)).await;
    assert!(matches!(service.start(1).await, SyncOutcome::Started { .. }));
    settle(&service, 1).await;
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_start_exactly_at_cooldown_expiry_is_allowed() {
    let provider = ScriptedProvider::immediate(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    service.start(56).await;
    settle(&service, 56).await;

    tokio::time::advance(COOLDOWN - Duration::from_millis(1)).await;
    assert_eq!(service.start(56).await.remaining_ms(), Some(1));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(matches!(service.start(56).await, SyncOutcome::Started { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_back_to_back_starts_are_rate_limited_within_bounds() {
    let provider = ScriptedProvider::immediate(Behavior::Succeed(summary()));
    let service = SyncService::new(provider, COOLDOWN);

    for network_id in [1u64, 10, 137, 8453] {
        service.start(network_id).await;
        settle(&service, network_id).await;

        tokio::time::advance(Duration::from_millis(250)).await;
        let remaining = service
            .start(network_id)
            .await
            .remaining_ms()
            .expect("second start should be rate limited");
        assert!(remaining > 0);
        assert!(remaining <= 60_000);
    }
}

#[tokio::test]
async fn test_provider_failure_is_recorded_and_consumes_slot() {
    let provider = ScriptedProvider::immediate(Behavior::Fail("token list fetch failed".into()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    let outcome = service.start(10).await;
    assert!(matches!(outcome, SyncOutcome::Started { .. }));

    let job = settle(&service, 10).await;
    assert_eq!(job.status, SyncStatus::Failed);
    assert!(job.finished_at.is_some());
    assert!(job.result.is_none());
    let error = job.error.unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("token list fetch failed"));

    assert!(service.start(10).await.is_rate_limited());
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_panicking_provider_is_recorded_as_failed() {
    let provider = ScriptedProvider::immediate(Behavior::Panic);
    let service = SyncService::new(provider, COOLDOWN);

    service.start(42).await;
    let job = settle(&service, 42).await;

    assert_eq!(job.status, SyncStatus::Failed);
    let error = job.error.unwrap();
    assert!(error.starts_with("provider task panicked"));
    assert!(error.contains("corrupt"));
}

#[tokio::test(start_paused = true)]
async fn test_already_running_does_not_consume_cooldown() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    service.start(1).await;
    tokio::time::advance(Duration::from_secs(50)).await;
    assert!(matches!(
        service.start(1).await,
        SyncOutcome::AlreadyRunning { .. }
    ));

    provider.release();
    settle(&service, 1).await;

    // 60s after the accepted start, not after the AlreadyRunning call
    tokio::time::advance(Duration::from_secs(10)).await;
    assert!(matches!(service.start(1).await, SyncOutcome::Started { .. }));
}

#[tokio::test]
async fn test_networks_do_not_affect_each_other() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    assert!(matches!(service.start(1).await, SyncOutcome::Started { .. }));
    assert!(service.get_status(2).await.is_none());
    assert!(matches!(service.start(2).await, SyncOutcome::Started { .. }));

    provider.release();
    settle(&service, 1).await;
    settle(&service, 2).await;

    assert!(service.start(1).await.is_rate_limited());
    assert!(matches!(service.start(3).await, SyncOutcome::Started { .. }));
    assert_eq!(service.get_status(2).await.unwrap().status, SyncStatus::Succeeded);
}

#[tokio::test]
async fn test_get_status_is_idempotent() {
    let provider = ScriptedProvider::immediate(Behavior::Succeed(summary()));
    let service = SyncService::new(provider, COOLDOWN);

    assert!(service.get_status(7).await.is_none());
    assert!(service.get_status(7).await.is_none());

    service.start(7).await;
    settle(&service, 7).await;

    let a = service.get_status(7).await;
    let b = service.get_status(7).await;
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_failed_job_can_be_restarted_after_cooldown() {
    let provider = ScriptedProvider::immediate(Behavior::Fail("upstream 502".into()));
    let service = SyncService::new(provider.clone(), Duration::ZERO);

    let first = service.start(5).await.job().unwrap().id;
    assert_eq!(settle(&service, 5).await.status, SyncStatus::Failed);

    let second = service.start(5).await;
    let second_id = match second {
        SyncOutcome::Started { job } => job.id,
        other => panic!("expected Started, got {other:?}"),
    };
    assert_ne!(first, second_id);
    settle(&service, 5).await;
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_list_jobs_returns_every_network() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = SyncService::new(provider.clone(), COOLDOWN);

    for network_id in [8453u64, 1, 10] {
        service.start(network_id).await;
    }

    let jobs = service.list_jobs().await;
    let ids: Vec<u64> = jobs.iter().map(|j| j.network_id).collect();
    assert_eq!(ids, vec![1, 10, 8453]);
    assert!(jobs.iter().all(|j| j.status == SyncStatus::Running));

    provider.release();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_starts_launch_exactly_one_job() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    // Zero cooldown leaves the store as the only guard
    let service = SyncService::new(provider.clone(), Duration::ZERO);

    let mut handles = Vec::new();
    for _ in 0..32 {
        let service = service.clone();
        handles.push(tokio::spawn(async move { service.start(8453).await }));
    }

    let mut started = 0;
    let mut ids = HashSet::new();
    for handle in handles {
        match handle.await.unwrap() {
            SyncOutcome::Started { job } => {
                started += 1;
                ids.insert(job.id);
            }
            SyncOutcome::AlreadyRunning { job } => {
                assert!(job.is_running());
                ids.insert(job.id);
            }
            SyncOutcome::RateLimited { .. } => panic!("zero cooldown must never rate limit"),
        }
    }

    assert_eq!(started, 1);
    assert_eq!(ids.len(), 1);

    provider.release();
    settle(&service, 8453).await;
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_starts_with_cooldown_never_double_launch() {
    let provider = ScriptedProvider::gated(Behavior::Succeed(summary()));
    let service = Arc::new(SyncService::new(provider.clone(), COOLDOWN));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.start(1).await })
        })
        .collect();

    let mut started = 0;
    for handle in handles {
        if let SyncOutcome::Started { .. } = handle.await.unwrap() {
            started += 1;
        }
    }
    assert_eq!(started, 1);

    provider.release();
    settle(&service, 1).await;
    assert_eq!(provider.calls(), 1);
}
