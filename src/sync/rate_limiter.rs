//! Per-network cooldown limiter
//!
//! Remembers when each network last had a sync accepted and refuses new
//! attempts until the cooldown has elapsed. The check and the record happen
//! under one lock so two simultaneous callers cannot both be admitted.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Result of a limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// `remaining` is always non-zero
    Denied { remaining: Duration },
}

impl RateLimitDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Tracks the last accepted attempt per network id
#[derive(Debug, Default)]
pub struct RateLimiter {
    last_attempt: Mutex<HashMap<u64, Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit or deny an attempt for `key` at `now`, recording it when admitted
    ///
    /// An attempt exactly `cooldown` after the last accepted one is allowed.
    /// Denials leave the stored timestamp untouched.
    pub async fn check_and_record(
        &self,
        key: u64,
        cooldown: Duration,
        now: Instant,
    ) -> RateLimitDecision {
        let mut last_attempt = self.last_attempt.lock().await;

        if let Some(&last) = last_attempt.get(&key) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < cooldown {
                return RateLimitDecision::Denied {
                    remaining: cooldown - elapsed,
                };
            }
        }

        last_attempt.insert(key, now);
        RateLimitDecision::Allowed
    }

    /// Time of the last accepted attempt for `key`
    pub async fn last_attempt(&self, key: u64) -> Option<Instant> {
        self.last_attempt.lock().await.get(&key).copied()
    }
}
