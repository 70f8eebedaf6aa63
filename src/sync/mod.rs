//! Token list synchronization
//!
//! This module coordinates background synchronization jobs per network id:
//! at most one job in flight per network, a cooldown between accepted
//! attempts, and a status record that callers can poll.

pub mod provider;
pub mod rate_limiter;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use provider::HttpTokenListProvider;
pub use provider::TokenListProvider;
pub use rate_limiter::RateLimitDecision;
pub use rate_limiter::RateLimiter;
pub use service::SyncService;
pub use store::JobStatusStore;
pub use types::*;
