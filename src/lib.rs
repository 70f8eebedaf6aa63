//! `token-icons` - token icon server with per-network token list synchronization
//!
//! The crate serves token icons over HTTP and coordinates token list syncs
//! for many networks. For each network id it guarantees that at most one
//! sync runs at a time and that new attempts respect a cooldown.
//!
//! # Features
//!
//! - **Sync coordination**: [`sync::SyncService`] with single-flight jobs,
//!   a per-network cooldown and an in-memory job status store
//! - **Icons**: remote object store, then local directory, then a default image
//! - **HTTP API**: axum router with access logging and Prometheus metrics
//!
//! # Quick Start
//!
//! ```toml
//! [server]
//! port = 3000
//!
//! [sync]
//! cooldown_ms = 60000
//! provider_url = "http://127.0.0.1:8080"
//!
//! [storage]
//! local_dir = "tokens"
//! ```
//!
//! ```rust,no_run
//! use token_icons::sync::SyncService;
//! use token_icons::AppConfig;
//!
//! # async fn example() -> token_icons::Result<()> {
//! let config = AppConfig::load()?;
//! let service = SyncService::from_config(&config);
//!
//! let outcome = service.start(8453).await;
//! println!("rate limited: {}", outcome.is_rate_limited());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod icons;
pub mod logging;
pub mod sync;

pub use config::AppConfig;
pub use errors::*;
pub use sync::SyncService;
