//! Prometheus metrics for token icon monitoring
//!
//! This module exports metrics for:
//! - Sync job starts, completions and rate-limit rejections
//! - Icon lookups by serving tier
//! - API request counts and latency

use std::sync::Arc;
use std::sync::Mutex;

use prometheus::Counter;
use prometheus::CounterVec;
use prometheus::Encoder;
use prometheus::Gauge;
use prometheus::Histogram;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::Opts;
use prometheus::Registry;
use prometheus::TextEncoder;

/// Metrics registry and collectors
pub struct Metrics {
    pub registry: Registry,

    // Sync metrics
    pub sync_started: Counter,
    pub sync_completed: CounterVec,
    pub sync_rate_limited: Counter,
    pub sync_running: Gauge,
    pub sync_duration: Histogram,

    // Icon metrics
    pub icon_requests: CounterVec,

    // API metrics
    pub api_requests_total: Counter,
    pub api_request_duration: HistogramVec,
}

impl Metrics {
    /// Create a new metrics instance with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let sync_started = Counter::with_opts(Opts::new(
            "token_icons_sync_started_total",
            "Total number of sync jobs launched",
        ))?;

        let sync_completed = CounterVec::new(
            Opts::new(
                "token_icons_sync_completed_total",
                "Total number of finished sync jobs by final status",
            ),
            &["status"],
        )?;

        let sync_rate_limited = Counter::with_opts(Opts::new(
            "token_icons_sync_rate_limited_total",
            "Total number of sync requests rejected by the cooldown",
        ))?;

        let sync_running = Gauge::with_opts(Opts::new(
            "token_icons_sync_running",
            "Number of sync jobs currently running",
        ))?;

        let sync_duration = Histogram::with_opts(
            HistogramOpts::new(
                "token_icons_sync_duration_seconds",
                "Wall time of provider synchronization calls",
            )
            .buckets(vec![0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0]),
        )?;

        let icon_requests = CounterVec::new(
            Opts::new(
                "token_icons_icon_requests_total",
                "Icon lookups by the tier that served them",
            ),
            &["source"],
        )?;

        let api_requests_total = Counter::with_opts(Opts::new(
            "token_icons_api_requests_total",
            "Total number of API requests",
        ))?;

        let api_request_duration = HistogramVec::new(
            HistogramOpts::new(
                "token_icons_api_request_duration_seconds",
                "API request duration by response status",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["status"],
        )?;

        registry.register(Box::new(sync_started.clone()))?;
        registry.register(Box::new(sync_completed.clone()))?;
        registry.register(Box::new(sync_rate_limited.clone()))?;
        registry.register(Box::new(sync_running.clone()))?;
        registry.register(Box::new(sync_duration.clone()))?;
        registry.register(Box::new(icon_requests.clone()))?;
        registry.register(Box::new(api_requests_total.clone()))?;
        registry.register(Box::new(api_request_duration.clone()))?;

        Ok(Self {
            registry,
            sync_started,
            sync_completed,
            sync_rate_limited,
            sync_running,
            sync_duration,
            icon_requests,
            api_requests_total,
            api_request_duration,
        })
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

// Global metrics instance
lazy_static::lazy_static! {
    pub static ref METRICS: Mutex<Option<Arc<Metrics>>> = Mutex::new(None);
}

/// Initialize metrics, reusing the existing instance if already set up
pub fn init_metrics() -> Result<Arc<Metrics>, prometheus::Error> {
    let mut slot = METRICS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(existing) = slot.as_ref() {
        return Ok(Arc::clone(existing));
    }
    let metrics = Arc::new(Metrics::new()?);
    *slot = Some(metrics.clone());
    Ok(metrics)
}

/// Get metrics instance
pub fn get_metrics() -> Option<Arc<Metrics>> {
    METRICS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .map(Arc::clone)
}
