//! Metrics collection for observability
//!
//! # Metrics
//!
//! - `transfer_commits_total` - Transfers committed to the ledger
//! - `transfer_rejections_total{reason}` - Rejections by error code
//! - `transfer_pipeline_duration_seconds` - Histogram of `create_transaction` latencies

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Pipeline metrics collector
#[derive(Clone)]
pub struct Metrics {
    /// Committed transfers
    pub commits_total: IntCounter,

    /// Rejections labelled by reason
    pub rejections_total: IntCounterVec,

    /// Pipeline duration histogram
    pub pipeline_duration: Histogram,

    registry: Registry,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("commits_total", &self.commits_total.get())
            .finish_non_exhaustive()
    }
}

impl Metrics {
    /// Create new metrics collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let commits_total =
            IntCounter::new("transfer_commits_total", "Transfers committed to the ledger")?;
        registry.register(Box::new(commits_total.clone()))?;

        let rejections_total = IntCounterVec::new(
            Opts::new("transfer_rejections_total", "Rejected transfers by reason"),
            &["reason"],
        )?;
        registry.register(Box::new(rejections_total.clone()))?;

        let pipeline_duration = Histogram::with_opts(
            HistogramOpts::new(
                "transfer_pipeline_duration_seconds",
                "Histogram of create_transaction latencies",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.010, 0.050, 0.100, 0.500, 1.0]),
        )?;
        registry.register(Box::new(pipeline_duration.clone()))?;

        Ok(Self {
            commits_total,
            rejections_total,
            pipeline_duration,
            registry,
        })
    }

    /// Record commit
    pub fn record_commit(&self) {
        self.commits_total.inc();
    }

    /// Record rejection
    pub fn record_rejection(&self, reason: &str) {
        self.rejections_total.with_label_values(&[reason]).inc();
    }

    /// Record pipeline duration
    pub fn record_duration(&self, duration_seconds: f64) {
        self.pipeline_duration.observe(duration_seconds);
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render in the Prometheus text format
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&self.registry.gather(), &mut buffer) {
            tracing::warn!("Failed to encode metrics: {}", e);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
