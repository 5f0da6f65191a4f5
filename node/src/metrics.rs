//! # Prometheus Metrics
//!
//! Operational metrics for the ledger node, scraped at the `/metrics`
//! HTTP endpoint on the configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so
//! they do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// Clone-friendly (wraps `Arc` internally via prometheus handles) so it
/// can be shared across request handlers.
#[derive(Clone)]
pub struct NodeMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Current chain height (block count).
    pub chain_height: IntGauge,
    /// Total number of blocks successfully appended.
    pub blocks_appended_total: IntCounter,
    /// Total number of ownership challenges issued.
    pub challenges_issued_total: IntCounter,
    /// Total number of star submissions rejected (any reason).
    pub submissions_rejected_total: IntCounter,
    /// Histogram of star submission handling latency in seconds. Dominated
    /// by the O(n) full-chain validation inside append, so this is also
    /// the metric that shows the deliberate scalability ceiling.
    pub submission_latency_seconds: Histogram,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("astra".into()), None)
            .expect("failed to create prometheus registry");

        let chain_height = IntGauge::new("chain_height", "Current number of blocks in the chain")
            .expect("metric creation");
        registry
            .register(Box::new(chain_height.clone()))
            .expect("metric registration");

        let blocks_appended_total = IntCounter::new(
            "blocks_appended_total",
            "Total number of blocks successfully appended",
        )
        .expect("metric creation");
        registry
            .register(Box::new(blocks_appended_total.clone()))
            .expect("metric registration");

        let challenges_issued_total = IntCounter::new(
            "challenges_issued_total",
            "Total number of ownership challenges issued",
        )
        .expect("metric creation");
        registry
            .register(Box::new(challenges_issued_total.clone()))
            .expect("metric registration");

        let submissions_rejected_total = IntCounter::new(
            "submissions_rejected_total",
            "Total number of star submissions rejected",
        )
        .expect("metric creation");
        registry
            .register(Box::new(submissions_rejected_total.clone()))
            .expect("metric registration");

        let submission_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "submission_latency_seconds",
                "Star submission handling latency in seconds",
            )
            .buckets(vec![
                0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
            ]),
        )
        .expect("metric creation");
        registry
            .register(Box::new(submission_latency_seconds.clone()))
            .expect("metric registration");

        Self {
            registry,
            chain_height,
            blocks_appended_total,
            challenges_issued_total,
            submissions_rejected_total,
            submission_latency_seconds,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition
    /// format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).expect("prometheus output is valid utf-8"))
    }
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails (should never happen in practice).
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_register_and_encode() {
        let metrics = NodeMetrics::new();
        metrics.chain_height.set(3);
        metrics.blocks_appended_total.inc();
        metrics.submissions_rejected_total.inc_by(2);

        let body = metrics.encode().expect("encodes");
        assert!(body.contains("astra_chain_height 3"));
        assert!(body.contains("astra_blocks_appended_total 1"));
        assert!(body.contains("astra_submissions_rejected_total 2"));
    }
}
