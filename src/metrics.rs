// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the pod DNS source.
//!
//! All metrics use the namespace prefix `pod_dns_source_`.
//!
//! # Example
//!
//! ```rust,no_run
//! use pod_dns_source::metrics::{gather_metrics, record_resolution_error};
//!
//! record_resolution_error("pod_list_failed", std::time::Duration::from_millis(3));
//! let text = gather_metrics().unwrap();
//! ```

use crate::constants::METRICS_NAMESPACE;
use crate::endpoint::{Endpoint, RecordType};
use prometheus::{
    CounterVec, Encoder, GaugeVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Resolution Metrics
// ============================================================================

/// Total number of resolution passes by outcome
///
/// Labels:
/// - `status`: Outcome (`success`, `error`)
pub static RESOLUTIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_resolutions_total"),
        "Total number of endpoint resolution passes by status",
    );
    let counter = CounterVec::new(opts, &["status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of resolution passes in seconds
pub static RESOLUTION_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_resolution_duration_seconds"),
        "Duration of endpoint resolution passes in seconds",
    )
    .buckets(vec![0.0001, 0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]);
    let histogram = Histogram::with_opts(opts).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Endpoint Metrics
// ============================================================================

/// Endpoints produced by the last successful pass
///
/// Labels:
/// - `record_type`: `A` or `AAAA`
pub static ENDPOINTS: LazyLock<GaugeVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_endpoints"),
        "Number of endpoints produced by the last resolution pass",
    );
    let gauge = GaugeVec::new(opts, &["record_type"]).unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

/// Targets produced by the last successful pass
///
/// Labels:
/// - `record_type`: `A` or `AAAA`
pub static TARGETS: LazyLock<GaugeVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_targets"),
        "Number of endpoint targets produced by the last resolution pass",
    );
    let gauge = GaugeVec::new(opts, &["record_type"]).unwrap();
    METRICS_REGISTRY.register(Box::new(gauge.clone())).unwrap();
    gauge
});

// ============================================================================
// Error Metrics
// ============================================================================

/// Total number of errors by type
///
/// Labels:
/// - `error_type`: Stable error identifier (e.g., `pod_list_failed`)
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of errors by type",
    );
    let counter = CounterVec::new(opts, &["error_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a successful resolution pass and the endpoints it produced
pub fn record_resolution_success(duration: Duration, endpoints: &[Endpoint]) {
    RESOLUTIONS_TOTAL.with_label_values(&["success"]).inc();
    RESOLUTION_DURATION_SECONDS.observe(duration.as_secs_f64());

    for record_type in [RecordType::A, RecordType::AAAA] {
        let (endpoint_count, target_count) = endpoints
            .iter()
            .filter(|endpoint| endpoint.record_type == record_type)
            .fold((0usize, 0usize), |(endpoints, targets), endpoint| {
                (endpoints + 1, targets + endpoint.targets.len())
            });

        ENDPOINTS
            .with_label_values(&[record_type.as_str()])
            .set(endpoint_count as f64);
        TARGETS
            .with_label_values(&[record_type.as_str()])
            .set(target_count as f64);
    }
}

/// Record a failed resolution pass
pub fn record_resolution_error(error_type: &str, duration: Duration) {
    RESOLUTIONS_TOTAL.with_label_values(&["error"]).inc();
    RESOLUTION_DURATION_SECONDS.observe(duration.as_secs_f64());
    record_error(error_type);
}

/// Record an error by type
pub fn record_error(error_type: &str) {
    ERRORS_TOTAL.with_label_values(&[error_type]).inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Returns
/// Prometheus-formatted metrics as a String
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
