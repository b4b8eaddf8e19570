//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::{Encoder, TextEncoder};

use crate::registry::RegistryCheck;

use super::{
    DISPATCH_FAILURES_TOTAL, DISPATCH_LATENCY, NOTIFICATIONS_BUILT_TOTAL,
    NOTIFICATIONS_DELIVERED_TOTAL, NOTIFICATIONS_REJECTED_TOTAL, REGISTERED_TYPES,
    REGISTRY_MISMATCH_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording notification metrics
pub struct NotificationMetrics;

impl NotificationMetrics {
    /// Record a built record of the given shape
    pub fn record_built(shape: &str) {
        NOTIFICATIONS_BUILT_TOTAL.with_label_values(&[shape]).inc();
    }

    /// Record an input rejected by validation
    pub fn record_rejected() {
        NOTIFICATIONS_REJECTED_TOTAL.inc();
    }

    /// Record a record accepted by a sink
    pub fn record_delivered(sink: &str) {
        NOTIFICATIONS_DELIVERED_TOTAL.with_label_values(&[sink]).inc();
    }

    /// Record a delivery failure
    pub fn record_dispatch_failed(reason: &str) {
        DISPATCH_FAILURES_TOTAL.with_label_values(&[reason]).inc();
    }

    /// Record the outcome of a registry lookup
    pub fn record_registry_check(check: RegistryCheck) {
        let kind = match check {
            RegistryCheck::Registered => return,
            RegistryCheck::UnknownType => "type",
            RegistryCheck::UnknownVersion => "version",
        };
        REGISTRY_MISMATCH_TOTAL.with_label_values(&[kind]).inc();
    }

    /// Record remote dispatch latency
    pub fn record_dispatch_latency(elapsed: Duration) {
        DISPATCH_LATENCY.observe(elapsed.as_secs_f64());
    }

    /// Set the registered type gauge
    pub fn set_registered_types(count: usize) {
        REGISTERED_TYPES.set(count as i64);
    }
}
