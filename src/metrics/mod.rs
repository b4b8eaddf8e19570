//! Prometheus metrics for the notification gateway.
//!
//! - Build metrics (records built per shape, rejected inputs)
//! - Delivery metrics (deliveries per sink, failures per reason, latency)
//! - Registry metrics (mismatches, registered types)

mod helpers;

pub use helpers::{encode_metrics, NotificationMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Histogram, IntCounter, IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "gateway";

lazy_static! {
    /// Records built, by request shape
    pub static ref NOTIFICATIONS_BUILT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_built_total", METRIC_PREFIX),
        "Total notification records built",
        &["shape"]
    ).unwrap();

    /// Inputs rejected by validation
    pub static ref NOTIFICATIONS_REJECTED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_notifications_rejected_total", METRIC_PREFIX),
        "Total notify calls rejected by validation"
    ).unwrap();

    /// Records accepted by a sink
    pub static ref NOTIFICATIONS_DELIVERED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_delivered_total", METRIC_PREFIX),
        "Total notification records accepted by a sink",
        &["sink"]
    ).unwrap();

    /// Delivery failures, by reason
    pub static ref DISPATCH_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_dispatch_failures_total", METRIC_PREFIX),
        "Total notification delivery failures",
        &["reason"]
    ).unwrap();

    /// Records whose type or version is not in the registry
    pub static ref REGISTRY_MISMATCH_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_registry_mismatch_total", METRIC_PREFIX),
        "Total records with an unregistered type or version",
        &["kind"]
    ).unwrap();

    /// Remote dispatch latency
    pub static ref DISPATCH_LATENCY: Histogram = register_histogram!(
        format!("{}_dispatch_latency_seconds", METRIC_PREFIX),
        "Remote notification dispatch latency in seconds",
        vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    ).unwrap();

    /// Number of registered notification type keys
    pub static ref REGISTERED_TYPES: IntGauge = register_int_gauge!(
        format!("{}_registered_types", METRIC_PREFIX),
        "Number of notification type keys in the registry"
    ).unwrap();
}
