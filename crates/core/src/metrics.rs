//! Metrics definitions for connection resolution.
//!
//! Metrics are collected using the `metrics` crate and can be exported
//! to Prometheus via `metrics-exporter-prometheus`.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

use crate::models::EntityKind;

/// Initialize all metric descriptions.
/// Call this once at startup before any metrics are recorded.
pub fn init_metrics() {
    describe_counter!(
        "connections_resolved_total",
        "Total number of connection fields successfully resolved"
    );
    describe_counter!(
        "pagination_errors_total",
        "Total number of connection fields rejected during ordering or pagination"
    );
    describe_histogram!(
        "connection_resolve_duration_seconds",
        "Time taken to order and paginate a connection in seconds"
    );
}

/// Record a successfully resolved connection.
pub fn record_connection_resolved(kind: EntityKind) {
    counter!("connections_resolved_total", "kind" => kind.as_str()).increment(1);
}

/// Record a rejected connection.
///
/// # Arguments
/// * `kind` - Entity kind listed by the connection
/// * `code` - Error code (e.g. "INVALID_CURSOR")
pub fn record_pagination_error(kind: EntityKind, code: &'static str) {
    counter!("pagination_errors_total", "kind" => kind.as_str(), "code" => code).increment(1);
}

/// Record connection resolution duration.
pub fn record_resolve_duration(kind: EntityKind, duration_secs: f64) {
    histogram!("connection_resolve_duration_seconds", "kind" => kind.as_str()).record(duration_secs);
}

/// A timer that automatically records duration when dropped.
pub struct ResolveTimer {
    kind: EntityKind,
    start: Instant,
}

impl ResolveTimer {
    /// Start a new resolution timer.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            start: Instant::now(),
        }
    }
}

impl Drop for ResolveTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_resolve_duration(self.kind, duration);
    }
}
