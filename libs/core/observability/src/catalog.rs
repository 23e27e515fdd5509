//! Catalog operation metrics.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

/// Catalog metrics recorder
pub struct CatalogMetrics;

impl CatalogMetrics {
    /// Record a finished write (create, update, delete) and its latency.
    pub fn record_write(operation: &'static str, succeeded: bool, duration_secs: f64) {
        let status = if succeeded { "ok" } else { "failed" };
        counter!("catalog_writes_total", "operation" => operation, "status" => status).increment(1);
        histogram!("catalog_operation_duration_seconds", "operation" => operation)
            .record(duration_secs);
    }

    /// Record a read and its latency.
    pub fn record_read(operation: &'static str, duration_secs: f64) {
        histogram!("catalog_operation_duration_seconds", "operation" => operation)
            .record(duration_secs);
    }

    /// Record the size of the last listing page and the live product total.
    pub fn record_listing(returned: usize, total_count: u64) {
        histogram!("catalog_listed_products").record(returned as f64);
        gauge!("catalog_live_products").set(total_count as f64);

        tracing::debug!(returned, total_count, "Listed aggregate products");
    }

    /// Count a failed operation by error kind (`not_found`, `conflict`, ...).
    pub fn record_error(kind: &'static str) {
        counter!("catalog_errors_total", "kind" => kind).increment(1);
    }
}

pub(crate) fn describe_metrics() {
    describe_counter!("catalog_writes_total", "Catalog writes by operation and status");
    describe_histogram!(
        "catalog_operation_duration_seconds",
        "Catalog operation latency in seconds"
    );
    describe_histogram!("catalog_listed_products", "Products returned per listing page");
    describe_gauge!("catalog_live_products", "Live products seen by the last listing");
    describe_counter!("catalog_errors_total", "Failed catalog operations by error kind");
}
