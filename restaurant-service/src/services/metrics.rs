//! Metrics collection and Prometheus export.

use crate::services::GradeUpdateOutcome;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Must run once at startup, before any metric is recorded. Panics if called
/// more than once.
pub fn init_metrics() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_grade_update(outcome: GradeUpdateOutcome) {
    counter!("restaurant_grade_updates_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_query_results(query: &'static str, rows: usize) {
    counter!("restaurant_query_results_total", "query" => query).increment(rows as u64);
}
