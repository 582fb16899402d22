//! Metrics collection and exposition.
//!
//! # Metrics
//! - `delivery_quotes_total` (counter): quote operations by operation, outcome
//! - `delivery_match_duration_seconds` (histogram): matcher latency by deciding phase
//! - `delivery_catalog_zones` (gauge): zones in the active catalog
//! - `delivery_catalog_reloads_total` (counter): catalog reloads by result

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one estimate or confirm call.
pub fn record_quote(operation: &'static str, outcome: &'static str) {
    counter!("delivery_quotes_total", "operation" => operation, "outcome" => outcome).increment(1);
}

/// Record how long a single match took.
///
/// `phase` is the phase that decided the outcome: exact, fuzzy or no_match.
pub fn record_match(phase: &'static str, start: Instant) {
    histogram!("delivery_match_duration_seconds", "phase" => phase)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_catalog_size(zones: usize) {
    gauge!("delivery_catalog_zones").set(zones as f64);
}

/// Record a catalog reload attempt ("ok" or "error").
pub fn record_catalog_reload(result: &'static str) {
    counter!("delivery_catalog_reloads_total", "result" => result).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_histogram_labelled_by_phase() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_match("fuzzy", Instant::now());
            record_quote("estimate", "exact");
        });

        let rendered = handle.render();
        assert!(rendered.contains("delivery_match_duration_seconds"));
        assert!(rendered.contains(r#"phase="fuzzy""#), "{rendered}");
        assert!(rendered.contains(r#"operation="estimate""#), "{rendered}");
    }
}
