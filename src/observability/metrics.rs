//! Metrics collection and exposition.
//!
//! # Metrics
//! - `producer_numbers_served_total` (counter): numbers handed out
//! - `consumer_polls_total` (counter): poll iterations by outcome
//! - `consumer_fetch_duration_seconds` (histogram): fetch latency
//!
//! Updates are no-ops until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_number_served() {
    ::metrics::counter!("producer_numbers_served_total").increment(1);
}

/// Record one consumer iteration. `outcome` is a low-cardinality label.
pub fn record_poll(outcome: &'static str, started: Instant) {
    ::metrics::counter!("consumer_polls_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("consumer_fetch_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}
