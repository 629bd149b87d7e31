//! Prometheus metrics
//!
//! The relay surface answers every path, so metrics are served by the
//! exporter's own listener on `METRICS_ADDR` rather than a route. Without an
//! address no recorder is installed and the macros below are no-ops.

use std::net::SocketAddr;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

/// Install the Prometheus recorder and its scrape listener (call once at startup)
pub fn init_metrics(addr: Option<SocketAddr>) -> anyhow::Result<()> {
    let Some(addr) = addr else {
        return Ok(());
    };

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("Failed to install Prometheus exporter")?;

    register_metrics();
    info!(addr = %addr, "Prometheus exporter listening");
    Ok(())
}

fn register_metrics() {
    metrics::describe_counter!("relay_requests_total", "Total number of quote requests handled");
    metrics::describe_histogram!(
        "relay_request_duration_seconds",
        "Quote request duration in seconds"
    );
    metrics::describe_counter!("relay_tokens_processed_total", "Tokens reported by the provider");
    metrics::describe_counter!(
        "relay_schema_mismatch_total",
        "Recovered quotes that did not match the quote types"
    );
    metrics::describe_counter!(
        "relay_reference_fetch_total",
        "Reference document fetches by document and result"
    );
}

/// Record a finished relay. `outcome` is `ok` or an error kind.
pub fn record_request(outcome: &str, model: &str, duration_secs: f64) {
    metrics::counter!(
        "relay_requests_total",
        "outcome" => outcome.to_string(),
        "model" => model.to_string()
    )
    .increment(1);
    metrics::histogram!("relay_request_duration_seconds", "model" => model.to_string())
        .record(duration_secs);
}

/// Record provider token counts
pub fn record_tokens(token_type: &str, count: u64, model: &str) {
    metrics::counter!(
        "relay_tokens_processed_total",
        "type" => token_type.to_string(),
        "model" => model.to_string()
    )
    .increment(count);
}

/// Record a relayed quote that did not match the quote types
pub fn record_schema_mismatch(model: &str) {
    metrics::counter!("relay_schema_mismatch_total", "model" => model.to_string()).increment(1);
}

/// Record one reference document fetch
pub fn record_reference_fetch(document: &str, result: &str) {
    metrics::counter!(
        "relay_reference_fetch_total",
        "document" => document.to_string(),
        "result" => result.to_string()
    )
    .increment(1);
}
