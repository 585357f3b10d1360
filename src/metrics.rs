use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("webhooks_received_total").absolute(0);
    counter!("transactions_failed_total").absolute(0);
    counter!("fill_events_total").absolute(0);
    counter!("trades_forwarded_total").absolute(0);
    counter!("trades_forward_failed_total").absolute(0);
    counter!("webhook_processing_errors_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("webhook_latency_seconds").record(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally.
///
/// For tests and tools that build an `AppState` more than once per process;
/// `install_recorder` only succeeds once.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
