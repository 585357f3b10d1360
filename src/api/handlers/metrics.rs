use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::AppState;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4";

/// GET /metrics: Prometheus scrape endpoint.
pub async fn scrape(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics_handle.run_upkeep();
    ([(CONTENT_TYPE, PROMETHEUS_TEXT)], state.metrics_handle.render())
}
