use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::status))
        .route("/webhook", post(handlers::webhook::receive))
        .route("/metrics", get(handlers::metrics::scrape))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
