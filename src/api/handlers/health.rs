use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET /: liveness check.
pub async fn status() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "live" })))
}
