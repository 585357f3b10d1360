use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::dex::DecodeError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// The notified transaction failed on chain (`meta.err` set).
    #[error("Transaction failed")]
    TransactionFailed,

    #[error(transparent)]
    Processing(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidPayload(detail) => {
                tracing::warn!(error = %detail, "Rejected webhook with invalid JSON");
                (StatusCode::BAD_REQUEST, "Invalid JSON payload")
            }
            AppError::TransactionFailed => (StatusCode::BAD_REQUEST, "Transaction failed"),
            AppError::Processing(e) => {
                metrics::counter!("webhook_processing_errors_total").increment(1);
                tracing::error!("Exception during transaction processing: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Transaction failed to process",
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        AppError::Processing(e.into())
    }
}
