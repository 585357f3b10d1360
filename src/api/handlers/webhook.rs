use std::time::Instant;

use anyhow::{anyhow, Context};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use metrics::{counter, histogram};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::ingestion::pipeline::{handle_transaction, TransactionOutcome};
use crate::models::notification::raw_transaction_failed;
use crate::models::TransactionNotification;
use crate::AppState;

/// POST /webhook: one transaction notification per call.
///
/// The body is a JSON array; only its first element is processed.
/// Delivery failures towards the trading API never change the response.
pub async fn receive(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let start = Instant::now();
    counter!("webhooks_received_total").increment(1);

    let result = process(&state, &body).await;
    histogram!("webhook_latency_seconds").record(start.elapsed().as_secs_f64());

    let outcome = result?;
    tracing::debug!(?outcome, "Transaction processed");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Transaction processed" })),
    ))
}

async fn process(state: &AppState, body: &[u8]) -> Result<TransactionOutcome, AppError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidPayload(e.to_string()))?;
    let element = first_element(payload)?;

    if raw_transaction_failed(&element) {
        counter!("transactions_failed_total").increment(1);
        tracing::info!(err = %element["meta"]["err"], "Transaction failed on chain, skipping");
        return Err(AppError::TransactionFailed);
    }

    let notification: TransactionNotification =
        serde_json::from_value(element).context("malformed transaction notification")?;

    let outcome = handle_transaction(
        &notification,
        state.decoder.as_ref(),
        &state.products,
        &state.forwarder,
    )
    .await?;
    Ok(outcome)
}

fn first_element(payload: Value) -> Result<Value, AppError> {
    match payload {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Processing(anyhow!("webhook body is an empty array"))),
        other => Err(AppError::Processing(anyhow!(
            "webhook body must be an array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
