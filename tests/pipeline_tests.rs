mod common;

use axum::http::StatusCode;
use rust_decimal::Decimal;

use trades_webhook::dex::{DexEvent, LogDecoder, ProductCatalog, Side};
use trades_webhook::ingestion::pipeline::{extract_trades, handle_transaction, TransactionOutcome};
use trades_webhook::ingestion::translator::event_to_trade;
use trades_webhook::models::TransactionNotification;
use trades_webhook::testing::{sample_fill, transaction_logs, webhook_body};
use trades_webhook::trading::{ForwardError, TradeForwarder};

use common::{spawn_trading_api, unreachable_url, DEX_PROGRAM};

const ACCEPTED: &str = r#"{"status":"accepted"}"#;

fn notification_with(events: &[DexEvent]) -> TransactionNotification {
    let logs = transaction_logs(&DEX_PROGRAM, events).unwrap();
    serde_json::from_value(webhook_body(&logs)[0].clone()).unwrap()
}

fn fills(n: u8) -> Vec<DexEvent> {
    (0..n)
        .map(|i| {
            DexEvent::OrderFill(sample_fill(
                i * 3,
                Side::Buy,
                Decimal::from(100 + i as i64),
                Decimal::ONE,
            ))
        })
        .collect()
}

#[tokio::test]
async fn test_all_trades_delivered() {
    let api = spawn_trading_api(StatusCode::OK, ACCEPTED).await;
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &api.url);
    let decoder = LogDecoder::new(DEX_PROGRAM);

    let outcome = handle_transaction(
        &notification_with(&fills(3)),
        &decoder,
        &ProductCatalog::default(),
        &forwarder,
    )
    .await
        .expect("Pipeline should succeed");

    assert_eq!(
        outcome,
        TransactionOutcome::Forwarded {
            delivered: 3,
            failed: 0
        }
    );

    let prices: Vec<f64> = api
        .received()
        .iter()
        .map(|t| t.body["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, vec![100.0, 101.0, 102.0]);
}

#[tokio::test]
async fn test_unreachable_api_reports_failures_but_succeeds() {
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &unreachable_url().await);
    let decoder = LogDecoder::new(DEX_PROGRAM);

    let outcome = handle_transaction(
        &notification_with(&fills(2)),
        &decoder,
        &ProductCatalog::default(),
        &forwarder,
    )
    .await
        .expect("Forwarding failures must not fail the transaction");

    assert_eq!(
        outcome,
        TransactionOutcome::Forwarded {
            delivered: 0,
            failed: 2
        }
    );
}

#[tokio::test]
async fn test_no_fills_outcome() {
    let api = spawn_trading_api(StatusCode::OK, ACCEPTED).await;
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &api.url);
    let decoder = LogDecoder::new(DEX_PROGRAM);

    let outcome = handle_transaction(
        &notification_with(&[]),
        &decoder,
        &ProductCatalog::default(),
        &forwarder,
    )
    .await
    .unwrap();

    assert_eq!(outcome, TransactionOutcome::NoFills);
    assert!(api.received().is_empty());
}

#[tokio::test]
async fn test_forward_receipt_carries_status_and_body() {
    let api = spawn_trading_api(StatusCode::CREATED, ACCEPTED).await;
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &api.url);

    let trade = event_to_trade(
        &sample_fill(1, Side::Sell, Decimal::from(10), Decimal::ONE),
        &ProductCatalog::default(),
    );
    let receipt = forwarder.forward(&trade).await.expect("Forward should succeed");

    assert_eq!(receipt.status, 201);
    assert_eq!(receipt.body["status"], "accepted");
    assert_eq!(api.received()[0].content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_forward_non_2xx_is_rejected() {
    let api = spawn_trading_api(StatusCode::BAD_REQUEST, r#"{"error":"unknown product"}"#).await;
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &api.url);

    let trade = event_to_trade(
        &sample_fill(1, Side::Buy, Decimal::ONE, Decimal::ONE),
        &ProductCatalog::default(),
    );
    let err = forwarder.forward(&trade).await.unwrap_err();

    match err {
        ForwardError::Rejected { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("unknown product"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_forward_non_json_body_is_an_error() {
    let api = spawn_trading_api(StatusCode::OK, "ok").await;
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &api.url);

    let trade = event_to_trade(
        &sample_fill(1, Side::Buy, Decimal::ONE, Decimal::ONE),
        &ProductCatalog::default(),
    );
    let err = forwarder.forward(&trade).await.unwrap_err();

    assert!(matches!(err, ForwardError::Body(_)), "got {err:?}");
    // The trade itself still reached the API
    assert_eq!(api.received().len(), 1);
}

#[tokio::test]
async fn test_forward_transport_error() {
    let forwarder = TradeForwarder::new(reqwest::Client::new(), &unreachable_url().await);

    let trade = event_to_trade(
        &sample_fill(1, Side::Buy, Decimal::ONE, Decimal::ONE),
        &ProductCatalog::default(),
    );
    let err = forwarder.forward(&trade).await.unwrap_err();

    assert!(matches!(err, ForwardError::Http(_)), "got {err:?}");
}

#[test]
fn test_extract_trades_round_trip_values() {
    let decoder = LogDecoder::new(DEX_PROGRAM);
    let event = sample_fill(5, Side::Buy, Decimal::from(10), Decimal::new(5, 1));
    let logs = transaction_logs(&DEX_PROGRAM, &[DexEvent::OrderFill(event)]).unwrap();

    let trades = extract_trades(&decoder, &ProductCatalog::default(), &logs).unwrap();

    assert_eq!(trades.len(), 1);
    let value = serde_json::to_value(&trades[0]).unwrap();
    assert_eq!(value["price"], serde_json::json!(10.0));
    assert_eq!(value["quote_size"], serde_json::json!(5.0));
    assert_eq!(value["base_size"], serde_json::json!(0.5));
    assert_eq!(value["taker_side"], "buy");
    assert!(value["maker"].is_string());
    assert!(value["taker"].is_string());
    assert!(value["product"].is_string());
}
