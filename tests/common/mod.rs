use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use trades_webhook::api::router::create_router;
use trades_webhook::dex::{DecodeError, DexEvent, EventDecoder, LogDecoder, ProductCatalog, Pubkey};
use trades_webhook::trading::TradeForwarder;
use trades_webhook::AppState;

/// Program id used by every test decoder.
#[allow(dead_code)]
pub const DEX_PROGRAM: Pubkey = Pubkey::new([42; 32]);

/// One `/process-trade` call as seen by the stub trading API.
#[derive(Debug, Clone)]
pub struct ReceivedTrade {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    received: Arc<Mutex<Vec<ReceivedTrade>>>,
    status: StatusCode,
    reply: &'static str,
}

/// Local stand-in for the trading API, recording every trade it receives.
pub struct TradingApiStub {
    pub url: String,
    received: Arc<Mutex<Vec<ReceivedTrade>>>,
}

impl TradingApiStub {
    #[allow(dead_code)]
    pub fn received(&self) -> Vec<ReceivedTrade> {
        self.received.lock().unwrap().clone()
    }
}

/// Start a stub answering every trade with `status` and `reply` as body.
#[allow(dead_code)]
pub async fn spawn_trading_api(status: StatusCode, reply: &'static str) -> TradingApiStub {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        received: received.clone(),
        status,
        reply,
    };
    let app = Router::new()
        .route("/process-trade", post(record_trade))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub trading API");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TradingApiStub {
        url: format!("http://{addr}"),
        received,
    }
}

async fn record_trade(
    State(state): State<StubState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state
        .received
        .lock()
        .unwrap()
        .push(ReceivedTrade { content_type, body });
    (state.status, state.reply)
}

/// A base URL on which nothing is listening.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Wraps another decoder and counts how often it is asked to decode.
#[allow(dead_code)]
pub struct CountingDecoder<D> {
    pub inner: D,
    pub calls: AtomicUsize,
}

impl<D: EventDecoder> EventDecoder for CountingDecoder<D> {
    fn parse_events_from_logs(&self, logs: &[String]) -> Result<Vec<DexEvent>, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.parse_events_from_logs(logs)
    }
}

#[allow(dead_code)]
pub fn counting_log_decoder() -> Arc<CountingDecoder<LogDecoder>> {
    Arc::new(CountingDecoder {
        inner: LogDecoder::new(DEX_PROGRAM),
        calls: AtomicUsize::new(0),
    })
}

/// Decoder that ignores the logs and returns a fixed event list.
#[allow(dead_code)]
pub struct FixedDecoder(pub Vec<DexEvent>);

impl EventDecoder for FixedDecoder {
    fn parse_events_from_logs(&self, _logs: &[String]) -> Result<Vec<DexEvent>, DecodeError> {
        Ok(self.0.clone())
    }
}

#[allow(dead_code)]
pub fn build_test_app(decoder: Arc<dyn EventDecoder>, trading_api_url: &str) -> Router {
    build_test_app_with_products(decoder, ProductCatalog::default(), trading_api_url)
}

#[allow(dead_code)]
pub fn build_test_app_with_products(
    decoder: Arc<dyn EventDecoder>,
    products: ProductCatalog,
    trading_api_url: &str,
) -> Router {
    let state = AppState {
        decoder,
        products: Arc::new(products),
        forwarder: Arc::new(TradeForwarder::new(reqwest::Client::new(), trading_api_url)),
        metrics_handle: trades_webhook::metrics::detached_handle(),
    };
    create_router(state)
}

/// POST `body` to `/webhook` and return status plus parsed JSON response.
#[allow(dead_code)]
pub async fn post_webhook(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header(CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
