use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::TradeRecord;

pub const DEFAULT_TRADING_API_URL: &str = "http://localhost:3000";
const PROCESS_TRADE_PATH: &str = "/process-trade";

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("trading API returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("trading API returned a non-JSON body: {0}")]
    Body(String),
}

/// What the trading API answered for one delivered trade.
#[derive(Debug, Clone)]
pub struct ForwardReceipt {
    pub status: u16,
    pub body: Value,
}

/// Posts trade records to the trading API, one request per trade.
///
/// No retries. Callers decide what a failed delivery means; the webhook
/// logs it and moves on.
#[derive(Debug, Clone)]
pub struct TradeForwarder {
    http: Client,
    endpoint: String,
}

impl TradeForwarder {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), PROCESS_TRADE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one trade as `application/json`.
    pub async fn forward(&self, trade: &TradeRecord) -> Result<ForwardReceipt, ForwardError> {
        let resp = self.http.post(&self.endpoint).json(trade).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        if !(200..300).contains(&status) {
            tracing::warn!(status, response = %text, "Trading API rejected trade");
            return Err(ForwardError::Rejected { status, body: text });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ForwardError::Body(e.to_string()))?;

        tracing::info!(status, response = %body, "Trade forwarded");
        Ok(ForwardReceipt { status, body })
    }
}
