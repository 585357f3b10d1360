use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::types::{ParsePubkeyError, Pubkey};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid owner in account info: {0}")]
    Owner(#[from] ParsePubkeyError),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Subset of `getAccountInfo` we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[derive(Deserialize)]
struct RpcEnvelope {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct RawAccount {
    owner: String,
    lamports: u64,
    /// `[<payload>, <encoding>]`
    data: (String, String),
}

/// Minimal Solana JSON-RPC client.
#[derive(Debug, Clone)]
pub struct RpcClient {
    http: Client,
    url: String,
}

impl RpcClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let envelope: RpcEnvelope = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = envelope.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| RpcError::Unexpected(format!("{method}: missing result")))
    }

    /// Node software version, e.g. `"1.18.22"`.
    pub async fn get_version(&self) -> Result<String, RpcError> {
        let result = self.call("getVersion", json!([])).await?;
        result
            .get("solana-core")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| RpcError::Unexpected(format!("getVersion: {result}")))
    }

    /// `Ok(None)` when the account does not exist.
    pub async fn get_account_info(&self, key: &Pubkey) -> Result<Option<AccountInfo>, RpcError> {
        let result = self
            .call(
                "getAccountInfo",
                json!([key.to_string(), { "encoding": "base64" }]),
            )
            .await?;

        let value = match result.get("value") {
            Some(Value::Null) | None => return Ok(None),
            Some(v) => v.clone(),
        };
        let raw: RawAccount = serde_json::from_value(value)
            .map_err(|e| RpcError::Unexpected(format!("getAccountInfo: {e}")))?;

        let (payload, encoding) = raw.data;
        if encoding != "base64" {
            return Err(RpcError::Unexpected(format!(
                "getAccountInfo: data encoded as {encoding}"
            )));
        }
        let data = STANDARD
            .decode(payload)
            .map_err(|e| RpcError::Unexpected(format!("getAccountInfo data: {e}")))?;

        Ok(Some(AccountInfo {
            owner: raw.owner.parse()?,
            lamports: raw.lamports,
            data,
        }))
    }
}
