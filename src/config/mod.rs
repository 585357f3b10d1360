use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::dex::{Pubkey, DEFAULT_DEX_PROGRAM_ID, DEFAULT_MARKET_PRODUCT_GROUP};
use crate::trading::DEFAULT_TRADING_API_URL;

const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Downstream trading API
    pub trading_api_url: String,
    pub trading_api_timeout: Option<Duration>,

    // Solana / Dexterity
    pub solana_rpc_url: String,
    pub market_product_group: Pubkey,
    pub dex_program_id: Pubkey,
    pub verify_market_product_group: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset and empty values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let trading_api_timeout = match var("TRADING_API_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("TRADING_API_TIMEOUT_SECS must be a whole number of seconds")?,
            )),
            None => None,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT")
                .unwrap_or_else(|| "80".into())
                .trim()
                .parse()
                .context("PORT must be a valid port number")?,

            trading_api_url: var("TRADING_API_URL")
                .unwrap_or_else(|| DEFAULT_TRADING_API_URL.into()),
            trading_api_timeout,

            solana_rpc_url: var("SOLANA_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.into()),
            market_product_group: var("MARKET_PRODUCT_GROUP")
                .unwrap_or_else(|| DEFAULT_MARKET_PRODUCT_GROUP.into())
                .parse()
                .context("MARKET_PRODUCT_GROUP must be a base58 public key")?,
            dex_program_id: var("DEX_PROGRAM_ID")
                .unwrap_or_else(|| DEFAULT_DEX_PROGRAM_ID.into())
                .parse()
                .context("DEX_PROGRAM_ID must be a base58 public key")?,
            verify_market_product_group: var("VERIFY_MARKET_PRODUCT_GROUP")
                .unwrap_or_else(|| "true".into())
                .trim()
                .to_ascii_lowercase()
                .parse()
                .context("VERIFY_MARKET_PRODUCT_GROUP must be true or false")?,
        })
    }
}
